//! Shared data models for the rental service.

pub mod backend;
pub mod maintenance;
pub mod monitor;
pub mod property;
pub mod tenant;

// Re-export commonly used types
pub use backend::DbBackend;
pub use maintenance::{CreateMaintenanceRequest, MaintenanceCreated, NewMaintenanceRequest};
pub use monitor::{
    ConnectionStats, ConnectionStatus, DatabaseConfigInfo, HealthReport, PoolStats,
    TransactionStats,
};
pub use property::{CreatePropertyRequest, NewProperty, PropertyCreated, PropertyFilter, PropertyItem};
pub use tenant::{
    LoginRequest, LoginResponse, NewTenant, RegisterRequest, RegisterResponse, TenantSummary,
};
