//! Middleware components for all services.

pub mod auth;
pub mod json_body;
pub mod request_id;

// Re-export commonly used types
pub use auth::{AuthTenant, JwtKeys};
pub use json_body::JsonBody;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
