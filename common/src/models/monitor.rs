//! Connection health and statistics models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome record of connection attempts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConnectionStatus {
    /// Time of the last successful connection.
    pub last_connection: Option<DateTime<Utc>>,
    /// Number of connection attempts since startup.
    #[serde(rename = "connection_attempts")]
    pub attempt_count: u64,
    /// Outcome of the most recent attempt.
    pub is_connected: bool,
    /// Error of the most recent attempt, cleared on success.
    pub last_error: Option<String>,
}

/// Connection pool statistics.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PoolStats {
    /// Number of active (in-use) connections.
    pub active: u32,
    /// Number of idle connections.
    pub idle: u32,
    /// Maximum pool size configured.
    pub max_size: u32,
    /// Whether the pool is still accepting acquisitions.
    pub is_connected: bool,
}

/// Commit/rollback counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransactionStats {
    pub commits: u64,
    pub rollbacks: u64,
}

/// Database health probe result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    /// `"connected"` or `"error"`.
    pub status: String,
    pub message: String,
    pub connection_info: ConnectionStatus,
    pub server_time: DateTime<Utc>,
}

impl HealthReport {
    pub const CONNECTED: &'static str = "connected";
    pub const ERROR: &'static str = "error";

    pub fn is_connected(&self) -> bool {
        self.status == Self::CONNECTED
    }
}

/// Non-secret part of the database configuration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatabaseConfigInfo {
    pub host: String,
    pub database: String,
    pub port: u16,
}

/// Detailed connection statistics.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConnectionStats {
    pub status: ConnectionStatus,
    pub database_config: DatabaseConfigInfo,
    pub pool: PoolStats,
    pub transactions: TransactionStats,
}
