//! Supported database backends.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Database driver behind the `sqlx::Any` pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DbBackend {
    /// MySQL database (production).
    MySQL,
    /// SQLite database (tests and local development).
    SQLite,
}

impl DbBackend {
    /// Returns the default port for this database type.
    pub fn default_port(&self) -> u16 {
        match self {
            DbBackend::MySQL => 3306,
            DbBackend::SQLite => 0,
        }
    }

    /// Maps a connection URL scheme to a backend.
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_lowercase().as_str() {
            "mysql" | "mariadb" => Some(DbBackend::MySQL),
            "sqlite" => Some(DbBackend::SQLite),
            _ => None,
        }
    }
}

impl std::fmt::Display for DbBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbBackend::MySQL => write!(f, "mysql"),
            DbBackend::SQLite => write!(f, "sqlite"),
        }
    }
}
