//! Application state for the rental service.

use std::sync::Arc;

use axum::extract::FromRef;
use common::config::AppConfig;
use common::errors::AppResult;
use common::middleware::JwtKeys;

use crate::db::ConnectionProvider;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: Arc<ConnectionProvider>,
    pub jwt: JwtKeys,
}

impl AppState {
    /// Builds the state and makes sure the tables exist.
    ///
    /// An unreachable database is not fatal: the service starts and reports
    /// the outage through the health endpoint.
    pub async fn new(config: AppConfig) -> AppResult<Self> {
        let db = Arc::new(ConnectionProvider::new(config.database.clone())?);
        if let Err(e) = db.ensure_schema().await {
            tracing::warn!(error = %e, "Schema check skipped, database unavailable");
        }

        Ok(Self {
            jwt: JwtKeys::new(&config.jwt),
            db,
            config,
        })
    }
}

impl FromRef<AppState> for Arc<ConnectionProvider> {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
