//! Database connection provider.
//!
//! Owns the connection pool for the configured backend (MySQL in production,
//! SQLite for tests and local development) together with the status tracker
//! and the transaction counters. One provider is built at startup and shared
//! through `AppState`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use common::config::DatabaseConfig;
use common::errors::{AppError, AppResult};
use common::models::{
    ConnectionStats, ConnectionStatus, DbBackend, HealthReport, PoolStats,
    TransactionStats,
};
use sqlx::any::AnyPoolOptions;
use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyPool, Connection};

use super::schema;
use super::status::StatusTracker;
use super::transaction::TransactionCounters;

/// Produces live database connections and records the outcome of every
/// connection attempt.
pub struct ConnectionProvider {
    config: DatabaseConfig,
    backend: DbBackend,
    pool: AnyPool,
    status: StatusTracker,
    transactions: Arc<TransactionCounters>,
    active_sessions: AtomicUsize,
}

impl ConnectionProvider {
    /// Creates the provider without touching the database.
    ///
    /// The pool connects lazily, so the service starts even while the
    /// database is down. Only a malformed URL fails here.
    pub fn new(config: DatabaseConfig) -> AppResult<Self> {
        sqlx::any::install_default_drivers();

        let backend = config.backend()?;
        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(config.idle_timeout())
            .test_before_acquire(true)
            .connect_lazy(&config.connection_url())
            .map_err(|e| AppError::Config(format!("invalid database URL: {}", e)))?;

        let target = config.describe();
        tracing::info!(
            backend = %backend,
            host = %target.host,
            database = %target.database,
            max_connections = config.max_connections,
            "Connection pool configured"
        );

        Ok(Self {
            config,
            backend,
            pool,
            status: StatusTracker::new(),
            transactions: Arc::new(TransactionCounters::default()),
            active_sessions: AtomicUsize::new(0),
        })
    }

    /// Acquires a connection from the pool.
    ///
    /// Every call counts as one attempt. Failures are reported as
    /// [`AppError::DatabaseConnection`] whatever the driver returned.
    pub async fn connect(&self) -> AppResult<PoolConnection<Any>> {
        match self.pool.acquire().await {
            Ok(conn) => {
                self.status.record_success().await;
                tracing::debug!(backend = %self.backend, "Database connection acquired");
                Ok(conn)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!(backend = %self.backend, error = %message, "Error connecting to database");
                self.status.record_failure(message.clone()).await;
                Err(AppError::DatabaseConnection(message))
            }
        }
    }

    /// Returns a usable connection, reusing an idle one when it still
    /// answers a ping.
    ///
    /// A dead idle connection is closed and replaced through [`connect`].
    ///
    /// [`connect`]: ConnectionProvider::connect
    pub async fn get_connection(&self) -> AppResult<PoolConnection<Any>> {
        let Some(mut conn) = self.pool.try_acquire() else {
            return self.connect().await;
        };

        match conn.ping().await {
            Ok(()) => {
                self.status.record_alive().await;
                Ok(conn)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Idle connection is dead, reconnecting");
                self.status.record_lost(e.to_string()).await;
                if let Err(e) = conn.detach().close().await {
                    tracing::debug!(error = %e, "Closing dead connection failed");
                }
                self.connect().await
            }
        }
    }

    /// Health probe: connects and runs `SELECT 1`.
    pub async fn check_connection(&self) -> HealthReport {
        let outcome = match self.connect().await {
            Ok(mut conn) => match sqlx::query("SELECT 1").execute(&mut *conn).await {
                Ok(_) => Ok(()),
                Err(e) => {
                    tracing::warn!(error = %e, "Health query failed");
                    self.status.record_lost(e.to_string()).await;
                    Err(AppError::from(e))
                }
            },
            Err(e) => Err(e),
        };

        let (status, message) = match outcome {
            Ok(()) => (HealthReport::CONNECTED, "Database connection successful".to_string()),
            Err(e) => (HealthReport::ERROR, e.user_message()),
        };

        HealthReport {
            status: status.to_string(),
            message,
            connection_info: self.status.snapshot().await,
            server_time: Utc::now(),
        }
    }

    /// Creates the application tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> AppResult<()> {
        let mut conn = self.connect().await?;
        for statement in schema::statements(self.backend) {
            sqlx::query(statement).execute(&mut *conn).await?;
        }

        tracing::info!(backend = %self.backend, "Schema ensured");
        Ok(())
    }

    pub fn pool_stats(&self) -> PoolStats {
        let size = self.pool.size();
        let idle = u32::try_from(self.pool.num_idle()).unwrap_or(size);
        PoolStats {
            active: size.saturating_sub(idle),
            idle,
            max_size: self.config.max_connections,
            is_connected: !self.pool.is_closed(),
        }
    }

    pub fn transaction_stats(&self) -> TransactionStats {
        self.transactions.snapshot()
    }

    pub async fn status(&self) -> ConnectionStatus {
        self.status.snapshot().await
    }

    /// Status, non-secret configuration, pool and transaction counters.
    pub async fn connection_stats(&self) -> ConnectionStats {
        ConnectionStats {
            status: self.status.snapshot().await,
            database_config: self.config.describe(),
            pool: self.pool_stats(),
            transactions: self.transaction_stats(),
        }
    }

    /// Number of sessions currently holding a connection.
    pub fn active_sessions(&self) -> usize {
        self.active_sessions.load(Ordering::SeqCst)
    }

    pub fn backend(&self) -> DbBackend {
        self.backend
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub(crate) fn transactions(&self) -> &Arc<TransactionCounters> {
        &self.transactions
    }

    pub(crate) fn session_opened(&self) {
        self.active_sessions.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn session_closed(&self) {
        self.active_sessions.fetch_sub(1, Ordering::SeqCst);
    }

    /// Closes the pool, waiting for checked-out connections to come back.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            host: "localhost".into(),
            port: 3306,
            user: "root".into(),
            password: "secret".into(),
            name: "house_rental".into(),
            url: Some(url.into()),
            max_connections: 1,
            connect_timeout_secs: 2,
            idle_timeout_secs: 0,
        }
    }

    fn memory() -> ConnectionProvider {
        ConnectionProvider::new(config("sqlite::memory:")).unwrap()
    }

    fn unreachable() -> ConnectionProvider {
        ConnectionProvider::new(config("sqlite:///nonexistent-dir/rental.db")).unwrap()
    }

    #[tokio::test]
    async fn test_new_does_not_connect() {
        let provider = unreachable();
        let status = provider.status().await;
        assert_eq!(status.attempt_count, 0);
        assert!(!status.is_connected);
    }

    #[tokio::test]
    async fn test_connect_success_updates_status() {
        let provider = memory();
        let conn = provider.connect().await.unwrap();
        drop(conn);

        let status = provider.status().await;
        assert_eq!(status.attempt_count, 1);
        assert!(status.is_connected);
        assert!(status.last_error.is_none());
        assert!(status.last_connection.is_some());
    }

    #[tokio::test]
    async fn test_connect_failure_is_connection_error() {
        let provider = unreachable();
        let err = provider.connect().await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseConnection(_)));

        let status = provider.status().await;
        assert_eq!(status.attempt_count, 1);
        assert!(!status.is_connected);
        assert!(status.last_error.is_some());
    }

    #[tokio::test]
    async fn test_attempts_count_every_call() {
        let provider = unreachable();
        for _ in 0..3 {
            let _ = provider.connect().await;
        }
        assert_eq!(provider.status().await.attempt_count, 3);
    }

    #[tokio::test]
    async fn test_get_connection_reuses_idle_connection() {
        let provider = memory();
        provider.ensure_schema().await.unwrap();
        let attempts = provider.status().await.attempt_count;

        // Let the connection from ensure_schema return to the pool.
        while provider.pool().num_idle() == 0 {
            tokio::task::yield_now().await;
        }

        let mut conn = provider.get_connection().await.unwrap();
        // Same in-memory database, so the schema is still there.
        sqlx::query("SELECT COUNT(*) FROM tenants")
            .execute(&mut *conn)
            .await
            .unwrap();
        assert_eq!(provider.status().await.attempt_count, attempts);
    }

    #[tokio::test]
    async fn test_reused_connection_clears_lost_status() {
        let provider = memory();
        drop(provider.connect().await.unwrap());
        while provider.pool().num_idle() == 0 {
            tokio::task::yield_now().await;
        }
        provider.status.record_lost("health query failed").await;

        let conn = provider.get_connection().await.unwrap();
        drop(conn);

        let status = provider.status().await;
        assert!(status.is_connected);
        assert!(status.last_error.is_none());
        assert_eq!(status.attempt_count, 1);
    }

    #[tokio::test]
    async fn test_health_reports_both_outcomes() {
        let ok = memory().check_connection().await;
        assert!(ok.is_connected());
        assert_eq!(ok.message, "Database connection successful");
        assert_eq!(ok.connection_info.attempt_count, 1);

        let down = unreachable();
        let first = down.check_connection().await;
        let second = down.check_connection().await;
        assert_eq!(first.status, HealthReport::ERROR);
        assert_eq!(first.message, "Database connection failed");
        assert!(!second.connection_info.is_connected);
        assert_eq!(
            second.connection_info.attempt_count,
            first.connection_info.attempt_count + 1
        );
    }

    #[tokio::test]
    async fn test_stats_hide_password() {
        let provider = memory();
        let stats = provider.connection_stats().await;
        assert_eq!(stats.database_config.database, ":memory:");
        assert_eq!(stats.pool.max_size, 1);

        let json = serde_json::to_string(&stats).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_bad_url_is_config_error() {
        let result = ConnectionProvider::new(config("postgres://localhost/db"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
