//! Request-scoped database session.
//!
//! Handlers take a [`Session`] argument. Extraction acquires a connection
//! before the handler body runs and `Drop` hands it back on every exit path,
//! including early returns and panics.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use common::errors::{AppError, AppResult};
use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyConnection, Connection};

use super::provider::ConnectionProvider;
use super::transaction::TransactionBoundary;

/// A pooled connection owned by one request.
pub struct Session {
    conn: PoolConnection<Any>,
    provider: Arc<ConnectionProvider>,
}

impl Session {
    pub async fn open(provider: Arc<ConnectionProvider>) -> AppResult<Self> {
        let conn = provider.get_connection().await?;
        provider.session_opened();
        Ok(Self { conn, provider })
    }

    /// The connection used to run queries. Borrowed, so it cannot outlive
    /// the session.
    pub fn cursor(&mut self) -> &mut AnyConnection {
        &mut self.conn
    }

    /// Opens a transaction on this session's connection.
    pub async fn begin(&mut self) -> AppResult<TransactionBoundary<'_>> {
        let tx = self.conn.begin().await?;
        Ok(TransactionBoundary::new(tx, self.provider.transactions().clone()))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.provider.session_closed();
        tracing::trace!("Session released");
    }
}

impl<S> FromRequestParts<S> for Session
where
    Arc<ConnectionProvider>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::open(Arc::<ConnectionProvider>::from_ref(state)).await
    }
}
