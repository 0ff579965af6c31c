//! Commit-on-success / rollback-on-error boundary around mutating work.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use common::errors::{AppError, AppResult};
use common::models::TransactionStats;
use sqlx::{Any, AnyConnection, Transaction};

/// Process-wide commit and rollback counters.
#[derive(Debug, Default)]
pub struct TransactionCounters {
    commits: AtomicU64,
    rollbacks: AtomicU64,
}

impl TransactionCounters {
    fn record_commit(&self) {
        self.commits.fetch_add(1, Ordering::SeqCst);
    }

    fn record_rollback(&self) {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> TransactionStats {
        TransactionStats {
            commits: self.commits.load(Ordering::SeqCst),
            rollbacks: self.rollbacks.load(Ordering::SeqCst),
        }
    }
}

/// An open transaction on a session's connection.
///
/// Finish it with [`settle`](TransactionBoundary::settle). A boundary dropped
/// unsettled is rolled back by the driver and counted as a rollback.
pub struct TransactionBoundary<'c> {
    tx: Transaction<'c, Any>,
    guard: SettleGuard,
}

struct SettleGuard {
    counters: Arc<TransactionCounters>,
    settled: bool,
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if !self.settled {
            self.counters.record_rollback();
            tracing::warn!("Transaction dropped without settling, rolled back");
        }
    }
}

impl<'c> TransactionBoundary<'c> {
    pub(crate) fn new(tx: Transaction<'c, Any>, counters: Arc<TransactionCounters>) -> Self {
        Self {
            tx,
            guard: SettleGuard {
                counters,
                settled: false,
            },
        }
    }

    /// Connection to run the transaction's statements on.
    pub fn cursor(&mut self) -> &mut AnyConnection {
        &mut self.tx
    }

    /// Commits when `outcome` is `Ok`, rolls back otherwise.
    ///
    /// The outcome is handed back unchanged unless the commit itself fails;
    /// a failed commit counts as a rollback.
    pub async fn settle<T>(self, outcome: AppResult<T>) -> AppResult<T> {
        let TransactionBoundary { tx, mut guard } = self;
        guard.settled = true;

        match outcome {
            Ok(value) => match tx.commit().await {
                Ok(()) => {
                    guard.counters.record_commit();
                    tracing::debug!("Transaction committed");
                    Ok(value)
                }
                Err(e) => {
                    guard.counters.record_rollback();
                    tracing::error!(error = %e, "Commit failed");
                    Err(AppError::from(e))
                }
            },
            Err(err) => {
                if let Err(e) = tx.rollback().await {
                    tracing::warn!(error = %e, "Rollback failed");
                }
                guard.counters.record_rollback();
                tracing::debug!(error = %err, "Transaction rolled back");
                Err(err)
            }
        }
    }
}
