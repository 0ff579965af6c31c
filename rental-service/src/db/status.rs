//! Connection status tracking.

use chrono::Utc;
use common::models::ConnectionStatus;
use tokio::sync::RwLock;

/// Holds the outcome of connection attempts.
///
/// Only the provider records attempts; everyone else reads snapshots.
#[derive(Default)]
pub struct StatusTracker {
    inner: RwLock<ConnectionStatus>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn record_success(&self) {
        let mut status = self.inner.write().await;
        status.attempt_count += 1;
        status.is_connected = true;
        status.last_connection = Some(Utc::now());
        status.last_error = None;
    }

    pub(crate) async fn record_failure(&self, error: impl Into<String>) {
        let mut status = self.inner.write().await;
        status.attempt_count += 1;
        status.is_connected = false;
        status.last_error = Some(error.into());
    }

    /// Marks a connection that was already counted as lost.
    pub(crate) async fn record_lost(&self, error: impl Into<String>) {
        let mut status = self.inner.write().await;
        status.is_connected = false;
        status.last_error = Some(error.into());
    }

    /// Marks a reused connection that answered a ping. Not an attempt.
    pub(crate) async fn record_alive(&self) {
        if self.inner.read().await.is_connected {
            return;
        }
        let mut status = self.inner.write().await;
        status.is_connected = true;
        status.last_error = None;
    }

    /// Returns an owned copy of the current status.
    pub async fn snapshot(&self) -> ConnectionStatus {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_disconnected() {
        let status = StatusTracker::new().snapshot().await;
        assert_eq!(status.attempt_count, 0);
        assert!(!status.is_connected);
        assert!(status.last_connection.is_none());
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let tracker = StatusTracker::new();
        tracker.record_failure("refused").await;
        tracker.record_success().await;

        let status = tracker.snapshot().await;
        assert_eq!(status.attempt_count, 2);
        assert!(status.is_connected);
        assert!(status.last_error.is_none());
        assert!(status.last_connection.is_some());
    }

    #[tokio::test]
    async fn test_failure_keeps_last_success_time() {
        let tracker = StatusTracker::new();
        tracker.record_success().await;
        let connected_at = tracker.snapshot().await.last_connection;
        tracker.record_failure("timed out").await;

        let status = tracker.snapshot().await;
        assert_eq!(status.attempt_count, 2);
        assert!(!status.is_connected);
        assert_eq!(status.last_error.as_deref(), Some("timed out"));
        assert_eq!(status.last_connection, connected_at);
    }

    #[tokio::test]
    async fn test_lost_connection_is_not_an_attempt() {
        let tracker = StatusTracker::new();
        tracker.record_success().await;
        tracker.record_lost("server has gone away").await;

        let status = tracker.snapshot().await;
        assert_eq!(status.attempt_count, 1);
        assert!(!status.is_connected);
        assert_eq!(status.last_error.as_deref(), Some("server has gone away"));
    }

    #[tokio::test]
    async fn test_alive_recovers_without_counting() {
        let tracker = StatusTracker::new();
        tracker.record_success().await;
        let connected_at = tracker.snapshot().await.last_connection;
        tracker.record_lost("server has gone away").await;
        tracker.record_alive().await;

        let status = tracker.snapshot().await;
        assert_eq!(status.attempt_count, 1);
        assert!(status.is_connected);
        assert!(status.last_error.is_none());
        assert_eq!(status.last_connection, connected_at);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached() {
        let tracker = StatusTracker::new();
        let mut copy = tracker.snapshot().await;
        copy.attempt_count = 99;
        assert_eq!(tracker.snapshot().await.attempt_count, 0);
    }
}
