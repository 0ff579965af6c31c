//! Database access layer: connection provider, status tracking, request
//! sessions and transaction boundaries.

pub mod provider;
pub mod schema;
pub mod session;
pub mod status;
pub mod transaction;

pub use provider::ConnectionProvider;
pub use session::Session;
pub use status::StatusTracker;
pub use transaction::{TransactionBoundary, TransactionCounters};
