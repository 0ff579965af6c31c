//! Utility functions and helpers.

pub mod fields;

// Re-export commonly used types
pub use fields::ensure_present;
