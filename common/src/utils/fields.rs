//! Required-field checks for request bodies.

use crate::errors::{AppError, AppResult};

/// Fails with the first field (in the given order) that is absent.
///
/// Request structs keep required fields as `Option` so that a missing field
/// can be reported by name instead of as a generic deserialization error.
pub fn ensure_present(fields: &[(&'static str, bool)]) -> AppResult<()> {
    match fields.iter().find(|(_, present)| !present) {
        Some((name, _)) => Err(AppError::MissingField(*name)),
        None => Ok(()),
    }
}
