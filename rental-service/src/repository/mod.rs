//! SQL for the rental tables.
//!
//! Every function runs on a borrowed connection, normally the cursor of a
//! session or of an open transaction, and never manages transactions itself.

pub mod maintenance;
pub mod properties;
pub mod tenants;

use common::errors::{AppError, AppResult};
use common::models::DbBackend;
use sqlx::any::AnyQueryResult;
use sqlx::AnyConnection;

/// Returns the key generated by the `INSERT` that produced `result`.
///
/// The `Any` driver only forwards MySQL's insert id. On SQLite the id is read
/// back from the same connection, which must not have run another insert in
/// between.
pub(crate) async fn inserted_id(
    conn: &mut AnyConnection,
    result: &AnyQueryResult,
    table: &str,
) -> AppResult<i64> {
    if let Some(id) = result.last_insert_id().filter(|id| *id > 0) {
        return Ok(id);
    }

    let sql = match DbBackend::from_scheme(conn.backend_name()) {
        Some(DbBackend::SQLite) => "SELECT last_insert_rowid()",
        Some(DbBackend::MySQL) => "SELECT CAST(LAST_INSERT_ID() AS SIGNED)",
        None => {
            return Err(AppError::Internal(format!(
                "unsupported backend `{}`",
                conn.backend_name()
            )))
        }
    };

    let id: i64 = sqlx::query_scalar(sql).fetch_one(conn).await?;
    if id > 0 {
        Ok(id)
    } else {
        Err(AppError::Internal(format!("{} insert returned no id", table)))
    }
}
