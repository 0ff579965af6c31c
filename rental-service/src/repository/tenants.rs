use common::errors::{AppError, AppResult};
use common::models::{NewTenant, TenantSummary};
use sqlx::{AnyConnection, Row};

pub async fn find_by_email(conn: &mut AnyConnection, email: &str) -> AppResult<Option<TenantSummary>> {
    let row = sqlx::query("SELECT tenant_id, email FROM tenants WHERE email = ?")
        .bind(email)
        .fetch_optional(conn)
        .await?;

    Ok(row.map(|row| TenantSummary {
        tenant_id: row.get("tenant_id"),
        email: row.get("email"),
    }))
}

/// Inserts a tenant and returns its ID.
///
/// Fails with [`AppError::EmailAlreadyRegistered`] if the email is taken,
/// whether the lookup or the unique key catches it.
pub async fn create(conn: &mut AnyConnection, tenant: &NewTenant) -> AppResult<i64> {
    if find_by_email(&mut *conn, &tenant.email).await?.is_some() {
        return Err(AppError::EmailAlreadyRegistered);
    }

    let result = sqlx::query(
        "INSERT INTO tenants (email, first_name, last_name, phone, identity_number, emergency_contact, emergency_phone)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&tenant.email)
    .bind(&tenant.first_name)
    .bind(&tenant.last_name)
    .bind(&tenant.phone)
    .bind(&tenant.identity_number)
    .bind(&tenant.emergency_contact)
    .bind(&tenant.emergency_phone)
    .execute(&mut *conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::EmailAlreadyRegistered,
        other => AppError::from(other),
    })?;

    super::inserted_id(conn, &result, "tenants").await
}
