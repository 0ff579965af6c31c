use common::errors::AppResult;
use common::models::maintenance::INITIAL_STATUS;
use common::models::NewMaintenanceRequest;
use sqlx::AnyConnection;

/// Inserts a maintenance request in the initial status and returns its ID.
pub async fn create(conn: &mut AnyConnection, request: &NewMaintenanceRequest) -> AppResult<i64> {
    let result = sqlx::query(
        "INSERT INTO maintenance_requests (property_id, tenant_id, issue_type, description, priority, status)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(request.property_id)
    .bind(request.tenant_id)
    .bind(&request.issue_type)
    .bind(&request.description)
    .bind(&request.priority)
    .bind(INITIAL_STATUS)
    .execute(&mut *conn)
    .await?;

    super::inserted_id(conn, &result, "maintenance_requests").await
}
