//! 维修请求处理器

use axum::{http::StatusCode, Extension, Json};

use common::errors::AppResult;
use common::middleware::{AuthTenant, JsonBody, RequestId};
use common::models::{CreateMaintenanceRequest, MaintenanceCreated};
use common::response::ApiResponse;
use crate::db::Session;
use crate::repository::maintenance;
use crate::SERVICE_NAME;

/// 提交维修请求，租户取自令牌
#[utoipa::path(
    post,
    path = "/api/v1/maintenance",
    tag = "maintenance",
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 201, description = "维修请求已创建", body = ApiResponse<MaintenanceCreated>),
        (status = 400, description = "缺少必填字段或房源不存在"),
        (status = 401, description = "未认证")
    )
)]
pub async fn create_request(
    Extension(trace): Extension<RequestId>,
    AuthTenant(tenant_id): AuthTenant,
    mut session: Session,
    JsonBody(payload): JsonBody<CreateMaintenanceRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<MaintenanceCreated>>)> {
    let request = payload.into_new_request(tenant_id)?;

    let mut tx = session.begin().await?;
    let outcome = maintenance::create(tx.cursor(), &request).await;
    let request_id = tx.settle(outcome).await?;

    tracing::info!(request_id, tenant_id, "维修请求已创建");

    let body = MaintenanceCreated {
        message: "Maintenance request created successfully".to_string(),
        request_id,
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_service(body, SERVICE_NAME).with_request_id(trace.0)),
    ))
}
