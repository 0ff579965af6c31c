//! 租户注册与登录处理器

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use common::errors::{AppError, AppResult};
use common::middleware::{JsonBody, RequestId};
use common::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use common::response::ApiResponse;
use crate::db::Session;
use crate::repository::tenants;
use crate::state::AppState;
use crate::SERVICE_NAME;

/// 注册租户
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "注册成功", body = ApiResponse<RegisterResponse>),
        (status = 400, description = "缺少字段或邮箱已注册"),
        (status = 503, description = "数据库不可用")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    mut session: Session,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<RegisterResponse>>)> {
    let tenant = payload.into_new_tenant()?;

    let mut tx = session.begin().await?;
    let outcome = tenants::create(tx.cursor(), &tenant).await;
    let tenant_id = tx.settle(outcome).await?;

    let token = state.jwt.issue(tenant_id)?;
    tracing::info!(tenant_id, "租户注册成功");

    let body = RegisterResponse {
        message: "Registration successful".to_string(),
        token,
        user_id: tenant_id,
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_service(body, SERVICE_NAME).with_request_id(request_id.0)),
    ))
}

/// 租户登录（按邮箱）
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "登录成功", body = ApiResponse<LoginResponse>),
        (status = 400, description = "缺少邮箱"),
        (status = 401, description = "凭证无效")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    mut session: Session,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let email = payload.into_email()?;

    let tenant = tenants::find_by_email(session.cursor(), &email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let token = state.jwt.issue(tenant.tenant_id)?;
    tracing::info!(tenant_id = tenant.tenant_id, "租户登录成功");

    let body = LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: tenant,
    };
    Ok(Json(
        ApiResponse::ok_with_service(body, SERVICE_NAME).with_request_id(request_id.0),
    ))
}
