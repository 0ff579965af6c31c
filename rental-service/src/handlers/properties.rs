//! 房源处理器

use axum::{
    extract::Query,
    http::StatusCode,
    Extension, Json,
};

use common::errors::AppResult;
use common::middleware::{AuthTenant, JsonBody, RequestId};
use common::models::{CreatePropertyRequest, PropertyCreated, PropertyFilter, PropertyItem};
use common::response::ApiResponse;
use crate::db::Session;
use crate::repository::properties;
use crate::SERVICE_NAME;

/// 列出房源，可按城市和类型过滤
#[utoipa::path(
    get,
    path = "/api/v1/properties",
    tag = "properties",
    params(PropertyFilter),
    responses(
        (status = 200, description = "房源列表", body = ApiResponse<Vec<PropertyItem>>),
        (status = 503, description = "数据库不可用")
    )
)]
pub async fn list_properties(
    Extension(request_id): Extension<RequestId>,
    Query(filter): Query<PropertyFilter>,
    mut session: Session,
) -> AppResult<Json<ApiResponse<Vec<PropertyItem>>>> {
    let data = properties::list(session.cursor(), &filter).await?;
    Ok(Json(
        ApiResponse::ok_with_service(data, SERVICE_NAME).with_request_id(request_id.0),
    ))
}

/// 创建房源
#[utoipa::path(
    post,
    path = "/api/v1/properties",
    tag = "properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "房源已创建", body = ApiResponse<PropertyCreated>),
        (status = 400, description = "缺少必填字段"),
        (status = 401, description = "未认证")
    )
)]
pub async fn create_property(
    Extension(request_id): Extension<RequestId>,
    AuthTenant(tenant_id): AuthTenant,
    mut session: Session,
    JsonBody(payload): JsonBody<CreatePropertyRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PropertyCreated>>)> {
    let property = payload.into_new_property()?;

    let mut tx = session.begin().await?;
    let outcome = properties::create(tx.cursor(), &property).await;
    let property_id = tx.settle(outcome).await?;

    tracing::info!(property_id, tenant_id, "房源已创建");

    let body = PropertyCreated {
        message: "Property created successfully".to_string(),
        property_id,
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_service(body, SERVICE_NAME).with_request_id(request_id.0)),
    ))
}
