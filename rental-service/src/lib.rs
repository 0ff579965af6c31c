//! 租房服务
//!
//! 提供租户注册登录、房源管理和维修请求功能，包括：
//! - 数据库连接提供者与连接状态跟踪
//! - 请求级会话与事务边界
//! - 健康检查与连接统计

pub mod db;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod state;

use std::any::Any;

use axum::{middleware, response::IntoResponse, response::Response, routing::get, Json, Router};
use common::errors::AppError;
use common::middleware::request_id_middleware;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub use state::AppState;

pub const SERVICE_NAME: &str = "rental-service";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "租房服务 API",
        version = "0.1.0",
        description = "房屋租赁后端：租户、房源与维修请求"
    ),
    paths(
        handlers::index,
        handlers::health::health_check,
        handlers::health::connection_stats,
        handlers::auth::register,
        handlers::auth::login,
        handlers::properties::list_properties,
        handlers::properties::create_property,
        handlers::maintenance::create_request,
    ),
    components(schemas(
        common::models::ConnectionStatus,
        common::models::ConnectionStats,
        common::models::DatabaseConfigInfo,
        common::models::HealthReport,
        common::models::PoolStats,
        common::models::TransactionStats,
        common::models::RegisterRequest,
        common::models::RegisterResponse,
        common::models::LoginRequest,
        common::models::LoginResponse,
        common::models::TenantSummary,
        common::models::CreatePropertyRequest,
        common::models::PropertyCreated,
        common::models::PropertyItem,
        common::models::CreateMaintenanceRequest,
        common::models::MaintenanceCreated,
        handlers::WelcomeMessage,
    )),
    tags(
        (name = "health", description = "健康检查端点"),
        (name = "auth", description = "租户认证端点"),
        (name = "properties", description = "房源端点"),
        (name = "maintenance", description = "维修请求端点")
    )
)]
pub struct ApiDoc;

/// 组装完整的应用路由
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// 将处理器中的 panic 转换为 500 JSON 响应
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
