//! 租房服务路由模块

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, auth, health, maintenance, properties};
use crate::state::AppState;

/// 创建业务路由
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(health::health_check))
        .route("/api/connection-stats", get(health::connection_stats))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route(
            "/api/v1/properties",
            get(properties::list_properties).post(properties::create_property),
        )
        .route("/api/v1/maintenance", post(maintenance::create_request))
}
