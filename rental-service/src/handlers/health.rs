//! 健康检查与连接统计处理器

use axum::{extract::State, http::StatusCode, Json};

use common::models::{ConnectionStats, HealthReport};
use crate::state::AppState;

/// 数据库健康检查
///
/// 每次调用都会尝试一次连接并执行 `SELECT 1`。
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "数据库连接正常", body = HealthReport),
        (status = 503, description = "数据库不可用", body = HealthReport)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.db.check_connection().await;
    let status = if report.is_connected() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

/// 连接详细统计（不含密码）
#[utoipa::path(
    get,
    path = "/api/connection-stats",
    tag = "health",
    responses(
        (status = 200, description = "连接统计", body = ConnectionStats)
    )
)]
pub async fn connection_stats(State(state): State<AppState>) -> Json<ConnectionStats> {
    Json(state.db.connection_stats().await)
}
