//! HTTP 处理器模块

pub mod auth;
pub mod health;
pub mod maintenance;
pub mod properties;

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use common::errors::AppError;

/// 欢迎信息
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "欢迎信息", body = WelcomeMessage)
    )
)]
pub async fn index() -> Json<WelcomeMessage> {
    Json(WelcomeMessage {
        message: "Welcome to the House Rental API".to_string(),
    })
}

/// 未匹配的路由
pub async fn not_found() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}

#[derive(Serialize, ToSchema)]
pub struct WelcomeMessage {
    pub message: String,
}
