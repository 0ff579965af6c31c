//! 租房服务入口

use anyhow::Context;
use common::config::AppConfig;
use rental_service::{create_router, AppState, SERVICE_NAME};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 先加载 .env（如果存在）
    dotenvy::dotenv().ok();

    // 初始化日志追踪（LOG_FORMAT=json 时输出 JSON）
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
    );
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME).context("加载配置失败")?;

    // 创建应用状态（数据库连接池惰性连接）
    let state = AppState::new(config.clone())
        .await
        .context("初始化应用状态失败")?;
    let db = state.db.clone();

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = format!("{}:{}", config.host, config.port);
    info!(service = SERVICE_NAME, address = %addr, "启动服务");

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务运行失败")?;

    db.close().await;
    info!(service = SERVICE_NAME, "服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "监听关闭信号失败");
    }
    info!("收到关闭信号");
}
