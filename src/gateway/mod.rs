//! Gateway 应用层
//!
//! HTTP 服务器和请求处理

mod error;
mod handlers;
mod middleware;
mod state;

pub use error::ApiError;
pub use state::AppState;

use anyhow::Result;
use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::normalize::LenientNormalizer;
use crate::providers;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub async fn serve(config: Config) -> Result<()> {
    let provider = providers::from_config(&config);
    if provider.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set; /analyze will report misconfiguration");
    }

    let state = AppState::new(provider, Arc::new(LenientNormalizer));
    let app = build_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 构建路由
///
/// 分析接口只接受 POST，其余方法统一返回 405；
/// 页面从浏览器直接调用，CORS 放开。
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/analyze",
            post(handlers::handle_analyze).fallback(handlers::handle_method_not_allowed),
        )
        .route("/health", get(handlers::handle_health))
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_logger))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
                )),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    tokio::select! {
        _ = ctrl_c => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
