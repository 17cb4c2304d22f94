//! HTTP boundary.
//!
//! One POST endpoint accepts the build form and returns the signed APK; a
//! health probe rounds out the surface. Everything else is the pipeline's
//! job.

pub mod handlers;
pub mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::pipeline::BuildPipeline;

/// Icon uploads can be large; axum's 2MB default is too tight.
const BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// The build pipeline, shared across all in-flight requests.
    pub pipeline: Arc<BuildPipeline>,
}

/// Builds the application router.
pub fn create_router(pipeline: Arc<BuildPipeline>) -> Router {
    Router::new()
        .route("/generate-apk", post(handlers::generate_apk))
        .route("/healthz", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(AppState { pipeline })
}

/// Binds the listener and serves until ctrl-c.
pub async fn serve(listen: SocketAddr, pipeline: Arc<BuildPipeline>) -> crate::error::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    log::info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(pipeline))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        log::info!("Shutdown signal received");
    }
}
