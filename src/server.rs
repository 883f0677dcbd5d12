//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the `serve` command and integration tests.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method},
    response::Response,
    routing::{any, get},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::api;
use crate::error::HostError;
use crate::models::AppConfig;
use crate::services::FunctionRegistry;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<FunctionRegistry>,
    pub config: Arc<AppConfig>,
    /// Directory served for paths no function route matches
    pub static_dir: Option<PathBuf>,
}

/// Create application state with every built-in function registered.
pub fn create_app_state(config: AppConfig, static_dir: Option<PathBuf>) -> AppState {
    let registry = Arc::new(FunctionRegistry::with_defaults(&config));
    tracing::debug!(functions = ?registry.names(), "Function registry ready");

    AppState {
        registry,
        config: Arc::new(config),
        static_dir,
    }
}

/// Build the host router with all endpoints and middleware.
///
/// When a static directory is configured it answers every unmatched path,
/// which lets the resize function use this same server as its origin.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();

    let router = Router::new()
        .route("/.netlify/functions/:name", any(handle_invoke_root))
        .route("/.netlify/functions/:name/*rest", any(handle_invoke))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_invoke_root(
    State(state): State<AppState>,
    name: Path<String>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, HostError> {
    api::handle_invoke_root(State(state.registry), name, method, headers).await
}

async fn handle_invoke(
    State(state): State<AppState>,
    path: Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, HostError> {
    api::handle_invoke(State(state.registry), path, method, headers).await
}
