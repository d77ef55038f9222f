// ABOUTME: HTTP server assembly with shared state, middleware, and lifecycle
// ABOUTME: Builds the axum router and serves it with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server assembly and lifecycle.

use crate::config::ServerConfig;
use crate::orchestrator::{ComparisonOrchestrator, SearchOrchestrator};
use crate::providers::FoodProviderRegistry;
use crate::routes::{DevRoutes, FoodRoutes, HealthRoutes};
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for all route handlers
pub struct AppState {
    /// Provider registry with startup readiness snapshots.
    pub registry: Arc<FoodProviderRegistry>,
    /// Single-provider search orchestration.
    pub search_orchestrator: SearchOrchestrator,
    /// Multi-provider comparison orchestration.
    pub comparison_orchestrator: ComparisonOrchestrator,
    /// Loaded server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Assemble shared state from configuration and a built registry.
    #[must_use]
    pub fn new(config: ServerConfig, registry: FoodProviderRegistry) -> Arc<Self> {
        let registry = Arc::new(registry);
        let call_timeout = Duration::from_millis(config.call_timeout_ms);
        Arc::new(Self {
            registry: Arc::clone(&registry),
            search_orchestrator: SearchOrchestrator::new(Arc::clone(&registry), call_timeout),
            comparison_orchestrator: ComparisonOrchestrator::new(registry, call_timeout),
            config,
        })
    }
}

/// Build the public router: food search plus health endpoints.
pub fn public_router(state: Arc<AppState>) -> Router {
    let request_timeout = Duration::from_secs(state.config.request_timeout_secs);
    Router::new()
        .merge(FoodRoutes::routes(Arc::clone(&state)))
        .merge(HealthRoutes::routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(request_timeout))
}

/// Build the development router, mountable alongside the public one.
pub fn dev_router(state: Arc<AppState>) -> Router {
    DevRoutes::routes(state).layer(TraceLayer::new_for_http())
}

/// Serve the public and dev routers until shutdown.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let app = public_router(Arc::clone(&state)).merge(dev_router(Arc::clone(&state)));

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;

    info!("HTTP server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {e}");
    }
    info!("Shutdown signal received, draining connections");
}
