//! Gateway application state, router assembly, and server lifecycle.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
    routing::get,
};
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use ims_config::GatewayConfig;

use crate::error::GatewayError;
use crate::handler;
use crate::proxy::ProxyClient;
use crate::routes::RoutingTable;

/// Shared application state.
///
/// The routing table is the only state shared between concurrent requests,
/// and it is immutable; the proxy client clones cheaply around its pooled
/// connections.
#[derive(Clone)]
pub struct AppState {
    /// Immutable routing table built at startup.
    pub routes: Arc<RoutingTable>,
    /// Reverse-proxy forwarder.
    pub proxy: ProxyClient,
}

impl AppState {
    /// Builds application state from configuration.
    pub fn from_config(cfg: &GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            routes: Arc::new(RoutingTable::new(cfg.routes.clone())),
            proxy: ProxyClient::new(cfg.proxy.timeout)?,
        })
    }
}

/// Assembles the gateway router: two local endpoints, CORS for browser
/// clients, and the routed fallback for everything else.
pub fn build_router(state: AppState, cfg: &GatewayConfig) -> Router {
    // Validation already rejected malformed origins; anything that still
    // fails header encoding is skipped loudly rather than vanishing.
    let mut origins: Vec<HeaderValue> = Vec::with_capacity(cfg.cors.origins.len());
    for origin in &cfg.cors.origins {
        match origin.parse() {
            Ok(value) => origins.push(value),
            Err(_) => tracing::warn!(origin = %origin, "Skipping unparseable CORS origin"),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([HeaderName::from_static("x-auth-token")])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/", get(handler::root))
        .route("/health", get(handler::health))
        .fallback(handler::dispatch)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The gateway HTTP server.
pub struct Server {
    router: Router,
    bind_addr: String,
}

impl Server {
    /// Builds the server from configuration.
    pub fn from_config(cfg: &GatewayConfig) -> Result<Self, GatewayError> {
        let state = AppState::from_config(cfg)?;
        Ok(Self {
            router: build_router(state, cfg),
            bind_addr: cfg.server.bind_addr(),
        })
    }

    /// Binds the listener and serves until ctrl-c.
    pub async fn run(self) -> Result<(), GatewayError> {
        let listener = tokio::net::TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|e| {
                GatewayError::internal(format!("failed to bind {}: {e}", self.bind_addr))
            })?;

        info!(addr = %self.bind_addr, "Gateway listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| GatewayError::internal(format!("server error: {e}")))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to install ctrl-c handler");
        return;
    }
    info!("Shutdown signal received");
}
