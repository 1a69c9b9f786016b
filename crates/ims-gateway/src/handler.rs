//! Request handlers: local liveness endpoints and the routed fallback.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::Request,
    response::Response,
};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::GatewayError;
use crate::server::AppState;

/// `GET /` — gateway status, served locally and never proxied.
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let routes: Vec<&str> = state.routes.prefixes().collect();
    Json(json!({
        "service": "api-gateway",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "routes": routes,
    }))
}

/// `GET /health` — liveness check, served locally and never proxied.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "api-gateway",
    }))
}

/// Fallback handler: resolve the path against the routing table and forward
/// to the selected backend. Authorization is the backend's job.
pub async fn dispatch(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, GatewayError> {
    let path = request.uri().path().to_string();

    let Some(target) = state.routes.resolve(&path) else {
        debug!(path = %path, "No route matched");
        return Err(GatewayError::route_not_found(path));
    };

    let upstream = target.upstream.to_string();
    let forward_path = target.forward_path;
    state.proxy.forward(&upstream, &forward_path, request).await
}
