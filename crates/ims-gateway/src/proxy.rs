//! Reverse-proxy forwarding to backend services.

use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    response::Response,
};
use tracing::{debug, instrument};

use crate::error::GatewayError;

/// Upper bound on a buffered request or response body.
///
/// Bodies are forwarded as opaque byte sequences, never streamed, so this
/// must leave room for medical image uploads.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Request headers that carry connection management, not payload. Sending
/// them upstream confuses the backend's own connection handling.
fn is_stripped_request_header(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "host" | "connection" | "content-length"
    )
}

/// Response headers that describe transport framing of the upstream hop.
/// Relaying them verbatim causes double-encoding/framing bugs because this
/// hop re-frames the body itself.
fn is_stripped_response_header(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "content-encoding" | "transfer-encoding" | "content-length"
    )
}

/// Maps an outbound call failure to its gateway status. The client-level
/// deadline covers the whole exchange, so a timeout can surface either from
/// `send()` or later while reading the response body; both are 504.
fn upstream_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::Unavailable
    } else {
        GatewayError::internal(e.to_string())
    }
}

/// Forwards requests to backend services over a shared HTTP client.
///
/// Each forward is at-most-once with a single fixed deadline covering the
/// whole outbound call. Connections come from the client's pool; no
/// cross-request lock is held while a call is in flight.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http_client: reqwest::Client,
}

impl ProxyClient {
    /// Creates a proxy client with the given per-request deadline.
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http_client })
    }

    /// Reproduces `request` against `upstream` and relays the response.
    ///
    /// Method, query string, and body bytes are forwarded verbatim. Timeout
    /// maps to 504, connection failure to 503, anything else to 500.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %forward_path))]
    pub async fn forward(
        &self,
        upstream: &str,
        forward_path: &str,
        request: Request<Body>,
    ) -> Result<Response, GatewayError> {
        let (parts, body) = request.into_parts();

        let mut target = format!("{upstream}{forward_path}");
        if let Some(query) = parts.uri.query() {
            target.push('?');
            target.push_str(query);
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &parts.headers {
            if is_stripped_request_header(name.as_str()) {
                debug!(header = %name, "Stripping request header");
                continue;
            }
            headers.append(name.clone(), value.clone());
        }

        let body_bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|e| GatewayError::internal(format!("failed to read request body: {e}")))?;

        let upstream_response = self
            .http_client
            .request(parts.method, &target)
            .headers(headers)
            .body(body_bytes.to_vec())
            .send()
            .await
            .map_err(upstream_error)?;

        let status = upstream_response.status();
        debug!(status = %status, target = %target, "Upstream responded");

        let mut builder = Response::builder().status(status);
        for (name, value) in upstream_response.headers() {
            if is_stripped_response_header(name.as_str()) {
                debug!(header = %name, "Stripping response header");
                continue;
            }
            builder = builder.header(name, value);
        }

        let response_body = upstream_response.bytes().await.map_err(upstream_error)?;

        builder
            .body(Body::from(response_body))
            .map_err(|e| GatewayError::internal(format!("failed to build response: {e}")))
    }
}
