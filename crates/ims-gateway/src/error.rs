//! Gateway error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Errors produced while routing or forwarding a request.
///
/// Forwarding is at-most-once: none of these trigger a retry, the caller
/// must resubmit.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No configured prefix matches the request path.
    #[error("Route not found: {path}")]
    RouteNotFound {
        /// The unmatched request path.
        path: String,
    },

    /// The upstream did not respond within the deadline.
    #[error("Gateway timeout")]
    Timeout,

    /// The upstream is unreachable.
    #[error("Service unavailable")]
    Unavailable,

    /// Any other forwarding or processing fault. The reason is surfaced in
    /// the response body; this is an internal trust boundary, not a public
    /// API.
    #[error("Gateway error: {message}")]
    Internal {
        /// Description of the fault.
        message: String,
    },
}

impl GatewayError {
    /// Creates a new `RouteNotFound` error.
    #[must_use]
    pub fn route_not_found(path: impl Into<String>) -> Self {
        Self::RouteNotFound { path: path.into() }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code this error maps to.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "detail": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn route_not_found_maps_to_404() {
        let response = GatewayError::route_not_found("/api/v1/unknown-thing").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "Route not found: /api/v1/unknown-thing");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            GatewayError::Timeout.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            GatewayError::Unavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GatewayError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
