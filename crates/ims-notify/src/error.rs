//! Notification error types.
//!
//! These errors never propagate into a caller's request lifecycle; they
//! exist so delivery attempts can be tested and logged with a reason.

/// Errors that can occur while delivering a workflow event.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The notifier configuration is invalid.
    #[error("Invalid notifier configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP call failed before a response was received.
    #[error("Failed to send workflow event: {message}")]
    SendFailed {
        /// Description of the transport failure.
        message: String,
    },

    /// The workflow endpoint answered with a non-success status.
    #[error("Workflow endpoint returned status {status}")]
    Rejected {
        /// The HTTP status code returned by the endpoint.
        status: u16,
    },
}

impl NotifyError {
    /// Creates a new `InvalidConfig` error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a new `SendFailed` error.
    #[must_use]
    pub fn send_failed(message: impl Into<String>) -> Self {
        Self::SendFailed {
            message: message.into(),
        }
    }
}
