//! HTTP delivery of workflow events.

use std::time::Duration;

use crate::error::NotifyError;
use crate::types::{EntityType, WorkflowEvent};

/// Path of the workflow log endpoint behind the gateway.
const WORKFLOW_LOGS_PATH: &str = "/api/v1/workflow/logs";

/// Fire-and-forget notifier that records workflow events via the gateway.
///
/// [`WorkflowNotifier::notify`] spawns a detached task and returns
/// immediately, so a notification that already started cannot be cancelled
/// by the request that triggered it, and no failure ever reaches the
/// caller. Use [`WorkflowNotifier::deliver`] directly when the outcome
/// matters (tests do).
#[derive(Debug, Clone)]
pub struct WorkflowNotifier {
    http_client: reqwest::Client,
    endpoint: String,
}

impl WorkflowNotifier {
    /// Creates a notifier that posts to `<gateway_url>/api/v1/workflow/logs`.
    pub fn new(gateway_url: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let base = url::Url::parse(gateway_url)
            .map_err(|e| NotifyError::invalid_config(format!("invalid gateway URL: {e}")))?;
        let endpoint = format!(
            "{}{}",
            base.as_str().trim_end_matches('/'),
            WORKFLOW_LOGS_PATH
        );
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::invalid_config(e.to_string()))?;
        Ok(Self {
            http_client,
            endpoint,
        })
    }

    /// Records that an authorized action occurred. Never blocks, never fails.
    pub fn notify(
        &self,
        user_id: &str,
        action: &str,
        entity_type: EntityType,
        relevant_id: Option<&str>,
    ) {
        let event = WorkflowEvent::new(
            user_id,
            action,
            entity_type,
            relevant_id.map(ToString::to_string),
        );
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.deliver(&event).await {
                tracing::warn!(
                    error = %e,
                    user_id = %event.user_id,
                    action = %event.action,
                    "Workflow notification dropped"
                );
            }
        });
    }

    /// Performs one delivery attempt. 200 and 201 count as success.
    pub async fn deliver(&self, event: &WorkflowEvent) -> Result<(), NotifyError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(event)
            .send()
            .await
            .map_err(|e| NotifyError::send_failed(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 200 || status.as_u16() == 201 {
            tracing::debug!(action = %event.action, "Workflow event recorded");
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                status: status.as_u16(),
            })
        }
    }

    /// Returns the fully qualified endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn notifier_for(server: &MockServer) -> WorkflowNotifier {
        WorkflowNotifier::new(&server.uri(), Duration::from_secs(1)).expect("notifier")
    }

    #[test]
    fn endpoint_handles_trailing_slash() {
        let n = WorkflowNotifier::new("http://gateway:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(n.endpoint(), "http://gateway:8000/api/v1/workflow/logs");
    }

    #[test]
    fn rejects_invalid_gateway_url() {
        let err = WorkflowNotifier::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, NotifyError::InvalidConfig { .. }));
    }

    #[tokio::test]
    async fn deliver_succeeds_on_201() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/workflow/logs"))
            .and(body_partial_json(serde_json::json!({
                "user_id": "USR-000001",
                "action": "User Login",
                "entity_type": "USER"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let event = WorkflowEvent::new(
            "USR-000001",
            "User Login",
            EntityType::User,
            Some("USR-000001".to_string()),
        );
        notifier_for(&server).deliver(&event).await.expect("201 ok");
    }

    #[tokio::test]
    async fn deliver_reports_rejection_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let event = WorkflowEvent::new("USR-000001", "Upload Image", EntityType::Image, None);
        let err = notifier_for(&server).deliver(&event).await.unwrap_err();
        assert!(matches!(err, NotifyError::Rejected { status: 500 }));
    }

    #[tokio::test]
    async fn deliver_reports_connection_failure() {
        // Bind a port, then drop the listener so connections are refused.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier =
            WorkflowNotifier::new(&format!("http://{addr}"), Duration::from_millis(500)).unwrap();
        let event = WorkflowEvent::new("USR-000001", "Upload Image", EntityType::Image, None);
        let err = notifier.deliver(&event).await.unwrap_err();
        assert!(matches!(err, NotifyError::SendFailed { .. }));
    }

    #[tokio::test]
    async fn notify_swallows_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = notifier_for(&server);
        notifier.notify("USR-000001", "Delete Bill", EntityType::Bill, None);

        // Give the detached task time to run; the call above must not panic
        // or surface the 500.
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
}
