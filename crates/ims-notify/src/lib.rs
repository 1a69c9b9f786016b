//! Fire-and-forget workflow audit notifications.
//!
//! After a service has already produced its response, it records that an
//! authorized action occurred by posting a workflow event back through the
//! gateway. Delivery is best-effort and at-most-once: every failure is
//! logged and swallowed, and a failed notification is permanently lost.
//! Audit completeness is secondary to request latency here.

pub mod error;
pub mod notifier;
pub mod types;

pub use error::NotifyError;
pub use notifier::WorkflowNotifier;
pub use types::{EntityType, WorkflowEvent};
