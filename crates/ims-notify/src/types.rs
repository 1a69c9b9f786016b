//! Workflow event types.

use serde::{Deserialize, Serialize};

/// Kind of business entity a workflow event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// A user account.
    User,
    /// A patient record.
    Patient,
    /// A diagnostic report.
    Report,
    /// A bill.
    Bill,
    /// A medical test.
    MedicalTest,
    /// A medical image.
    Image,
    /// The action has no associated entity.
    None,
}

impl EntityType {
    /// Returns the wire representation of the entity type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Patient => "PATIENT",
            Self::Report => "REPORT",
            Self::Bill => "BILL",
            Self::MedicalTest => "MEDICAL_TEST",
            Self::Image => "IMAGE",
            Self::None => "NONE",
        }
    }
}

/// A workflow event posted to the workflow service.
///
/// Created asynchronously after the triggering request completed; never
/// updated or deleted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowEvent {
    /// Business identifier of the acting user.
    pub user_id: String,

    /// Human-readable action description, e.g. `"User Login"`.
    pub action: String,

    /// Kind of entity the action touched.
    pub entity_type: EntityType,

    /// Business identifier of the touched entity, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_id: Option<String>,
}

impl WorkflowEvent {
    /// Creates a workflow event.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        action: impl Into<String>,
        entity_type: EntityType,
        relevant_id: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            action: action.into(),
            entity_type,
            relevant_id,
        }
    }
}
