//! Domain entities for the Milestones domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worklane_common::{Error, Result, StateError};

use crate::domain::state::{MilestoneEvent, MilestoneState, MilestoneStateMachine};

/// Milestone status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "milestone_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    #[default]
    Pending,
    Completed,
}

impl MilestoneStatus {
    /// Check if status is terminal
    pub fn is_terminal(&self) -> bool {
        self.to_state().is_terminal()
    }

    /// Convert to state machine state
    pub fn to_state(&self) -> MilestoneState {
        match self {
            MilestoneStatus::Pending => MilestoneState::Pending,
            MilestoneStatus::Completed => MilestoneState::Completed,
        }
    }

    /// Create from state machine state
    pub fn from_state(state: MilestoneState) -> Self {
        match state {
            MilestoneState::Pending => MilestoneStatus::Pending,
            MilestoneState::Completed => MilestoneStatus::Completed,
        }
    }
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_state())
    }
}

/// Attached artifact metadata: display name plus the attachment-store locator.
///
/// The two fields are stored as separate nullable columns but only travel
/// together: constructing this type is the only way to set them, so a
/// half-set state cannot be produced from the domain API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub file_name: String,
    pub locator: String,
}

/// Milestone entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Milestone {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub description: String,
    pub status: MilestoneStatus,
    pub file_name: Option<String>,
    pub file_locator: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Milestone {
    /// Create a new milestone with validation
    pub fn new(contract_id: Uuid, description: String) -> Result<Self> {
        if description.trim().is_empty() {
            return Err(Error::Validation(
                "Milestone description is required".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Milestone {
            id: Uuid::new_v4(),
            contract_id,
            description,
            status: MilestoneStatus::default(),
            file_name: None,
            file_locator: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// The attached artifact, if any.
    ///
    /// A row with only one of the two fields set violates the pairing
    /// invariant and is treated as unattached; `validate` flags it.
    pub fn attachment(&self) -> Option<AttachmentRef> {
        match (&self.file_name, &self.file_locator) {
            (Some(name), Some(locator)) => Some(AttachmentRef {
                file_name: name.clone(),
                locator: locator.clone(),
            }),
            _ => None,
        }
    }

    /// Attach an artifact, replacing any existing attachment metadata
    pub fn set_attachment(&mut self, attachment: AttachmentRef) {
        self.file_name = Some(attachment.file_name);
        self.file_locator = Some(attachment.locator);
        self.updated_at = Utc::now();
    }

    /// Remove the attachment metadata. Idempotent; the milestone itself is
    /// untouched.
    pub fn clear_attachment(&mut self) {
        self.file_name = None;
        self.file_locator = None;
        self.updated_at = Utc::now();
    }

    /// Check pairing invariant on the attachment fields
    pub fn validate(&self) -> Result<()> {
        if self.file_name.is_some() != self.file_locator.is_some() {
            return Err(Error::Validation(
                "Attachment name and locator must be set together".to_string(),
            ));
        }
        Ok(())
    }

    /// Mark the milestone as completed
    pub fn complete(&mut self) -> Result<()> {
        let current_state = self.status.to_state();
        let new_state = MilestoneStateMachine::transition(current_state, MilestoneEvent::Complete)
            .map_err(|e| match e {
                StateError::TerminalState(state) => Error::Conflict(format!(
                    "Milestone is in terminal state '{}' and cannot transition",
                    state
                )),
                StateError::InvalidTransition { from, event, .. } => Error::Conflict(format!(
                    "Invalid milestone transition: cannot apply '{}' event from '{}' state",
                    event, from
                )),
                StateError::GuardFailed(msg) => Error::Conflict(msg),
            })?;
        self.status = MilestoneStatus::from_state(new_state);
        self.updated_at = Utc::now();
        Ok(())
    }
}
