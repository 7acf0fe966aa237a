//! State machine for Milestone status

use worklane_common::StateError;

/// Milestone status states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MilestoneState {
    Pending,
    Completed,
}

impl MilestoneState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [MilestoneState] {
        match self {
            Self::Pending => &[Self::Completed],
            Self::Completed => &[],
        }
    }
}

impl std::fmt::Display for MilestoneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Events that trigger milestone state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum MilestoneEvent {
    /// Checkpoint delivered and signed off
    Complete,
}

impl std::fmt::Display for MilestoneEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Milestone state machine
pub struct MilestoneStateMachine;

impl MilestoneStateMachine {
    /// Attempt a state transition
    pub fn transition(
        current: MilestoneState,
        event: MilestoneEvent,
    ) -> Result<MilestoneState, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (MilestoneState::Pending, MilestoneEvent::Complete) => MilestoneState::Completed,

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    to: "unknown".to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: MilestoneState, event: &MilestoneEvent) -> bool {
        Self::transition(current, event.clone()).is_ok()
    }
}
