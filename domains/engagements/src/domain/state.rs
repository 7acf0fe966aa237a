//! State machines for Engagements domain entities
//!
//! Two machines live here: proposals (pending → accepted | rejected, both
//! terminal) and contracts (pending → completed, terminal). Acceptance and
//! rejection are decisions, not edits; once made they cannot be reversed.

use worklane_common::StateError;

// ============================================================================
// Proposal State Machine
// ============================================================================

/// Proposal status states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalState {
    Pending,
    Accepted,
    Rejected,
}

impl ProposalState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [ProposalState] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Rejected],
            Self::Accepted => &[],
            Self::Rejected => &[],
        }
    }
}

impl std::fmt::Display for ProposalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Events that trigger proposal state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalEvent {
    /// The client accepts the bid; a contract is created alongside
    Accept,
    /// The client turns the bid down
    Reject,
}

impl std::fmt::Display for ProposalEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Proposal state machine
pub struct ProposalStateMachine;

impl ProposalStateMachine {
    /// Attempt a state transition
    ///
    /// Returns the new state if the transition is valid, or an error otherwise.
    pub fn transition(
        current: ProposalState,
        event: ProposalEvent,
    ) -> Result<ProposalState, StateError> {
        // Check for terminal state
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (ProposalState::Pending, ProposalEvent::Accept) => ProposalState::Accepted,
            (ProposalState::Pending, ProposalEvent::Reject) => ProposalState::Rejected,

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
    pub fn can_transition(current: ProposalState, event: &ProposalEvent) -> bool {
        Self::transition(current, event.clone()).is_ok()
    }
}

// ============================================================================
// Contract State Machine
// ============================================================================

/// Contract status states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractState {
    Pending,
    Completed,
}

impl ContractState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [ContractState] {
        match self {
            Self::Pending => &[Self::Completed],
            Self::Completed => &[],
        }
    }
}

impl std::fmt::Display for ContractState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Events that trigger contract state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum ContractEvent {
    /// Delivery finished and signed off
    Complete,
}

impl std::fmt::Display for ContractEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Contract state machine
pub struct ContractStateMachine;

impl ContractStateMachine {
    /// Attempt a state transition
    pub fn transition(
        current: ContractState,
        event: ContractEvent,
    ) -> Result<ContractState, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (ContractState::Pending, ContractEvent::Complete) => ContractState::Completed,

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
    pub fn can_transition(current: ContractState, event: &ContractEvent) -> bool {
        Self::transition(current, event.clone()).is_ok()
    }
}

// ============================================================================
// Tests
// ============================================================================
