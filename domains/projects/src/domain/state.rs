//! State machine for Project status
//!
//! A project opens for bidding, moves to in-progress when its first proposal
//! is accepted, and closes only through the explicit close operation. Closing
//! is terminal; there is no path back to open.

use worklane_common::StateError;

/// Project status states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectState {
    Open,
    InProgress,
    Closed,
}

impl ProjectState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [ProjectState] {
        match self {
            // ProposalAccepted keeps an in-progress project in place, so
            // InProgress lists itself as a valid successor.
            Self::Open => &[Self::InProgress, Self::Closed],
            Self::InProgress => &[Self::InProgress, Self::Closed],
            Self::Closed => &[],
        }
    }
}

impl std::fmt::Display for ProjectState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Events that trigger project state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectEvent {
    /// A proposal against this project was accepted
    ProposalAccepted,
    /// The project is explicitly closed
    Close,
}

impl std::fmt::Display for ProjectEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProposalAccepted => write!(f, "proposal_accepted"),
            Self::Close => write!(f, "close"),
        }
    }
}

/// Project state machine
pub struct ProjectStateMachine;

impl ProjectStateMachine {
    /// Attempt a state transition
    ///
    /// Returns the new state if the transition is valid, or an error otherwise.
    pub fn transition(
        current: ProjectState,
        event: ProjectEvent,
    ) -> Result<ProjectState, StateError> {
        // Check for terminal state
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (ProjectState::Open, ProjectEvent::ProposalAccepted) => ProjectState::InProgress,
            // Accepting further proposals on a running project is allowed and
            // leaves the status unchanged.
            (ProjectState::InProgress, ProjectEvent::ProposalAccepted) => ProjectState::InProgress,

            (ProjectState::Open, ProjectEvent::Close) => ProjectState::Closed,
            (ProjectState::InProgress, ProjectEvent::Close) => ProjectState::Closed,

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
    pub fn can_transition(current: ProjectState, event: &ProjectEvent) -> bool {
        Self::transition(current, event.clone()).is_ok()
    }
}
