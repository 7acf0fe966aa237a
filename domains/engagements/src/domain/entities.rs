//! Domain entities for the Engagements domain
//!
//! Proposals are freelancer bids against projects; contracts are the binding
//! agreements produced when a bid is accepted. A contract always references
//! exactly one proposal, and a proposal owns at most one contract, ever;
//! the database enforces that with a unique constraint.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worklane_common::{Error, Result, StateError};

use crate::domain::state::{
    ContractEvent, ContractState, ContractStateMachine, ProposalEvent, ProposalState,
    ProposalStateMachine,
};

/// Minimum bid amount
pub const MIN_BID: Decimal = Decimal::from_parts(1, 0, 0, false, 0);

/// Proposal status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "proposal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    /// Check if status is terminal (the decision has been made)
    pub fn is_terminal(&self) -> bool {
        self.to_state().is_terminal()
    }

    /// Convert to state machine state
    pub fn to_state(&self) -> ProposalState {
        match self {
            ProposalStatus::Pending => ProposalState::Pending,
            ProposalStatus::Accepted => ProposalState::Accepted,
            ProposalStatus::Rejected => ProposalState::Rejected,
        }
    }

    /// Create from state machine state
    pub fn from_state(state: ProposalState) -> Self {
        match state {
            ProposalState::Pending => ProposalStatus::Pending,
            ProposalState::Accepted => ProposalStatus::Accepted,
            ProposalState::Rejected => ProposalStatus::Rejected,
        }
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_state())
    }
}

/// Contract status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "contract_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    #[default]
    Pending,
    Completed,
}

impl ContractStatus {
    /// Check if status is terminal
    pub fn is_terminal(&self) -> bool {
        self.to_state().is_terminal()
    }

    /// Convert to state machine state
    pub fn to_state(&self) -> ContractState {
        match self {
            ContractStatus::Pending => ContractState::Pending,
            ContractStatus::Completed => ContractState::Completed,
        }
    }

    /// Create from state machine state
    pub fn from_state(state: ContractState) -> Self {
        match state {
            ContractState::Pending => ContractStatus::Pending,
            ContractState::Completed => ContractStatus::Completed,
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_state())
    }
}

/// Proposal entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Proposal {
    pub id: Uuid,
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
    pub bid_amount: Decimal,
    pub cover_letter: String,
    pub estimated_days: i32,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Proposal {
    /// Create a new proposal with validation
    pub fn new(
        project_id: Uuid,
        freelancer_id: Uuid,
        bid_amount: Decimal,
        cover_letter: String,
        estimated_days: i32,
    ) -> Result<Self> {
        if bid_amount < MIN_BID {
            return Err(Error::Validation("Bid amount must be positive".to_string()));
        }

        if cover_letter.trim().is_empty() {
            return Err(Error::Validation("Proposal text is required".to_string()));
        }

        if estimated_days < 1 {
            return Err(Error::Validation(
                "Estimated days must be positive".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Proposal {
            id: Uuid::new_v4(),
            project_id,
            freelancer_id,
            bid_amount,
            cover_letter,
            estimated_days,
            status: ProposalStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Check if the decision on this proposal has been made
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Change the bid amount; only pending proposals may be re-bid
    pub fn update_bid(&mut self, bid_amount: Decimal) -> Result<()> {
        if self.status != ProposalStatus::Pending {
            return Err(Error::Conflict(format!(
                "Bid cannot change once the proposal is {}",
                self.status
            )));
        }
        if bid_amount < MIN_BID {
            return Err(Error::Validation("Bid amount must be positive".to_string()));
        }
        self.bid_amount = bid_amount;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Accept this proposal
    pub fn accept(&mut self) -> Result<()> {
        let new_state = self.apply_transition(ProposalEvent::Accept)?;
        self.status = ProposalStatus::from_state(new_state);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reject this proposal
    pub fn reject(&mut self) -> Result<()> {
        let new_state = self.apply_transition(ProposalEvent::Reject)?;
        self.status = ProposalStatus::from_state(new_state);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Apply a state transition using the state machine
    fn apply_transition(&self, event: ProposalEvent) -> Result<ProposalState> {
        let current_state = self.status.to_state();
        ProposalStateMachine::transition(current_state, event).map_err(map_state_error("Proposal"))
    }
}

/// Contract entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub proposal_id: Uuid,
    pub description: String,
    pub status: ContractStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    /// Create a new contract with validation
    pub fn new(proposal_id: Uuid, description: String) -> Result<Self> {
        if description.trim().is_empty() {
            return Err(Error::Validation(
                "Contract description is required".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Contract {
            id: Uuid::new_v4(),
            proposal_id,
            description,
            status: ContractStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Check if the contract has been completed
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Mark the contract as completed
    pub fn complete(&mut self) -> Result<()> {
        let current_state = self.status.to_state();
        let new_state = ContractStateMachine::transition(current_state, ContractEvent::Complete)
            .map_err(map_state_error("Contract"))?;
        self.status = ContractStatus::from_state(new_state);
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Terminal-state and invalid-transition violations surface as conflicts:
/// the caller is fighting an invariant, not sending malformed input.
fn map_state_error(entity: &'static str) -> impl Fn(StateError) -> Error {
    move |e| match e {
        StateError::InvalidTransition { from, event, .. } => Error::Conflict(format!(
            "Invalid {} transition: cannot apply '{}' event from '{}' state",
            entity.to_lowercase(),
            event,
            from
        )),
        StateError::TerminalState(state) => Error::Conflict(format!(
            "{} is in terminal state '{}' and cannot transition",
            entity, state
        )),
        StateError::GuardFailed(msg) => Error::Conflict(msg),
    }
}
