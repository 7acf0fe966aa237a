//! Engagements domain: proposal ledger, contracts, lifecycle coordination
//!
//! The coordinator in this crate owns the one multi-entity transition in the
//! system: accepting a proposal atomically flips the proposal, creates the
//! contract and moves the owning project to in-progress.

pub mod coordinator;
pub mod domain;
pub mod repository;

pub mod api;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::state::{
    ContractEvent, ContractState, ContractStateMachine, ProposalEvent, ProposalState,
    ProposalStateMachine,
};

// Re-export repository types
pub use repository::{
    create_contract_tx, mark_project_in_progress_tx, mark_proposal_accepted_tx,
    ContractRepository, EngagementsRepositories, ProposalRepository,
};

// Re-export API types
pub use api::routes;
pub use api::EngagementsState;
