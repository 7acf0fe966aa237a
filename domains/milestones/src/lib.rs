//! Milestones domain: delivery checkpoints under contracts

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::state::{MilestoneEvent, MilestoneState, MilestoneStateMachine};

// Re-export repository types
pub use repository::{MilestoneRepository, MilestonesRepositories};

// Re-export API types
pub use api::routes;
pub use api::MilestonesState;
