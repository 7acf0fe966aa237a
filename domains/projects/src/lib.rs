//! Projects domain: postings, budgets, status lifecycle

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::state::{ProjectEvent, ProjectState, ProjectStateMachine};

// Re-export repository types
pub use repository::{ProjectRepository, ProjectsRepositories};

// Re-export API types
pub use api::routes;
pub use api::ProjectsState;
