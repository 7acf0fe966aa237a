//! API layer for the Milestones domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::MilestonesState;
pub use routes::routes;
