//! API layer for the Engagements domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::EngagementsState;
pub use routes::routes;
