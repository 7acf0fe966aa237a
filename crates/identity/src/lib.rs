//! Worklane Identity Directory
//!
//! Resolves an identity to its marketplace role (client, freelancer, admin).
//! The rest of the system consumes this through the [`IdentityDirectory`]
//! trait and never mutates identity data; credential issuance and validation
//! live outside this codebase entirely.
//!
//! Two implementations are provided:
//! - [`PgIdentityDirectory`]: read model over the `users` table
//! - [`MockIdentityDirectory`]: in-memory map for tests and development

pub mod directory;
pub mod mock;
pub mod types;

pub use directory::{IdentityDirectory, PgIdentityDirectory};
pub use mock::MockIdentityDirectory;
pub use types::{IdentityError, Role};
