//! Role and error types for the identity directory

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marketplace role attached to an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Freelancer,
    Admin,
}

impl Role {
    /// Whether this role may submit proposals against projects
    pub fn can_submit_proposals(&self) -> bool {
        matches!(self, Role::Freelancer)
    }

    /// Whether this role may post projects
    pub fn can_post_projects(&self) -> bool {
        matches!(self, Role::Client | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Client => write!(f, "client"),
            Role::Freelancer => write!(f, "freelancer"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Errors surfaced by identity lookups
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Identity not found: {0}")]
    UnknownIdentity(Uuid),

    #[error("Failed to load identity: {0}")]
    Load(#[from] sqlx::Error),
}

impl From<IdentityError> for worklane_common::Error {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::UnknownIdentity(id) => {
                worklane_common::Error::NotFound(format!("Identity not found: {}", id))
            }
            IdentityError::Load(e) => worklane_common::Error::Database(e),
        }
    }
}
