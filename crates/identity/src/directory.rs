//! Identity directory trait and Postgres-backed read model
//!
//! Uses runtime `sqlx::query_as` (not macros) consistent with the
//! cross-domain read pattern used by the domain repositories.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::types::{IdentityError, Role};

/// Resolves identities to roles.
///
/// Domain states hold this as `Arc<dyn IdentityDirectory>` so handlers and
/// the proposal ledger can authorize operations without knowing where
/// identity data lives.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Resolve an identity to its role.
    ///
    /// Returns [`IdentityError::UnknownIdentity`] when no such identity exists.
    async fn resolve_role(&self, identity: Uuid) -> Result<Role, IdentityError>;
}

/// Postgres-backed identity directory.
///
/// A lightweight read model over the `users` table; this crate never writes it.
#[derive(Clone)]
pub struct PgIdentityDirectory {
    pool: PgPool,
}

impl PgIdentityDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityDirectory for PgIdentityDirectory {
    async fn resolve_role(&self, identity: Uuid) -> Result<Role, IdentityError> {
        let role: Option<Role> =
            sqlx::query_scalar(r#"SELECT role FROM users WHERE id = $1"#)
                .bind(identity)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, identity = %identity, "Failed to resolve role");
                    IdentityError::Load(e)
                })?;

        role.ok_or(IdentityError::UnknownIdentity(identity))
    }
}
