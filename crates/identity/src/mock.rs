//! Mock identity directory
//!
//! In-memory role map for tests and local development without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::directory::IdentityDirectory;
use crate::types::{IdentityError, Role};

/// In-memory identity directory.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// register identities after the directory has been handed to the app state.
#[derive(Clone, Default)]
pub struct MockIdentityDirectory {
    roles: Arc<Mutex<HashMap<Uuid, Role>>>,
}

impl MockIdentityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identity with the given role
    pub fn register(&self, identity: Uuid, role: Role) {
        self.roles
            .lock()
            .expect("identity map lock poisoned")
            .insert(identity, role);
    }

    /// Builder-style registration for test setup
    pub fn with_identity(self, identity: Uuid, role: Role) -> Self {
        self.register(identity, role);
        self
    }
}

#[async_trait]
impl IdentityDirectory for MockIdentityDirectory {
    async fn resolve_role(&self, identity: Uuid) -> Result<Role, IdentityError> {
        self.roles
            .lock()
            .expect("identity map lock poisoned")
            .get(&identity)
            .copied()
            .ok_or(IdentityError::UnknownIdentity(identity))
    }
}
