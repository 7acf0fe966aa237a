//! Engagements domain state

use std::sync::Arc;

use worklane_identity::IdentityDirectory;

use crate::EngagementsRepositories;

/// Application state for the Engagements domain
#[derive(Clone)]
pub struct EngagementsState {
    pub repos: EngagementsRepositories,
    pub identity: Arc<dyn IdentityDirectory>,
}
