//! Milestones domain state

use std::sync::Arc;

use worklane_attachments::AttachmentStore;

use crate::MilestonesRepositories;

/// Application state for the Milestones domain
#[derive(Clone)]
pub struct MilestonesState {
    pub repos: MilestonesRepositories,
    pub attachments: Arc<dyn AttachmentStore>,
}
