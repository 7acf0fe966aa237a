//! Projects domain state

use crate::ProjectsRepositories;

/// Application state for the Projects domain
#[derive(Clone)]
pub struct ProjectsState {
    pub repos: ProjectsRepositories,
}
