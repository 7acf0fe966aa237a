//! Domain entities for the Projects domain

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worklane_common::{Error, Result, StateError};

use crate::domain::state::{ProjectEvent, ProjectState, ProjectStateMachine};

/// Minimum budget boundary for either end of the range
pub const MIN_BUDGET: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Minimum title length
pub const MIN_TITLE_LEN: usize = 5;

/// Project status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl ProjectStatus {
    /// Check if status is terminal
    pub fn is_terminal(&self) -> bool {
        self.to_state().is_terminal()
    }

    /// Convert to state machine state
    pub fn to_state(&self) -> ProjectState {
        match self {
            ProjectStatus::Open => ProjectState::Open,
            ProjectStatus::InProgress => ProjectState::InProgress,
            ProjectStatus::Closed => ProjectState::Closed,
        }
    }

    /// Create from state machine state
    pub fn from_state(state: ProjectState) -> Self {
        match state {
            ProjectState::Open => ProjectStatus::Open,
            ProjectState::InProgress => ProjectStatus::InProgress,
            ProjectState::Closed => ProjectStatus::Closed,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_state())
    }
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub description: String,
    pub min_budget: Decimal,
    pub max_budget: Decimal,
    pub deadline: NaiveDate,
    pub skills: Vec<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project with validation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client_id: Uuid,
        title: String,
        description: String,
        min_budget: Decimal,
        max_budget: Decimal,
        deadline: NaiveDate,
        skills: Vec<String>,
    ) -> Result<Self> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            client_id,
            title,
            description,
            min_budget,
            max_budget,
            deadline,
            skills,
            status: ProjectStatus::default(),
            created_at: now,
            updated_at: now,
        };
        project.validate()?;

        if project.deadline <= now.date_naive() {
            return Err(Error::Validation(
                "Deadline must be in the future".to_string(),
            ));
        }

        Ok(project)
    }

    /// Validate field invariants.
    ///
    /// The deadline-in-the-future rule applies only at creation time and is
    /// checked in `new`; an existing project keeps its deadline once it has
    /// passed.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().len() < MIN_TITLE_LEN {
            return Err(Error::Validation(format!(
                "Title must be at least {} characters",
                MIN_TITLE_LEN
            )));
        }

        if self.description.trim().is_empty() {
            return Err(Error::Validation("Description is required".to_string()));
        }

        if self.min_budget < MIN_BUDGET || self.max_budget < MIN_BUDGET {
            return Err(Error::Validation(format!(
                "Budget bounds must be at least {}",
                MIN_BUDGET
            )));
        }

        if self.min_budget > self.max_budget {
            return Err(Error::Validation(
                "Minimum budget cannot exceed maximum budget".to_string(),
            ));
        }

        if self.skills.is_empty() || self.skills.iter().any(|s| s.trim().is_empty()) {
            return Err(Error::Validation(
                "At least one non-empty skill is required".to_string(),
            ));
        }

        Ok(())
    }

    /// Mark the project as in progress after a proposal acceptance.
    ///
    /// Idempotent: an already in-progress project stays in progress.
    pub fn begin_work(&mut self) -> Result<()> {
        let new_state = self.apply_transition(ProjectEvent::ProposalAccepted)?;
        self.status = ProjectStatus::from_state(new_state);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Explicitly close the project
    pub fn close(&mut self) -> Result<()> {
        let new_state = self.apply_transition(ProjectEvent::Close)?;
        self.status = ProjectStatus::from_state(new_state);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Apply a state transition using the state machine
    fn apply_transition(&self, event: ProjectEvent) -> Result<ProjectState> {
        let current_state = self.status.to_state();
        ProjectStateMachine::transition(current_state, event).map_err(|e| match e {
            StateError::InvalidTransition { from, event, .. } => Error::Conflict(format!(
                "Invalid project transition: cannot apply '{}' event from '{}' state",
                event, from
            )),
            StateError::TerminalState(state) => Error::Conflict(format!(
                "Project is in terminal state '{}' and cannot transition",
                state
            )),
            StateError::GuardFailed(msg) => Error::Conflict(msg),
        })
    }
}
