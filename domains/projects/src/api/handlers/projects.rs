//! Project management API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use worklane_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::middleware::ProjectsState;
use crate::domain::entities::{Project, ProjectStatus};

/// Project response DTO
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
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

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            client_id: p.client_id,
            title: p.title,
            description: p.description,
            min_budget: p.min_budget,
            max_budget: p.max_budget,
            deadline: p.deadline,
            skills: p.skills,
            status: p.status,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Query parameters for listing projects
#[derive(Debug, Deserialize)]
pub struct ListProjectsParams {
    pub status: Option<ProjectStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request for creating a project
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    pub client_id: Uuid,

    #[validate(length(min = 5, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    pub min_budget: Decimal,
    pub max_budget: Decimal,
    pub deadline: NaiveDate,

    #[validate(length(min = 1))]
    pub skills: Vec<String>,
}

/// Request for editing a project; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 5, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    pub min_budget: Option<Decimal>,
    pub max_budget: Option<Decimal>,
    pub deadline: Option<NaiveDate>,

    #[validate(length(min = 1))]
    pub skills: Option<Vec<String>>,
}

/// Create a new project posting
pub async fn create_project(
    State(state): State<ProjectsState>,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    let project = Project::new(
        req.client_id,
        req.title,
        req.description,
        req.min_budget,
        req.max_budget,
        req.deadline,
        req.skills,
    )?;

    let created = state.repos.projects.create(&project).await?;
    tracing::info!(project_id = %created.id, client_id = %created.client_id, "Project created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List projects with optional status filter
pub async fn list_projects(
    State(state): State<ProjectsState>,
    Query(params): Query<ListProjectsParams>,
) -> Result<Json<Vec<ProjectResponse>>> {
    let limit = params.limit.unwrap_or(50).clamp(1, 100);
    let offset = params.offset.unwrap_or(0).max(0);

    let projects = state
        .repos
        .projects
        .list(params.status.as_ref(), limit, offset)
        .await?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// Get a single project by ID
pub async fn get_project(
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>> {
    let project = state
        .repos
        .projects
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    Ok(Json(project.into()))
}

/// List projects posted by a client
pub async fn list_projects_by_client(
    State(state): State<ProjectsState>,
    Path(client_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ProjectResponse>>> {
    let projects = state
        .repos
        .projects
        .list_by_client(client_id, pagination.limit(), pagination.offset())
        .await?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// Edit a project's posting fields
pub async fn update_project(
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    let mut project = state
        .repos
        .projects
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    if project.status.is_terminal() {
        return Err(Error::Conflict(
            "Closed projects cannot be edited".to_string(),
        ));
    }

    if let Some(title) = req.title {
        project.title = title;
    }
    if let Some(description) = req.description {
        project.description = description;
    }
    if let Some(min_budget) = req.min_budget {
        project.min_budget = min_budget;
    }
    if let Some(max_budget) = req.max_budget {
        project.max_budget = max_budget;
    }
    if let Some(deadline) = req.deadline {
        if deadline <= Utc::now().date_naive() {
            return Err(Error::Validation(
                "Deadline must be in the future".to_string(),
            ));
        }
        project.deadline = deadline;
    }
    if let Some(skills) = req.skills {
        project.skills = skills;
    }

    project.validate()?;

    let updated = state.repos.projects.update(&project).await?;
    Ok(Json(updated.into()))
}

/// Explicitly close a project
pub async fn close_project(
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>> {
    let mut project = state
        .repos
        .projects
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    project.close()?;

    let updated = state.repos.projects.update(&project).await?;
    tracing::info!(project_id = %updated.id, "Project closed");
    Ok(Json(updated.into()))
}

/// Delete a project posting
pub async fn delete_project(
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let proposal_count = state.repos.projects.count_proposals(id).await?;
    if proposal_count > 0 {
        return Err(Error::Conflict(format!(
            "Project has {} proposals and cannot be deleted",
            proposal_count
        )));
    }

    let deleted = state.repos.projects.delete(id).await?;
    if !deleted {
        return Err(Error::NotFound("Project not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
