//! Milestone management API handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use worklane_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::middleware::MilestonesState;
use crate::domain::entities::{AttachmentRef, Milestone, MilestoneStatus};

/// Milestone response DTO
#[derive(Debug, Serialize)]
pub struct MilestoneResponse {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub description: String,
    pub status: MilestoneStatus,
    pub file_name: Option<String>,
    pub file_locator: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Milestone> for MilestoneResponse {
    fn from(m: Milestone) -> Self {
        Self {
            id: m.id,
            contract_id: m.contract_id,
            description: m.description,
            status: m.status,
            file_name: m.file_name,
            file_locator: m.file_locator,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Request for creating a milestone
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMilestoneRequest {
    pub contract_id: Uuid,

    #[validate(length(min = 1))]
    pub description: String,
}

/// Request for editing a milestone; absent fields are left unchanged.
/// An unrecognised status token dies in deserialization with a 400.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMilestoneRequest {
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub status: Option<MilestoneStatus>,
}

/// Create a milestone under a contract
pub async fn create_milestone(
    State(state): State<MilestonesState>,
    ValidatedJson(req): ValidatedJson<CreateMilestoneRequest>,
) -> Result<(StatusCode, Json<MilestoneResponse>)> {
    if !state
        .repos
        .milestones
        .contract_exists(req.contract_id)
        .await?
    {
        return Err(Error::NotFound("Contract not found".to_string()));
    }

    let milestone = Milestone::new(req.contract_id, req.description)?;
    let created = state.repos.milestones.create(&milestone).await?;
    tracing::info!(milestone_id = %created.id, contract_id = %created.contract_id, "Milestone created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List all milestones
pub async fn list_milestones(
    State(state): State<MilestonesState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<MilestoneResponse>>> {
    let milestones = state
        .repos
        .milestones
        .list(pagination.limit(), pagination.offset())
        .await?;
    Ok(Json(milestones.into_iter().map(Into::into).collect()))
}

/// Get a single milestone by ID
pub async fn get_milestone(
    State(state): State<MilestonesState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MilestoneResponse>> {
    let milestone = state
        .repos
        .milestones
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Milestone not found".to_string()))?;
    Ok(Json(milestone.into()))
}

/// List milestones under a contract
pub async fn list_milestones_by_contract(
    State(state): State<MilestonesState>,
    Path(contract_id): Path<Uuid>,
) -> Result<Json<Vec<MilestoneResponse>>> {
    let milestones = state.repos.milestones.list_by_contract(contract_id).await?;
    Ok(Json(milestones.into_iter().map(Into::into).collect()))
}

/// List milestones under a project
pub async fn list_milestones_by_project(
    State(state): State<MilestonesState>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<MilestoneResponse>>> {
    let milestones = state.repos.milestones.list_by_project(project_id).await?;
    Ok(Json(milestones.into_iter().map(Into::into).collect()))
}

/// Edit a milestone's description and/or status
pub async fn update_milestone(
    State(state): State<MilestonesState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateMilestoneRequest>,
) -> Result<Json<MilestoneResponse>> {
    let mut milestone = state
        .repos
        .milestones
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Milestone not found".to_string()))?;

    if let Some(description) = req.description {
        milestone.description = description;
    }

    if let Some(status) = req.status {
        // Setting the current status again is a no-op, not a conflict
        if status != milestone.status {
            match status {
                MilestoneStatus::Completed => milestone.complete()?,
                MilestoneStatus::Pending => {
                    return Err(Error::Conflict(
                        "Completed milestones cannot return to pending".to_string(),
                    ))
                }
            }
        }
    }

    let updated = state.repos.milestones.update(&milestone).await?;
    Ok(Json(updated.into()))
}

/// Upload an attachment for a milestone.
///
/// Multipart body with a single `file` part; the bytes go to the attachment
/// store and the milestone records the (name, locator) pair. Re-uploading
/// replaces the previous attachment and deletes its stored bytes.
pub async fn upload_attachment(
    State(state): State<MilestonesState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<MilestoneResponse>> {
    let mut milestone = state
        .repos
        .milestones
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Milestone not found".to_string()))?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Invalid multipart body: {}", e)))?
        .ok_or_else(|| Error::Validation("Multipart body must contain a file".to_string()))?;

    let file_name = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| Error::Validation("File part must carry a filename".to_string()))?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| Error::Validation(format!("Failed to read file bytes: {}", e)))?;

    let locator = state
        .attachments
        .store(&file_name, &bytes)
        .await
        .map_err(|e| Error::Internal(format!("Failed to store attachment: {}", e)))?;

    // Replacing an attachment: drop the previous bytes, best effort
    if let Some(previous) = milestone.attachment() {
        if let Err(e) = state.attachments.delete(&previous.locator).await {
            tracing::warn!(
                error = %e,
                locator = %previous.locator,
                "Failed to delete replaced attachment bytes"
            );
        }
    }

    milestone.set_attachment(AttachmentRef {
        file_name,
        locator,
    });

    let updated = state.repos.milestones.update(&milestone).await?;
    tracing::info!(milestone_id = %updated.id, "Attachment uploaded");
    Ok(Json(updated.into()))
}

/// Remove a milestone's attachment.
///
/// Clears both attachment fields; the milestone itself is untouched.
/// Idempotent — clearing an already-cleared attachment is a no-op success.
pub async fn clear_attachment(
    State(state): State<MilestonesState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MilestoneResponse>> {
    let milestone = state
        .repos
        .milestones
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Milestone not found".to_string()))?;

    // Drop the stored bytes, best effort; the metadata clear below is what
    // must succeed.
    if let Some(attachment) = milestone.attachment() {
        if let Err(e) = state.attachments.delete(&attachment.locator).await {
            tracing::warn!(
                error = %e,
                locator = %attachment.locator,
                "Failed to delete attachment bytes"
            );
        }
    }

    let cleared = state
        .repos
        .milestones
        .clear_attachment(id)
        .await?
        .ok_or_else(|| Error::NotFound("Milestone not found".to_string()))?;

    Ok(Json(cleared.into()))
}

/// Delete a milestone
pub async fn delete_milestone(
    State(state): State<MilestonesState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let milestone = state
        .repos
        .milestones
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Milestone not found".to_string()))?;

    if let Some(attachment) = milestone.attachment() {
        if let Err(e) = state.attachments.delete(&attachment.locator).await {
            tracing::warn!(
                error = %e,
                locator = %attachment.locator,
                "Failed to delete attachment bytes"
            );
        }
    }

    state.repos.milestones.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
