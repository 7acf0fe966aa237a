//! Proposal management API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use worklane_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::handlers::contracts::ContractResponse;
use crate::api::middleware::EngagementsState;
use crate::coordinator;
use crate::domain::entities::{Proposal, ProposalStatus};

/// Proposal response DTO
#[derive(Debug, Serialize)]
pub struct ProposalResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
    pub bid_amount: Decimal,
    pub cover_letter: String,
    pub estimated_days: i32,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Proposal> for ProposalResponse {
    fn from(p: Proposal) -> Self {
        Self {
            id: p.id,
            project_id: p.project_id,
            freelancer_id: p.freelancer_id,
            bid_amount: p.bid_amount,
            cover_letter: p.cover_letter,
            estimated_days: p.estimated_days,
            status: p.status,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Request for submitting a proposal
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitProposalRequest {
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
    pub bid_amount: Decimal,

    #[validate(length(min = 1))]
    pub cover_letter: String,

    #[validate(range(min = 1))]
    pub estimated_days: i32,
}

/// Request for editing a proposal.
///
/// A `status` field is accepted so a recognised token gets a precise error:
/// lifecycle transitions go through the accept/reject endpoints, never PATCH.
/// Unrecognised tokens already die in deserialization with a 400.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProposalRequest {
    pub bid_amount: Option<Decimal>,
    pub status: Option<ProposalStatus>,
}

/// Request body for accepting a proposal
#[derive(Debug, Deserialize, Validate)]
pub struct AcceptProposalRequest {
    /// Description for the contract created by the acceptance
    #[validate(length(min = 1))]
    pub description: String,
}

/// Submit a proposal against a project
pub async fn submit_proposal(
    State(state): State<EngagementsState>,
    ValidatedJson(req): ValidatedJson<SubmitProposalRequest>,
) -> Result<(StatusCode, Json<ProposalResponse>)> {
    if !state.repos.proposals.project_exists(req.project_id).await? {
        return Err(Error::NotFound("Project not found".to_string()));
    }

    // Role check against the identity directory; unknown identities map to 404
    let role = state.identity.resolve_role(req.freelancer_id).await?;
    if !role.can_submit_proposals() {
        return Err(Error::Authorization(
            "Only freelancers can submit proposals".to_string(),
        ));
    }

    // Fast path; the unique constraint on (project_id, freelancer_id) is the
    // authoritative guard and the insert below maps its violation to 409.
    if state
        .repos
        .proposals
        .find_by_project_and_freelancer(req.project_id, req.freelancer_id)
        .await?
        .is_some()
    {
        return Err(Error::Conflict(
            "You have already submitted a proposal for this project".to_string(),
        ));
    }

    let proposal = Proposal::new(
        req.project_id,
        req.freelancer_id,
        req.bid_amount,
        req.cover_letter,
        req.estimated_days,
    )?;

    let created = state.repos.proposals.create(&proposal).await?;
    tracing::info!(
        proposal_id = %created.id,
        project_id = %created.project_id,
        freelancer_id = %created.freelancer_id,
        "Proposal submitted"
    );
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List all proposals
pub async fn list_proposals(
    State(state): State<EngagementsState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ProposalResponse>>> {
    let proposals = state
        .repos
        .proposals
        .list(pagination.limit(), pagination.offset())
        .await?;
    Ok(Json(proposals.into_iter().map(Into::into).collect()))
}

/// Get a single proposal by ID
pub async fn get_proposal(
    State(state): State<EngagementsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProposalResponse>> {
    let proposal = state
        .repos
        .proposals
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Proposal not found".to_string()))?;
    Ok(Json(proposal.into()))
}

/// List proposals submitted against a project
pub async fn list_proposals_by_project(
    State(state): State<EngagementsState>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<ProposalResponse>>> {
    let proposals = state.repos.proposals.list_by_project(project_id).await?;
    Ok(Json(proposals.into_iter().map(Into::into).collect()))
}

/// List proposals submitted by a freelancer
pub async fn list_proposals_by_freelancer(
    State(state): State<EngagementsState>,
    Path(freelancer_id): Path<Uuid>,
) -> Result<Json<Vec<ProposalResponse>>> {
    let proposals = state
        .repos
        .proposals
        .list_by_freelancer(freelancer_id)
        .await?;
    Ok(Json(proposals.into_iter().map(Into::into).collect()))
}

/// List proposals against any project owned by a client
pub async fn list_proposals_by_client(
    State(state): State<EngagementsState>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<ProposalResponse>>> {
    let proposals = state.repos.proposals.list_by_client(client_id).await?;
    Ok(Json(proposals.into_iter().map(Into::into).collect()))
}

/// Edit a proposal's bid
pub async fn update_proposal(
    State(state): State<EngagementsState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateProposalRequest>,
) -> Result<Json<ProposalResponse>> {
    if req.status.is_some() {
        return Err(Error::Validation(
            "Proposal status changes go through the accept and reject endpoints".to_string(),
        ));
    }

    let mut proposal = state
        .repos
        .proposals
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Proposal not found".to_string()))?;

    if let Some(bid_amount) = req.bid_amount {
        proposal.update_bid(bid_amount)?;
    }

    let updated = state.repos.proposals.update(&proposal).await?;
    Ok(Json(updated.into()))
}

/// Withdraw a pending proposal
pub async fn withdraw_proposal(
    State(state): State<EngagementsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let proposal = state
        .repos
        .proposals
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Proposal not found".to_string()))?;

    if proposal.status != ProposalStatus::Pending {
        return Err(Error::Conflict(format!(
            "Proposal has already been {} and cannot be withdrawn",
            proposal.status
        )));
    }

    state.repos.proposals.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Accept a proposal, producing its contract.
///
/// The atomic cascade (proposal → accepted, contract insert, project →
/// in-progress) lives in the coordinator.
pub async fn accept_proposal(
    State(state): State<EngagementsState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AcceptProposalRequest>,
) -> Result<(StatusCode, Json<ContractResponse>)> {
    let contract = coordinator::accept_proposal(&state.repos, id, req.description).await?;
    Ok((StatusCode::CREATED, Json(contract.into())))
}

/// Reject a proposal
pub async fn reject_proposal(
    State(state): State<EngagementsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProposalResponse>> {
    let proposal = coordinator::reject_proposal(&state.repos, id).await?;
    Ok(Json(proposal.into()))
}
