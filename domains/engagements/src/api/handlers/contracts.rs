//! Contract management API handlers
//!
//! Contracts are born inside the acceptance transaction; there is no create
//! endpoint here. Completion is the only status change and has its own route.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use worklane_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::middleware::EngagementsState;
use crate::coordinator;
use crate::domain::entities::{Contract, ContractStatus};

/// Contract response DTO
#[derive(Debug, Serialize)]
pub struct ContractResponse {
    pub id: Uuid,
    pub proposal_id: Uuid,
    pub description: String,
    pub status: ContractStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contract> for ContractResponse {
    fn from(c: Contract) -> Self {
        Self {
            id: c.id,
            proposal_id: c.proposal_id,
            description: c.description,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Request for editing a contract.
///
/// Accepting a recognised `status` token here still fails: completion goes
/// through its own endpoint so the terminal transition stays explicit.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContractRequest {
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub status: Option<ContractStatus>,
}

/// List all contracts
pub async fn list_contracts(
    State(state): State<EngagementsState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ContractResponse>>> {
    let contracts = state
        .repos
        .contracts
        .list(pagination.limit(), pagination.offset())
        .await?;
    Ok(Json(contracts.into_iter().map(Into::into).collect()))
}

/// Get a single contract by ID
pub async fn get_contract(
    State(state): State<EngagementsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractResponse>> {
    let contract = state
        .repos
        .contracts
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Contract not found".to_string()))?;
    Ok(Json(contract.into()))
}

/// List contracts under projects owned by a client
pub async fn list_contracts_by_client(
    State(state): State<EngagementsState>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<ContractResponse>>> {
    let contracts = state.repos.contracts.list_by_client(client_id).await?;
    Ok(Json(contracts.into_iter().map(Into::into).collect()))
}

/// List contracts won by a freelancer
pub async fn list_contracts_by_freelancer(
    State(state): State<EngagementsState>,
    Path(freelancer_id): Path<Uuid>,
) -> Result<Json<Vec<ContractResponse>>> {
    let contracts = state
        .repos
        .contracts
        .list_by_freelancer(freelancer_id)
        .await?;
    Ok(Json(contracts.into_iter().map(Into::into).collect()))
}

/// List contracts under a project
pub async fn list_contracts_by_project(
    State(state): State<EngagementsState>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<ContractResponse>>> {
    let contracts = state.repos.contracts.list_by_project(project_id).await?;
    Ok(Json(contracts.into_iter().map(Into::into).collect()))
}

/// Edit a contract's description
pub async fn update_contract(
    State(state): State<EngagementsState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateContractRequest>,
) -> Result<Json<ContractResponse>> {
    if req.status.is_some() {
        return Err(Error::Validation(
            "Contract status changes go through the complete endpoint".to_string(),
        ));
    }

    let mut contract = state
        .repos
        .contracts
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Contract not found".to_string()))?;

    if let Some(description) = req.description {
        contract.description = description;
    }

    let updated = state.repos.contracts.update(&contract).await?;
    Ok(Json(updated.into()))
}

/// Complete a contract
pub async fn complete_contract(
    State(state): State<EngagementsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractResponse>> {
    let contract = coordinator::complete_contract(&state.repos, id).await?;
    Ok(Json(contract.into()))
}

/// Delete a contract (removes its milestones first)
pub async fn delete_contract(
    State(state): State<EngagementsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state.repos.contracts.delete(id).await?;
    if !deleted {
        return Err(Error::NotFound("Contract not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
