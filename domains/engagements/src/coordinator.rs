//! Engagement lifecycle coordination
//!
//! Owns the lifecycle-mutating entry points: accepting a proposal (the one
//! multi-entity transaction in the system), rejecting a proposal, and
//! completing a contract. Handlers stay thin and call into here so the
//! operations can also be exercised directly from integration tests.

use uuid::Uuid;

use worklane_common::{Error, Result};

use crate::domain::entities::{Contract, Proposal, ProposalStatus};
use crate::repository::transactions::{
    create_contract_tx, mark_project_in_progress_tx, mark_proposal_accepted_tx,
};
use crate::repository::EngagementsRepositories;

/// Accept a pending proposal, producing its contract.
///
/// Three writes happen as one unit: the proposal flips to accepted, the
/// contract row is inserted, and the owning project moves to in-progress.
/// If any of them fails the transaction rolls back and nothing is observable.
///
/// The pre-transaction checks give precise errors on the common paths; the
/// in-transaction guards (status-guarded UPDATEs and the unique constraint on
/// `contracts.proposal_id`) are what actually serialize concurrent accepts of
/// the same proposal: exactly one commits, the loser gets a conflict.
pub async fn accept_proposal(
    repos: &EngagementsRepositories,
    proposal_id: Uuid,
    contract_description: String,
) -> Result<Contract> {
    let proposal = repos
        .proposals
        .find(proposal_id)
        .await?
        .ok_or_else(|| Error::NotFound("Proposal not found".to_string()))?;

    if proposal.status != ProposalStatus::Pending {
        return Err(Error::Conflict(format!(
            "Proposal has already been {}",
            proposal.status
        )));
    }

    // Fast path: a contract already references this proposal
    if repos
        .contracts
        .find_by_proposal(proposal_id)
        .await?
        .is_some()
    {
        return Err(Error::Conflict(
            "A contract already exists for this proposal".to_string(),
        ));
    }

    let contract = Contract::new(proposal.id, contract_description)?;

    // All three writes happen atomically; drop without commit = rollback (RAII)
    let mut transaction = repos
        .begin()
        .await
        .map_err(|e| Error::Internal(format!("Failed to begin acceptance transaction: {}", e)))?;

    mark_proposal_accepted_tx(&mut transaction, proposal.id)
        .await
        .map_err(Error::from)?;

    let created_contract = create_contract_tx(&mut transaction, &contract)
        .await
        .map_err(|e| match e {
            worklane_common::RepositoryError::AlreadyExists => {
                Error::Conflict("A contract already exists for this proposal".to_string())
            }
            e => Error::from(e),
        })?;

    // The proposal's project FK guarantees the project row exists, so zero
    // rows here can only mean the project is closed.
    let project_rows = mark_project_in_progress_tx(&mut transaction, proposal.project_id)
        .await
        .map_err(Error::Database)?;
    if project_rows == 0 {
        return Err(Error::Conflict(
            "Project is closed and can no longer accept proposals".to_string(),
        ));
    }

    transaction
        .commit()
        .await
        .map_err(|e| Error::Internal(format!("Failed to commit acceptance transaction: {}", e)))?;

    tracing::info!(
        proposal_id = %proposal.id,
        contract_id = %created_contract.id,
        project_id = %proposal.project_id,
        "Proposal accepted"
    );

    Ok(created_contract)
}

/// Reject a pending proposal.
///
/// Single guarded write; a proposal that already carries a decision is left
/// untouched and the caller gets a conflict.
pub async fn reject_proposal(
    repos: &EngagementsRepositories,
    proposal_id: Uuid,
) -> Result<Proposal> {
    if let Some(rejected) = repos.proposals.mark_rejected(proposal_id).await? {
        tracing::info!(proposal_id = %rejected.id, "Proposal rejected");
        return Ok(rejected);
    }

    // The guarded update matched nothing: absent or no longer pending
    match repos.proposals.find(proposal_id).await? {
        None => Err(Error::NotFound("Proposal not found".to_string())),
        Some(proposal) => Err(Error::Conflict(format!(
            "Proposal has already been {}",
            proposal.status
        ))),
    }
}

/// Complete a pending contract.
///
/// Completion does not cascade to the owning project; closing a project is
/// its own explicit operation.
pub async fn complete_contract(
    repos: &EngagementsRepositories,
    contract_id: Uuid,
) -> Result<Contract> {
    if let Some(completed) = repos.contracts.mark_completed(contract_id).await? {
        tracing::info!(contract_id = %completed.id, "Contract completed");
        return Ok(completed);
    }

    match repos.contracts.find(contract_id).await? {
        None => Err(Error::NotFound("Contract not found".to_string())),
        Some(_) => Err(Error::Conflict(
            "Contract has already been completed".to_string(),
        )),
    }
}
