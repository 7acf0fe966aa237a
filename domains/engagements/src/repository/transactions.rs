//! Transactional free functions for the Engagements domain (Zero2Prod pattern)
//!
//! These run inside the acceptance transaction owned by the coordinator; none
//! of them commits. Every guard here re-checks what the coordinator already
//! verified outside the transaction, because only the in-transaction checks
//! are authoritative under concurrency.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use worklane_common::RepositoryError;

use super::contracts::CONTRACT_COLUMNS;
use crate::domain::entities::Contract;

/// Flip a pending proposal to accepted within an existing transaction.
///
/// Returns `RepositoryError::AlreadyExists` when the proposal is no longer
/// pending — the WHERE guard means a racing accept or reject cannot be
/// overwritten.
pub async fn mark_proposal_accepted_tx(
    transaction: &mut Transaction<'_, Postgres>,
    proposal_id: Uuid,
) -> std::result::Result<(), RepositoryError> {
    let result = sqlx::query(
        "UPDATE proposals SET status = 'accepted', updated_at = NOW() \
         WHERE id = $1 AND status = 'pending'",
    )
    .bind(proposal_id)
    .execute(&mut **transaction)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::AlreadyExists);
    }
    Ok(())
}

/// Insert a contract within an existing transaction.
///
/// The unique constraint on `contracts.proposal_id` is the authoritative
/// one-contract-per-proposal guard: under concurrent accepts of the same
/// proposal, exactly one insert commits and the loser sees
/// `RepositoryError::AlreadyExists`.
pub async fn create_contract_tx(
    transaction: &mut Transaction<'_, Postgres>,
    contract: &Contract,
) -> std::result::Result<Contract, RepositoryError> {
    let query = format!(
        "INSERT INTO contracts ({CONTRACT_COLUMNS}) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {CONTRACT_COLUMNS}"
    );
    let created = sqlx::query_as::<_, Contract>(&query)
        .bind(contract.id)
        .bind(contract.proposal_id)
        .bind(&contract.description)
        .bind(contract.status)
        .bind(contract.created_at)
        .bind(contract.updated_at)
        .fetch_one(&mut **transaction)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::AlreadyExists
            }
            e => RepositoryError::Connection(e),
        })?;
    Ok(created)
}

/// CQRS cross-domain write: move the owning project to in-progress.
/// Writes the projects table directly (same DB, projects domain). Idempotent
/// for projects already in progress; a closed project matches no row, which
/// the coordinator surfaces as a conflict and rolls back.
pub async fn mark_project_in_progress_tx(
    transaction: &mut Transaction<'_, Postgres>,
    project_id: Uuid,
) -> std::result::Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE projects SET status = 'in_progress', updated_at = NOW() \
         WHERE id = $1 AND status <> 'closed'",
    )
    .bind(project_id)
    .execute(&mut **transaction)
    .await?;
    Ok(result.rows_affected())
}
