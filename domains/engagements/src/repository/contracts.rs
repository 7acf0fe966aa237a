//! Contract repository

use crate::domain::entities::Contract;
use worklane_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Column list shared by every contract query
pub(crate) const CONTRACT_COLUMNS: &str =
    "id, proposal_id, description, status, created_at, updated_at";

#[derive(Clone)]
pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find contract by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Contract>> {
        let query = format!("SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = $1");
        let row = sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Find the contract referencing a proposal, if any.
    /// Fast-path duplicate-acceptance check; the unique constraint on
    /// proposal_id is the authoritative guard.
    pub async fn find_by_proposal(&self, proposal_id: Uuid) -> Result<Option<Contract>> {
        let query = format!("SELECT {CONTRACT_COLUMNS} FROM contracts WHERE proposal_id = $1");
        let row = sqlx::query_as::<_, Contract>(&query)
            .bind(proposal_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// List all contracts
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Contract>> {
        let query = format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, Contract>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List contracts under projects owned by a client
    /// (traverses contract → proposal → project).
    pub async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Contract>> {
        let rows = sqlx::query_as::<_, Contract>(
            "SELECT c.id, c.proposal_id, c.description, c.status, c.created_at, c.updated_at \
             FROM contracts c \
             INNER JOIN proposals p ON p.id = c.proposal_id \
             INNER JOIN projects pr ON pr.id = p.project_id \
             WHERE pr.client_id = $1 \
             ORDER BY c.created_at DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List contracts won by a freelancer
    pub async fn list_by_freelancer(&self, freelancer_id: Uuid) -> Result<Vec<Contract>> {
        let rows = sqlx::query_as::<_, Contract>(
            "SELECT c.id, c.proposal_id, c.description, c.status, c.created_at, c.updated_at \
             FROM contracts c \
             INNER JOIN proposals p ON p.id = c.proposal_id \
             WHERE p.freelancer_id = $1 \
             ORDER BY c.created_at DESC",
        )
        .bind(freelancer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List contracts under a project
    pub async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Contract>> {
        let rows = sqlx::query_as::<_, Contract>(
            "SELECT c.id, c.proposal_id, c.description, c.status, c.created_at, c.updated_at \
             FROM contracts c \
             INNER JOIN proposals p ON p.id = c.proposal_id \
             WHERE p.project_id = $1 \
             ORDER BY c.created_at DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Update an existing contract
    pub async fn update(&self, contract: &Contract) -> Result<Contract> {
        let query = format!(
            "UPDATE contracts SET description = $2, status = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {CONTRACT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Contract>(&query)
            .bind(contract.id)
            .bind(&contract.description)
            .bind(contract.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Complete a contract if it is still pending (guarded update).
    ///
    /// Returns `None` when the contract is absent or already completed.
    pub async fn mark_completed(&self, id: Uuid) -> Result<Option<Contract>> {
        let query = format!(
            "UPDATE contracts SET status = 'completed', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {CONTRACT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Delete a contract by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        // Delete milestones first (FK constraint)
        sqlx::query("DELETE FROM milestones WHERE contract_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
