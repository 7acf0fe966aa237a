//! Proposal repository

use crate::domain::entities::Proposal;
use worklane_common::db::conflict_on_unique_violation;
use worklane_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Column list shared by every proposal query
pub(crate) const PROPOSAL_COLUMNS: &str = "id, project_id, freelancer_id, bid_amount, \
     cover_letter, estimated_days, status, created_at, updated_at";

#[derive(Clone)]
pub struct ProposalRepository {
    pool: PgPool,
}

impl ProposalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find proposal by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Proposal>> {
        let query = format!("SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE id = $1");
        let row = sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Find the proposal a freelancer submitted against a project, if any.
    /// Fast-path duplicate check; the unique constraint on
    /// (project_id, freelancer_id) is the authoritative guard.
    pub async fn find_by_project_and_freelancer(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<Option<Proposal>> {
        let query = format!(
            "SELECT {PROPOSAL_COLUMNS} FROM proposals \
             WHERE project_id = $1 AND freelancer_id = $2"
        );
        let row = sqlx::query_as::<_, Proposal>(&query)
            .bind(project_id)
            .bind(freelancer_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// List all proposals
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Proposal>> {
        let query = format!(
            "SELECT {PROPOSAL_COLUMNS} FROM proposals \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, Proposal>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List proposals submitted against a project
    pub async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Proposal>> {
        let query = format!(
            "SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE project_id = $1 \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, Proposal>(&query)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List proposals submitted by a freelancer
    pub async fn list_by_freelancer(&self, freelancer_id: Uuid) -> Result<Vec<Proposal>> {
        let query = format!(
            "SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE freelancer_id = $1 \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, Proposal>(&query)
            .bind(freelancer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List proposals against any project owned by a client
    /// (traverses the owning project).
    pub async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Proposal>> {
        let rows = sqlx::query_as::<_, Proposal>(
            "SELECT p.id, p.project_id, p.freelancer_id, p.bid_amount, \
                    p.cover_letter, p.estimated_days, p.status, p.created_at, p.updated_at \
             FROM proposals p \
             INNER JOIN projects pr ON pr.id = p.project_id \
             WHERE pr.client_id = $1 \
             ORDER BY p.created_at DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a new proposal.
    ///
    /// A concurrent duplicate for the same (project, freelancer) pair loses
    /// at the unique constraint and surfaces as a conflict.
    pub async fn create(&self, proposal: &Proposal) -> Result<Proposal> {
        let query = format!(
            "INSERT INTO proposals ({PROPOSAL_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {PROPOSAL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal.id)
            .bind(proposal.project_id)
            .bind(proposal.freelancer_id)
            .bind(proposal.bid_amount)
            .bind(&proposal.cover_letter)
            .bind(proposal.estimated_days)
            .bind(proposal.status)
            .bind(proposal.created_at)
            .bind(proposal.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                conflict_on_unique_violation(
                    e,
                    "A proposal for this project already exists for this freelancer",
                )
            })?;
        Ok(row)
    }

    /// Update an existing proposal
    pub async fn update(&self, proposal: &Proposal) -> Result<Proposal> {
        let query = format!(
            "UPDATE proposals SET \
                bid_amount = $2, cover_letter = $3, estimated_days = $4, \
                status = $5, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PROPOSAL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal.id)
            .bind(proposal.bid_amount)
            .bind(&proposal.cover_letter)
            .bind(proposal.estimated_days)
            .bind(proposal.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Reject a proposal if it is still pending (guarded update).
    ///
    /// Returns `None` when the proposal is absent or no longer pending — the
    /// guard in the WHERE clause means a racing accept cannot be overwritten.
    pub async fn mark_rejected(&self, id: Uuid) -> Result<Option<Proposal>> {
        let query = format!(
            "UPDATE proposals SET status = 'rejected', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {PROPOSAL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Delete a proposal by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM proposals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// CQRS cross-domain read: whether a project exists.
    /// Reads the projects table directly (same DB, projects domain); used by
    /// the proposal ledger to fail submission against unknown projects before
    /// the insert.
    pub async fn project_exists(&self, project_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
