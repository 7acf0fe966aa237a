//! Milestone repository

use crate::domain::entities::Milestone;
use worklane_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Column list shared by every milestone query
pub(crate) const MILESTONE_COLUMNS: &str =
    "id, contract_id, description, status, file_name, file_locator, created_at, updated_at";

#[derive(Clone)]
pub struct MilestoneRepository {
    pool: PgPool,
}

impl MilestoneRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find milestone by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Milestone>> {
        let query = format!("SELECT {MILESTONE_COLUMNS} FROM milestones WHERE id = $1");
        let row = sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// List all milestones
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Milestone>> {
        let query = format!(
            "SELECT {MILESTONE_COLUMNS} FROM milestones \
             ORDER BY created_at ASC LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, Milestone>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List milestones under a contract
    pub async fn list_by_contract(&self, contract_id: Uuid) -> Result<Vec<Milestone>> {
        let query = format!(
            "SELECT {MILESTONE_COLUMNS} FROM milestones WHERE contract_id = $1 \
             ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, Milestone>(&query)
            .bind(contract_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List milestones under a project
    /// (traverses contract → proposal → project).
    pub async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Milestone>> {
        let rows = sqlx::query_as::<_, Milestone>(
            "SELECT m.id, m.contract_id, m.description, m.status, \
                    m.file_name, m.file_locator, m.created_at, m.updated_at \
             FROM milestones m \
             INNER JOIN contracts c ON c.id = m.contract_id \
             INNER JOIN proposals p ON p.id = c.proposal_id \
             WHERE p.project_id = $1 \
             ORDER BY m.created_at ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a new milestone
    pub async fn create(&self, milestone: &Milestone) -> Result<Milestone> {
        let query = format!(
            "INSERT INTO milestones ({MILESTONE_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {MILESTONE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Milestone>(&query)
            .bind(milestone.id)
            .bind(milestone.contract_id)
            .bind(&milestone.description)
            .bind(milestone.status)
            .bind(&milestone.file_name)
            .bind(&milestone.file_locator)
            .bind(milestone.created_at)
            .bind(milestone.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Update an existing milestone
    pub async fn update(&self, milestone: &Milestone) -> Result<Milestone> {
        let query = format!(
            "UPDATE milestones SET \
                description = $2, status = $3, file_name = $4, file_locator = $5, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {MILESTONE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Milestone>(&query)
            .bind(milestone.id)
            .bind(&milestone.description)
            .bind(milestone.status)
            .bind(&milestone.file_name)
            .bind(&milestone.file_locator)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Clear the attachment pair, leaving the milestone row in place.
    ///
    /// Idempotent: matches the row whether or not an attachment is set, so a
    /// second clear is a no-op success. Returns `None` only when the
    /// milestone itself is absent.
    pub async fn clear_attachment(&self, id: Uuid) -> Result<Option<Milestone>> {
        let query = format!(
            "UPDATE milestones SET file_name = NULL, file_locator = NULL, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {MILESTONE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Delete a milestone by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM milestones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// CQRS cross-domain read: whether a contract exists.
    /// Reads the contracts table directly (same DB, engagements domain); used
    /// to fail milestone creation against unknown contracts before the insert.
    pub async fn contract_exists(&self, contract_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM contracts WHERE id = $1)",
        )
        .bind(contract_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
