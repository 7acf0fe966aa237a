//! Project repository

use crate::domain::entities::{Project, ProjectStatus};
use worklane_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Column list shared by every project query
pub(crate) const PROJECT_COLUMNS: &str = "id, client_id, title, description, min_budget, \
     max_budget, deadline, skills, status, created_at, updated_at";

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find project by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Project>> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let row = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// List projects with an optional status filter
    pub async fn list(
        &self,
        status_filter: Option<&ProjectStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>> {
        if let Some(status) = status_filter {
            let query = format!(
                "SELECT {PROJECT_COLUMNS} FROM projects WHERE status = $3 \
                 ORDER BY created_at DESC LIMIT $1 OFFSET $2"
            );
            let rows = sqlx::query_as::<_, Project>(&query)
                .bind(limit)
                .bind(offset)
                .bind(status)
                .fetch_all(&self.pool)
                .await?;
            Ok(rows)
        } else {
            let query = format!(
                "SELECT {PROJECT_COLUMNS} FROM projects \
                 ORDER BY created_at DESC LIMIT $1 OFFSET $2"
            );
            let rows = sqlx::query_as::<_, Project>(&query)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
            Ok(rows)
        }
    }

    /// List projects posted by a client
    pub async fn list_by_client(
        &self,
        client_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE client_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Project>(&query)
            .bind(client_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Create a new project
    pub async fn create(&self, project: &Project) -> Result<Project> {
        let query = format!(
            "INSERT INTO projects ({PROJECT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {PROJECT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Project>(&query)
            .bind(project.id)
            .bind(project.client_id)
            .bind(&project.title)
            .bind(&project.description)
            .bind(project.min_budget)
            .bind(project.max_budget)
            .bind(project.deadline)
            .bind(&project.skills)
            .bind(project.status)
            .bind(project.created_at)
            .bind(project.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Update an existing project
    pub async fn update(&self, project: &Project) -> Result<Project> {
        let query = format!(
            "UPDATE projects SET \
                title = $2, description = $3, min_budget = $4, max_budget = $5, \
                deadline = $6, skills = $7, status = $8, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PROJECT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Project>(&query)
            .bind(project.id)
            .bind(&project.title)
            .bind(&project.description)
            .bind(project.min_budget)
            .bind(project.max_budget)
            .bind(project.deadline)
            .bind(&project.skills)
            .bind(project.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Delete a project by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// CQRS cross-domain read: count proposals referencing a project.
    /// Reads the proposals table directly (same DB, engagements domain);
    /// used to refuse deleting a project that already has bids.
    pub async fn count_proposals(&self, project_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM proposals WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
