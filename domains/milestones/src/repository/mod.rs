//! Repository implementations for the Milestones domain

pub mod milestones;

use sqlx::{PgPool, Postgres, Transaction};

pub use milestones::MilestoneRepository;

/// Combined repository access for the Milestones domain
#[derive(Clone)]
pub struct MilestonesRepositories {
    pool: PgPool,
    pub milestones: MilestoneRepository,
}

impl MilestonesRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            milestones: MilestoneRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Get a reference to the underlying database pool (for CQRS cross-domain queries).
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
