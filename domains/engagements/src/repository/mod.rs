//! Repository implementations for the Engagements domain

pub mod contracts;
pub mod proposals;
pub mod transactions;

use sqlx::{PgPool, Postgres, Transaction};

pub use contracts::ContractRepository;
pub use proposals::ProposalRepository;
pub use transactions::{create_contract_tx, mark_project_in_progress_tx, mark_proposal_accepted_tx};

/// Combined repository access for the Engagements domain
#[derive(Clone)]
pub struct EngagementsRepositories {
    pool: PgPool,
    pub proposals: ProposalRepository,
    pub contracts: ContractRepository,
}

impl EngagementsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            proposals: ProposalRepository::new(pool.clone()),
            contracts: ContractRepository::new(pool.clone()),
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
