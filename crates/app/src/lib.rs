//! Worklane application composition root
//!
//! Composes all domain routers into a single application.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use worklane_attachments::{AttachmentConfig, AttachmentStoreFactory};
use worklane_common::Config;
use worklane_engagements::{EngagementsRepositories, EngagementsState};
use worklane_identity::PgIdentityDirectory;
use worklane_milestones::{MilestonesRepositories, MilestonesState};
use worklane_projects::{ProjectsRepositories, ProjectsState};

/// Create the main application router with all routes and middleware
pub async fn create_app(config: &Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    // The identity directory is a read model over the same database
    let identity = Arc::new(PgIdentityDirectory::new(pool.clone()));

    // Attachment store from environment (local disk by default)
    let attachments = AttachmentStoreFactory::create(AttachmentConfig {
        provider: config.attachment_provider.clone(),
        upload_dir: config.upload_dir.clone(),
    })
    .map_err(|e| anyhow::anyhow!("Failed to create attachment store: {}", e))?;

    // Create domain states
    let projects_state = ProjectsState {
        repos: ProjectsRepositories::new(pool.clone()),
    };

    let engagements_state = EngagementsState {
        repos: EngagementsRepositories::new(pool.clone()),
        identity,
    };

    let milestones_state = MilestonesState {
        repos: MilestonesRepositories::new(pool),
        attachments: Arc::from(attachments),
    };

    // Build router — compose domain routers with shared infrastructure routes
    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Worklane API v0.1.0" }),
        )
        .merge(worklane_projects::routes().with_state(projects_state))
        .merge(worklane_engagements::routes().with_state(engagements_state))
        .merge(worklane_milestones::routes().with_state(milestones_state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
