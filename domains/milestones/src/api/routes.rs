//! Route definitions for the Milestones domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::milestones;
use super::middleware::MilestonesState;

/// Create all Milestones domain API routes
pub fn routes() -> Router<MilestonesState> {
    Router::new()
        .route(
            "/v1/milestones",
            get(milestones::list_milestones).post(milestones::create_milestone),
        )
        .route(
            "/v1/milestones/{id}",
            get(milestones::get_milestone)
                .patch(milestones::update_milestone)
                .delete(milestones::delete_milestone),
        )
        .route(
            "/v1/milestones/{id}/attachment",
            post(milestones::upload_attachment).delete(milestones::clear_attachment),
        )
        .route(
            "/v1/milestones/contract/{contract_id}",
            get(milestones::list_milestones_by_contract),
        )
        .route(
            "/v1/milestones/project/{project_id}",
            get(milestones::list_milestones_by_project),
        )
}
