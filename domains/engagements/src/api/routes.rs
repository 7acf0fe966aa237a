//! Route definitions for the Engagements domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{contracts, proposals};
use super::middleware::EngagementsState;

/// Create all Engagements domain API routes
pub fn routes() -> Router<EngagementsState> {
    Router::new()
        .route(
            "/v1/proposals",
            get(proposals::list_proposals).post(proposals::submit_proposal),
        )
        .route(
            "/v1/proposals/{id}",
            get(proposals::get_proposal)
                .patch(proposals::update_proposal)
                .delete(proposals::withdraw_proposal),
        )
        .route("/v1/proposals/{id}/accept", post(proposals::accept_proposal))
        .route("/v1/proposals/{id}/reject", post(proposals::reject_proposal))
        .route(
            "/v1/proposals/project/{project_id}",
            get(proposals::list_proposals_by_project),
        )
        .route(
            "/v1/proposals/freelancer/{freelancer_id}",
            get(proposals::list_proposals_by_freelancer),
        )
        .route(
            "/v1/proposals/client/{client_id}",
            get(proposals::list_proposals_by_client),
        )
        .route("/v1/contracts", get(contracts::list_contracts))
        .route(
            "/v1/contracts/{id}",
            get(contracts::get_contract)
                .patch(contracts::update_contract)
                .delete(contracts::delete_contract),
        )
        .route(
            "/v1/contracts/{id}/complete",
            post(contracts::complete_contract),
        )
        .route(
            "/v1/contracts/client/{client_id}",
            get(contracts::list_contracts_by_client),
        )
        .route(
            "/v1/contracts/freelancer/{freelancer_id}",
            get(contracts::list_contracts_by_freelancer),
        )
        .route(
            "/v1/contracts/project/{project_id}",
            get(contracts::list_contracts_by_project),
        )
}
