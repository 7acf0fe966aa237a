//! End-to-end acceptance workflow over HTTP
//!
//! Drives the full engagement flow through the composed router:
//! project posting → proposal submission (with role checks) → acceptance →
//! milestone tracking with attachment clearing.

#![allow(dead_code)]

mod common;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::TestApp;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_full_acceptance_workflow() {
    let app = TestApp::new().await.unwrap();
    let router = app.router();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();

    // Post a project
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/projects",
            json!({
                "client_id": client,
                "title": "Build landing page",
                "description": "A landing page for the product launch",
                "min_budget": "100",
                "max_budget": "1000",
                "deadline": "2030-01-01",
                "skills": ["html", "css"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = response_json(response).await;
    let project_id = project["id"].as_str().unwrap().to_string();
    assert_eq!(project["status"], "open");

    // Submit a proposal as the freelancer
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/proposals",
            json!({
                "project_id": project_id,
                "freelancer_id": freelancer,
                "bid_amount": "500",
                "cover_letter": "I can build this in two weeks",
                "estimated_days": 14
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let proposal = response_json(response).await;
    let proposal_id = proposal["id"].as_str().unwrap().to_string();
    assert_eq!(proposal["status"], "pending");

    // A second proposal for the same pair is refused regardless of bid
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/proposals",
            json!({
                "project_id": project_id,
                "freelancer_id": freelancer,
                "bid_amount": "999",
                "cover_letter": "Let me try again",
                "estimated_days": 7
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Accept the proposal; the contract comes back pending
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/v1/proposals/{}/accept", proposal_id),
            json!({ "description": "Build landing page" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let contract = response_json(response).await;
    let contract_id = contract["id"].as_str().unwrap().to_string();
    assert_eq!(contract["status"], "pending");
    assert_eq!(contract["proposal_id"], proposal_id.as_str());

    // The acceptance cascaded to the project
    let response = router
        .clone()
        .oneshot(empty_request("GET", &format!("/v1/projects/{}", project_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let project = response_json(response).await;
    assert_eq!(project["status"], "in_progress");

    // Accepting the same proposal again conflicts
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/v1/proposals/{}/accept", proposal_id),
            json!({ "description": "Again" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // So does rejecting it after the fact
    let response = router
        .clone()
        .oneshot(empty_request(
            "POST",
            &format!("/v1/proposals/{}/reject", proposal_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Track a milestone under the contract
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/milestones",
            json!({
                "contract_id": contract_id,
                "description": "Deliver first draft"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let milestone = response_json(response).await;
    let milestone_id = milestone["id"].as_str().unwrap().to_string();
    assert_eq!(milestone["status"], "pending");

    // Clearing the (absent) attachment is an idempotent no-op success
    for _ in 0..2 {
        let response = router
            .clone()
            .oneshot(empty_request(
                "DELETE",
                &format!("/v1/milestones/{}/attachment", milestone_id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cleared = response_json(response).await;
        assert!(cleared["file_name"].is_null());
        assert!(cleared["file_locator"].is_null());
    }

    // Complete the milestone, then the contract
    let response = router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/milestones/{}", milestone_id),
            json!({ "status": "completed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(empty_request(
            "POST",
            &format!("/v1/contracts/{}/complete", contract_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let contract = response_json(response).await;
    assert_eq!(contract["status"], "completed");

    // Completion does not close the project
    let response = router
        .clone()
        .oneshot(empty_request("GET", &format!("/v1/projects/{}", project_id)))
        .await
        .unwrap();
    let project = response_json(response).await;
    assert_eq!(project["status"], "in_progress");

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_submission_role_and_existence_checks() {
    let app = TestApp::new().await.unwrap();
    let router = app.router();

    let client = app.create_test_client().await.unwrap();
    let other_client = app.create_test_client().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();

    // A client identity cannot submit proposals
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/proposals",
            json!({
                "project_id": project.id,
                "freelancer_id": other_client,
                "bid_amount": "500",
                "cover_letter": "I moonlight",
                "estimated_days": 14
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // An unknown identity maps to 404
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/proposals",
            json!({
                "project_id": project.id,
                "freelancer_id": uuid::Uuid::new_v4(),
                "bid_amount": "500",
                "cover_letter": "Who am I",
                "estimated_days": 14
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // An unknown project maps to 404 too
    let freelancer = app.create_test_freelancer().await.unwrap();
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/proposals",
            json!({
                "project_id": uuid::Uuid::new_v4(),
                "freelancer_id": freelancer,
                "bid_amount": "500",
                "cover_letter": "Ghost project",
                "estimated_days": 14
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_unrecognized_status_tokens_are_rejected() {
    let app = TestApp::new().await.unwrap();
    let router = app.router();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    // Unknown proposal status token dies at the serde boundary with a 400
    let response = router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/proposals/{}", proposal.id),
            json!({ "status": "approved" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A recognised token is still refused: transitions use the lifecycle routes
    let response = router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/proposals/{}", proposal.id),
            json!({ "status": "accepted" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown milestone status token is a 400 as well
    let contract = worklane_engagements::coordinator::accept_proposal(
        &app.engagements,
        proposal.id,
        "Deal".to_string(),
    )
    .await
    .unwrap();
    let milestone =
        worklane_milestones::Milestone::new(contract.id, "First draft".to_string()).unwrap();
    let milestone = app.milestones.milestones.create(&milestone).await.unwrap();

    let response = router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/milestones/{}", milestone.id),
            json!({ "status": "done" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    app.cleanup().await.unwrap();
}
