//! Cross-entity invariant tests
//!
//! The storage layer is the authoritative guard for both uniqueness
//! invariants; these tests hit the constraints directly, bypassing the
//! application-level fast paths.

use worklane_common::db::is_unique_violation;
use worklane_common::Error;
use worklane_engagements::coordinator::{accept_proposal, complete_contract};
use worklane_engagements::Proposal;

use crate::common::TestApp;

#[tokio::test]
async fn test_one_contract_per_proposal_enforced_by_constraint() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    accept_proposal(&app.engagements, proposal.id, "Deal".to_string())
        .await
        .unwrap();

    // A raw second insert — no application checks in the way — must die on
    // the unique constraint.
    let result = sqlx::query(
        "INSERT INTO contracts (id, proposal_id, description, status) \
         VALUES ($1, $2, 'duplicate', 'pending')",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(proposal.id)
    .execute(&app.pool)
    .await;

    let err = result.unwrap_err();
    assert!(is_unique_violation(&err));
    assert_eq!(app.contract_count(proposal.id).await.unwrap(), 1);

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_one_proposal_per_project_freelancer_pair() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    app.create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    // Same pair, different bid: the repository surfaces the constraint as a
    // conflict regardless of amount.
    let duplicate = Proposal::new(
        project.id,
        freelancer,
        rust_decimal::Decimal::from(999),
        "Second attempt".to_string(),
        7,
    )
    .unwrap();
    let result = app.engagements.proposals.create(&duplicate).await;
    assert!(matches!(result, Err(Error::Conflict(_))));

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_completing_contract_does_not_close_project() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    let contract = accept_proposal(&app.engagements, proposal.id, "Deal".to_string())
        .await
        .unwrap();
    complete_contract(&app.engagements, contract.id).await.unwrap();

    // No automatic cascade: closing a project is its own explicit operation
    assert_eq!(app.project_status(project.id).await.unwrap(), "in_progress");

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_project_with_contract_never_returns_to_open() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let first = app.create_test_freelancer().await.unwrap();
    let second = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();

    let proposal_a = app.create_test_proposal(project.id, first).await.unwrap();
    let proposal_b = app.create_test_proposal(project.id, second).await.unwrap();

    accept_proposal(&app.engagements, proposal_a.id, "Deal".to_string())
        .await
        .unwrap();

    // Rejecting the remaining proposal must not touch the project status
    worklane_engagements::coordinator::reject_proposal(&app.engagements, proposal_b.id)
        .await
        .unwrap();
    assert_eq!(app.project_status(project.id).await.unwrap(), "in_progress");

    app.cleanup().await.unwrap();
}
