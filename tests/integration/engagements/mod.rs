//! Engagement lifecycle integration tests
//!
//! Exercises the coordinator directly: the atomic acceptance cascade,
//! conflict handling on terminal states, and behavior under concurrency.

use worklane_common::Error;
use worklane_engagements::coordinator::{accept_proposal, complete_contract, reject_proposal};
use worklane_engagements::{
    create_contract_tx, mark_proposal_accepted_tx, Contract, ContractStatus, ProposalStatus,
};

use crate::common::TestApp;

#[tokio::test]
async fn test_accept_proposal_cascades_to_contract_and_project() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    let contract = accept_proposal(
        &app.engagements,
        proposal.id,
        "Build landing page".to_string(),
    )
    .await
    .unwrap();

    assert_eq!(contract.proposal_id, proposal.id);
    assert_eq!(contract.status, ContractStatus::Pending);
    assert_eq!(contract.description, "Build landing page");

    assert_eq!(app.proposal_status(proposal.id).await.unwrap(), "accepted");
    assert_eq!(app.project_status(project.id).await.unwrap(), "in_progress");

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_second_accept_conflicts_and_mutates_nothing() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    accept_proposal(&app.engagements, proposal.id, "First".to_string())
        .await
        .unwrap();

    let second = accept_proposal(&app.engagements, proposal.id, "Second".to_string()).await;
    assert!(matches!(second, Err(Error::Conflict(_))));

    assert_eq!(app.contract_count(proposal.id).await.unwrap(), 1);
    assert_eq!(app.proposal_status(proposal.id).await.unwrap(), "accepted");

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_accepts_exactly_one_succeeds() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        accept_proposal(&app.engagements, proposal.id, "Racer A".to_string()),
        accept_proposal(&app.engagements, proposal.id, "Racer B".to_string()),
    );

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one accept must win");

    let loser = if first.is_ok() { second } else { first };
    assert!(matches!(loser, Err(Error::Conflict(_))));

    // The uniqueness constraint held: one contract, proposal accepted once
    assert_eq!(app.contract_count(proposal.id).await.unwrap(), 1);
    assert_eq!(app.proposal_status(proposal.id).await.unwrap(), "accepted");
    assert_eq!(app.project_status(project.id).await.unwrap(), "in_progress");

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_interrupted_acceptance_leaves_no_trace() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    // Drive the first two writes of the cascade by hand, then drop the
    // transaction before the project write: everything must roll back.
    {
        let mut transaction = app.engagements.begin().await.unwrap();
        mark_proposal_accepted_tx(&mut transaction, proposal.id)
            .await
            .unwrap();
        let contract = Contract::new(proposal.id, "Doomed".to_string()).unwrap();
        create_contract_tx(&mut transaction, &contract).await.unwrap();
        // Drop without commit = rollback (RAII)
    }

    assert_eq!(app.proposal_status(proposal.id).await.unwrap(), "pending");
    assert_eq!(app.project_status(project.id).await.unwrap(), "open");
    assert_eq!(app.contract_count(proposal.id).await.unwrap(), 0);

    // The proposal is still acceptable afterwards
    accept_proposal(&app.engagements, proposal.id, "For real".to_string())
        .await
        .unwrap();
    assert_eq!(app.contract_count(proposal.id).await.unwrap(), 1);

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_reject_pending_proposal() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    let rejected = reject_proposal(&app.engagements, proposal.id).await.unwrap();
    assert_eq!(rejected.status, ProposalStatus::Rejected);

    // Rejection leaves the project alone
    assert_eq!(app.project_status(project.id).await.unwrap(), "open");

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_accept_rejected_proposal_conflicts() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    reject_proposal(&app.engagements, proposal.id).await.unwrap();

    let result = accept_proposal(&app.engagements, proposal.id, "Too late".to_string()).await;
    assert!(matches!(result, Err(Error::Conflict(_))));
    assert_eq!(app.proposal_status(proposal.id).await.unwrap(), "rejected");
    assert_eq!(app.contract_count(proposal.id).await.unwrap(), 0);

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_reject_accepted_proposal_conflicts() {
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

    let result = reject_proposal(&app.engagements, proposal.id).await;
    assert!(matches!(result, Err(Error::Conflict(_))));
    assert_eq!(app.proposal_status(proposal.id).await.unwrap(), "accepted");

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_accept_missing_proposal_not_found() {
    let app = TestApp::new().await.unwrap();

    let result = accept_proposal(
        &app.engagements,
        uuid::Uuid::new_v4(),
        "Nothing there".to_string(),
    )
    .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_reject_missing_proposal_not_found() {
    let app = TestApp::new().await.unwrap();

    let result = reject_proposal(&app.engagements, uuid::Uuid::new_v4()).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_accept_on_closed_project_conflicts_and_rolls_back() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    sqlx::query("UPDATE projects SET status = 'closed' WHERE id = $1")
        .bind(project.id)
        .execute(&app.pool)
        .await
        .unwrap();

    let result = accept_proposal(&app.engagements, proposal.id, "Too late".to_string()).await;
    assert!(matches!(result, Err(Error::Conflict(_))));

    // The whole cascade rolled back: the proposal flip is not observable
    assert_eq!(app.proposal_status(proposal.id).await.unwrap(), "pending");
    assert_eq!(app.contract_count(proposal.id).await.unwrap(), 0);
    assert_eq!(app.project_status(project.id).await.unwrap(), "closed");

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_second_freelancer_accepted_on_running_project() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let first = app.create_test_freelancer().await.unwrap();
    let second = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();

    let proposal_a = app.create_test_proposal(project.id, first).await.unwrap();
    let proposal_b = app.create_test_proposal(project.id, second).await.unwrap();

    accept_proposal(&app.engagements, proposal_a.id, "First hire".to_string())
        .await
        .unwrap();
    // A second engagement on an in-progress project is allowed; the project
    // status write is idempotent.
    accept_proposal(&app.engagements, proposal_b.id, "Second hire".to_string())
        .await
        .unwrap();

    assert_eq!(app.contract_count(proposal_a.id).await.unwrap(), 1);
    assert_eq!(app.contract_count(proposal_b.id).await.unwrap(), 1);
    assert_eq!(app.project_status(project.id).await.unwrap(), "in_progress");

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_complete_contract() {
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

    let completed = complete_contract(&app.engagements, contract.id).await.unwrap();
    assert_eq!(completed.status, ContractStatus::Completed);

    let again = complete_contract(&app.engagements, contract.id).await;
    assert!(matches!(again, Err(Error::Conflict(_))));

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_complete_missing_contract_not_found() {
    let app = TestApp::new().await.unwrap();

    let result = complete_contract(&app.engagements, uuid::Uuid::new_v4()).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_bid_changes_only_while_pending() {
    let app = TestApp::new().await.unwrap();

    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();

    let mut pending = app
        .engagements
        .proposals
        .find(proposal.id)
        .await
        .unwrap()
        .unwrap();
    pending.update_bid(rust_decimal::Decimal::from(750)).unwrap();
    let updated = app.engagements.proposals.update(&pending).await.unwrap();
    assert_eq!(updated.bid_amount, rust_decimal::Decimal::from(750));

    accept_proposal(&app.engagements, proposal.id, "Deal".to_string())
        .await
        .unwrap();

    let mut accepted = app
        .engagements
        .proposals
        .find(proposal.id)
        .await
        .unwrap()
        .unwrap();
    let result = accepted.update_bid(rust_decimal::Decimal::from(900));
    assert!(matches!(result, Err(Error::Conflict(_))));

    app.cleanup().await.unwrap();
}
