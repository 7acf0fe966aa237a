//! Milestone tracker integration tests

use worklane_engagements::coordinator::accept_proposal;
use worklane_milestones::{AttachmentRef, Milestone};

use crate::common::TestApp;

/// Create the client → project → proposal → contract chain a milestone needs
async fn engaged_contract(app: &TestApp) -> uuid::Uuid {
    let client = app.create_test_client().await.unwrap();
    let freelancer = app.create_test_freelancer().await.unwrap();
    let project = app.create_test_project(client).await.unwrap();
    let proposal = app
        .create_test_proposal(project.id, freelancer)
        .await
        .unwrap();
    accept_proposal(&app.engagements, proposal.id, "Deal".to_string())
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_milestone_lifecycle_under_contract() {
    let app = TestApp::new().await.unwrap();
    let contract_id = engaged_contract(&app).await;

    let milestone = Milestone::new(contract_id, "Deliver first draft".to_string()).unwrap();
    let created = app.milestones.milestones.create(&milestone).await.unwrap();
    assert_eq!(created.contract_id, contract_id);
    assert!(created.file_name.is_none());
    assert!(created.file_locator.is_none());

    let mut to_complete = created.clone();
    to_complete.complete().unwrap();
    let completed = app.milestones.milestones.update(&to_complete).await.unwrap();
    assert_eq!(completed.status, worklane_milestones::MilestoneStatus::Completed);

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_milestone_requires_existing_contract() {
    let app = TestApp::new().await.unwrap();

    let exists = app
        .milestones
        .milestones
        .contract_exists(uuid::Uuid::new_v4())
        .await
        .unwrap();
    assert!(!exists);
}

#[tokio::test]
async fn test_clear_attachment_is_idempotent() {
    let app = TestApp::new().await.unwrap();
    let contract_id = engaged_contract(&app).await;

    let mut milestone = Milestone::new(contract_id, "Deliver first draft".to_string()).unwrap();
    milestone.set_attachment(AttachmentRef {
        file_name: "draft.pdf".to_string(),
        locator: "abc/draft.pdf".to_string(),
    });
    let created = app.milestones.milestones.create(&milestone).await.unwrap();
    assert!(created.file_name.is_some());

    let first = app
        .milestones
        .milestones
        .clear_attachment(created.id)
        .await
        .unwrap()
        .expect("milestone exists");
    assert!(first.file_name.is_none());
    assert!(first.file_locator.is_none());

    // Second clear: same observable state, no error
    let second = app
        .milestones
        .milestones
        .clear_attachment(created.id)
        .await
        .unwrap()
        .expect("milestone exists");
    assert!(second.file_name.is_none());
    assert!(second.file_locator.is_none());

    // The milestone itself is untouched
    let reloaded = app
        .milestones
        .milestones
        .find(created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.description, "Deliver first draft");

    app.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_clear_attachment_on_missing_milestone() {
    let app = TestApp::new().await.unwrap();

    let result = app
        .milestones
        .milestones
        .clear_attachment(uuid::Uuid::new_v4())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_list_milestones_by_project_traverses_engagement_chain() {
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

    for description in ["Wireframes", "First draft", "Final delivery"] {
        let milestone = Milestone::new(contract.id, description.to_string()).unwrap();
        app.milestones.milestones.create(&milestone).await.unwrap();
    }

    let by_contract = app
        .milestones
        .milestones
        .list_by_contract(contract.id)
        .await
        .unwrap();
    assert_eq!(by_contract.len(), 3);

    // contract → proposal → project traversal
    let by_project = app
        .milestones
        .milestones
        .list_by_project(project.id)
        .await
        .unwrap();
    assert_eq!(by_project.len(), 3);
    assert!(by_project.iter().all(|m| m.contract_id == contract.id));

    app.cleanup().await.unwrap();
}
