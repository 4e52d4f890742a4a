//! Integration tests driving the HTTP store against a live task service.
//!
//! Starts the service on an OS-assigned port and exercises the full CRUD
//! surface through `HttpStore`, checking the wire contract and the error
//! responses from the client's side of the connection.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::NaiveDate;
use termtask::store::http::HttpStore;
use termtask::store::{RemoteStore, StoreError};
use termtask_proto::task::{Priority, Status, Subtask, TaskId, TaskPayload};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Starts a task service on an OS-assigned port and returns a store client
/// pointed at it. The service task runs detached for the rest of the test.
async fn start_store() -> HttpStore {
    let (addr, _handle) = termtask_server::routes::start_server("127.0.0.1:0")
        .await
        .expect("failed to start test service");
    HttpStore::new(&format!("http://{addr}/api"))
}

/// Creates a create/update body with the given title and defaults elsewhere.
fn make_payload(title: &str) -> TaskPayload {
    TaskPayload {
        title: title.to_string(),
        ..TaskPayload::default()
    }
}

// ---------------------------------------------------------------------------
// Read path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_starts_empty() {
    let store = start_store().await;
    let tasks = store.list().await.expect("list should succeed");
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn created_tasks_list_in_creation_order() {
    let store = start_store().await;
    for title in ["first", "second", "third"] {
        store
            .create(&make_payload(title))
            .await
            .expect("create should succeed");
    }

    let tasks = store.list().await.expect("list should succeed");
    let titles: Vec<&str> = tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_assigns_an_id_and_stores_every_field() {
    let store = start_store().await;
    let payload = TaskPayload {
        title: "Fix the login bug".to_string(),
        description: "Repro: sign in twice".to_string(),
        priority: Priority::High,
        due_date: NaiveDate::from_ymd_opt(2024, 6, 15),
        status: Status::InProgress,
        subtasks: vec![
            Subtask::new("write failing test"),
            Subtask {
                title: "patch session cache".to_string(),
                done: true,
            },
        ],
    };

    let created = store.create(&payload).await.expect("create should succeed");
    assert!(!created.id.as_str().is_empty());
    assert_eq!(created.title, payload.title);
    assert_eq!(created.description, payload.description);
    assert_eq!(created.priority, payload.priority);
    assert_eq!(created.due_date, payload.due_date);
    assert_eq!(created.status, payload.status);
    assert_eq!(created.subtasks, payload.subtasks);

    let tasks = store.list().await.expect("list should succeed");
    assert_eq!(tasks, vec![created]);
}

#[tokio::test]
async fn blank_title_is_rejected_with_the_service_message() {
    let store = start_store().await;
    let error = store
        .create(&make_payload("   "))
        .await
        .expect_err("blank title must be rejected");

    match error {
        StoreError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "title is required");
        }
        other => panic!("expected an API rejection, got: {other:?}"),
    }

    let tasks = store.list().await.expect("list should succeed");
    assert!(tasks.is_empty());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_replaces_the_document_in_place() {
    let store = start_store().await;
    let first = store
        .create(&make_payload("first"))
        .await
        .expect("create should succeed");
    store
        .create(&make_payload("second"))
        .await
        .expect("create should succeed");

    let mut payload = TaskPayload::from(&first);
    payload.title = "first, reworded".to_string();
    payload.status = Status::Done;
    let updated = store
        .update(&first.id, &payload)
        .await
        .expect("update should succeed");
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.title, "first, reworded");
    assert_eq!(updated.status, Status::Done);

    let tasks = store.list().await.expect("list should succeed");
    let titles: Vec<&str> = tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, ["first, reworded", "second"]);
}

#[tokio::test]
async fn update_unknown_id_is_rejected() {
    let store = start_store().await;
    let error = store
        .update(&TaskId::from_raw("ghost"), &make_payload("anything"))
        .await
        .expect_err("unknown id must be rejected");

    match error {
        StoreError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "no task with id ghost");
        }
        other => panic!("expected an API rejection, got: {other:?}"),
    }
}

#[tokio::test]
async fn update_with_blank_title_is_rejected() {
    let store = start_store().await;
    let created = store
        .create(&make_payload("keep me"))
        .await
        .expect("create should succeed");

    let error = store
        .update(&created.id, &make_payload(""))
        .await
        .expect_err("blank title must be rejected");
    match error {
        StoreError::Api { status, .. } => assert_eq!(status, 400),
        other => panic!("expected an API rejection, got: {other:?}"),
    }

    let tasks = store.list().await.expect("list should succeed");
    assert_eq!(tasks, vec![created]);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_only_the_target() {
    let store = start_store().await;
    let first = store
        .create(&make_payload("first"))
        .await
        .expect("create should succeed");
    let second = store
        .create(&make_payload("second"))
        .await
        .expect("create should succeed");

    store
        .delete(&first.id)
        .await
        .expect("delete should succeed");

    let tasks = store.list().await.expect("list should succeed");
    assert_eq!(tasks, vec![second]);
}

#[tokio::test]
async fn delete_unknown_id_is_rejected() {
    let store = start_store().await;
    let error = store
        .delete(&TaskId::from_raw("ghost"))
        .await
        .expect_err("unknown id must be rejected");

    match error {
        StoreError::Api { status, .. } => assert_eq!(status, 404),
        other => panic!("expected an API rejection, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Due dates across the wire
// ---------------------------------------------------------------------------

#[tokio::test]
async fn due_dates_survive_the_round_trip() {
    let store = start_store().await;
    let mut dated = make_payload("dated");
    dated.due_date = NaiveDate::from_ymd_opt(2025, 1, 31);
    store.create(&dated).await.expect("create should succeed");
    store
        .create(&make_payload("undated"))
        .await
        .expect("create should succeed");

    let tasks = store.list().await.expect("list should succeed");
    assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2025, 1, 31));
    assert_eq!(tasks[1].due_date, None);
}
