//! Integration tests for the controller and store loop.
//!
//! Drives a `TaskManager` through the channel bridge against an
//! in-process `MemoryStore`, the way the TUI loop does at runtime: every
//! mutation goes out as a store command, every state change comes back
//! as a store event and is folded in with `apply_event`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use tokio::sync::mpsc;

use termtask::net;
use termtask::store::memory::MemoryStore;
use termtask::store::{RemoteStore, StoreEvent, StoreOp};
use termtask::tasks::{TaskError, TaskManager};
use termtask_proto::task::{Status, Subtask, Task, TaskPayload};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Receives the next store event or fails the test after five seconds.
async fn next_event(evt_rx: &mut mpsc::Receiver<StoreEvent>) -> StoreEvent {
    tokio::time::timeout(Duration::from_secs(5), evt_rx.recv())
        .await
        .expect("timeout waiting for store event")
        .expect("event channel closed unexpectedly")
}

/// Expects the next event to be `Loaded` and folds it into the manager.
async fn expect_loaded(manager: &mut TaskManager, evt_rx: &mut mpsc::Receiver<StoreEvent>) {
    match next_event(evt_rx).await {
        event @ StoreEvent::Loaded(_) => manager.apply_event(event),
        other => panic!("expected Loaded, got: {other:?}"),
    }
}

/// Creates one task per title directly on the store, in order.
async fn seed(store: &MemoryStore, titles: &[&str]) -> Vec<Task> {
    let mut tasks = Vec::new();
    for title in titles {
        let payload = TaskPayload {
            title: (*title).to_string(),
            ..TaskPayload::default()
        };
        tasks.push(store.create(&payload).await.expect("seed create"));
    }
    tasks
}

// ---------------------------------------------------------------------------
// Load and reload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reload_round_trip_populates_the_manager() {
    let store = MemoryStore::new();
    seed(&store, &["write brief", "review draft"]).await;

    let (cmd_tx, mut evt_rx) = net::spawn_store(store, 8);
    let mut manager = TaskManager::new();

    cmd_tx
        .send(manager.reload())
        .await
        .expect("command channel closed");
    expect_loaded(&mut manager, &mut evt_rx).await;

    let titles: Vec<&str> = manager
        .tasks()
        .iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(titles, ["write brief", "review draft"]);
}

// ---------------------------------------------------------------------------
// Creation flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_flow_confirms_the_draft_then_refreshes() {
    let (cmd_tx, mut evt_rx) = net::spawn_store(MemoryStore::new(), 8);
    let mut manager = TaskManager::new();

    manager.open_draft();
    manager.draft_mut().expect("draft just opened").title = "ship the fix".to_string();
    let cmd = manager.submit_draft().expect("draft should submit");
    // the draft stays open until the store confirms
    assert!(manager.draft().is_some());

    cmd_tx.send(cmd).await.expect("command channel closed");

    match next_event(&mut evt_rx).await {
        event @ StoreEvent::Created(_) => manager.apply_event(event),
        other => panic!("expected Created first, got: {other:?}"),
    }
    assert!(manager.draft().is_none());

    expect_loaded(&mut manager, &mut evt_rx).await;
    assert_eq!(manager.tasks().len(), 1);
    assert_eq!(manager.tasks()[0].title, "ship the fix");
    assert_eq!(manager.tasks()[0].status, Status::Todo);
}

#[tokio::test]
async fn blank_draft_never_reaches_the_store() {
    let mut manager = TaskManager::new();
    manager.open_draft();
    manager.draft_mut().expect("draft just opened").title = "   ".to_string();

    assert_eq!(manager.submit_draft(), Err(TaskError::TitleEmpty));
    // rejected locally; the draft keeps its typed values
    assert!(manager.draft().is_some());
}

// ---------------------------------------------------------------------------
// Mutation flows
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_change_round_trips() {
    let store = MemoryStore::new();
    seed(&store, &["toggle me"]).await;

    let (cmd_tx, mut evt_rx) = net::spawn_store(store, 8);
    let mut manager = TaskManager::new();
    cmd_tx
        .send(manager.reload())
        .await
        .expect("command channel closed");
    expect_loaded(&mut manager, &mut evt_rx).await;

    let id = manager.tasks()[0].id.clone();
    let cmd = manager
        .set_status(&id, Status::Done)
        .expect("task is loaded");
    cmd_tx.send(cmd).await.expect("command channel closed");

    expect_loaded(&mut manager, &mut evt_rx).await;
    assert_eq!(manager.tasks()[0].id, id);
    assert_eq!(manager.tasks()[0].status, Status::Done);
    assert_eq!(manager.tasks()[0].title, "toggle me");
}

#[tokio::test]
async fn edit_save_flow_updates_the_document() {
    let store = MemoryStore::new();
    seed(&store, &["draft blog post"]).await;

    let (cmd_tx, mut evt_rx) = net::spawn_store(store, 8);
    let mut manager = TaskManager::new();
    cmd_tx
        .send(manager.reload())
        .await
        .expect("command channel closed");
    expect_loaded(&mut manager, &mut evt_rx).await;

    let id = manager.tasks()[0].id.clone();
    manager.begin_edit(&id).expect("task is loaded");
    {
        let draft = manager.edit_draft_mut().expect("session just opened");
        draft.title = "publish blog post".to_string();
        draft.description = "after one more read".to_string();
    }
    let cmd = manager.save_edit().expect("session is active");
    assert!(manager.editing_id().is_none());
    cmd_tx.send(cmd).await.expect("command channel closed");

    expect_loaded(&mut manager, &mut evt_rx).await;
    assert_eq!(manager.tasks()[0].id, id);
    assert_eq!(manager.tasks()[0].title, "publish blog post");
    assert_eq!(manager.tasks()[0].description, "after one more read");
}

#[tokio::test]
async fn subtask_toggle_round_trips() {
    let store = MemoryStore::new();
    let payload = TaskPayload {
        title: "pack for the trip".to_string(),
        subtasks: vec![Subtask::new("passport"), Subtask::new("charger")],
        ..TaskPayload::default()
    };
    store.create(&payload).await.expect("seed create");

    let (cmd_tx, mut evt_rx) = net::spawn_store(store, 8);
    let mut manager = TaskManager::new();
    cmd_tx
        .send(manager.reload())
        .await
        .expect("command channel closed");
    expect_loaded(&mut manager, &mut evt_rx).await;

    let id = manager.tasks()[0].id.clone();
    let cmd = manager.toggle_subtask(&id, 1).expect("subtask exists");
    cmd_tx.send(cmd).await.expect("command channel closed");

    expect_loaded(&mut manager, &mut evt_rx).await;
    let subtasks = &manager.tasks()[0].subtasks;
    assert!(!subtasks[0].done);
    assert!(subtasks[1].done);
}

#[tokio::test]
async fn delete_flow_empties_the_collection() {
    let store = MemoryStore::new();
    seed(&store, &["doomed"]).await;

    let (cmd_tx, mut evt_rx) = net::spawn_store(store, 8);
    let mut manager = TaskManager::new();
    cmd_tx
        .send(manager.reload())
        .await
        .expect("command channel closed");
    expect_loaded(&mut manager, &mut evt_rx).await;

    let id = manager.tasks()[0].id.clone();
    let cmd = manager.delete(&id).expect("task is loaded");
    cmd_tx.send(cmd).await.expect("command channel closed");

    expect_loaded(&mut manager, &mut evt_rx).await;
    assert!(manager.tasks().is_empty());
}

// ---------------------------------------------------------------------------
// Failure flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stale_update_fails_and_leaves_the_collection_alone() {
    let store = MemoryStore::new();
    seed(&store, &["vanishing"]).await;

    // the store task and the test share the same backing state
    let (cmd_tx, mut evt_rx) = net::spawn_store(store.clone(), 8);
    let mut manager = TaskManager::new();
    cmd_tx
        .send(manager.reload())
        .await
        .expect("command channel closed");
    expect_loaded(&mut manager, &mut evt_rx).await;

    // someone else deletes the task while it is still on screen
    let id = manager.tasks()[0].id.clone();
    store.delete(&id).await.expect("direct delete");

    let cmd = manager
        .set_status(&id, Status::Done)
        .expect("still loaded locally");
    cmd_tx.send(cmd).await.expect("command channel closed");

    match next_event(&mut evt_rx).await {
        StoreEvent::Failed { op, message } => {
            assert_eq!(op, StoreOp::Update);
            assert!(message.contains("no task with id"));
            manager.apply_event(StoreEvent::Failed { op, message });
        }
        other => panic!("expected Failed, got: {other:?}"),
    }
    // the stale copy stays visible until the next reload
    assert_eq!(manager.tasks().len(), 1);

    cmd_tx
        .send(manager.reload())
        .await
        .expect("command channel closed");
    expect_loaded(&mut manager, &mut evt_rx).await;
    assert!(manager.tasks().is_empty());
}
