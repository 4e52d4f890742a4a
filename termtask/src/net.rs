//! Bridge between the TUI event loop and the async store client.
//!
//! The poll-based TUI thread talks to a single background tokio task
//! over [`StoreCommand`] / [`StoreEvent`] channels:
//!
//! ```text
//! TUI (main thread)  ←── StoreEvent ───  store task  ── HTTP ──▶  task service
//!                     ─── StoreCommand →
//! ```
//!
//! Commands run strictly in arrival order, one at a time. Every
//! successful mutation is followed by a full re-list, so the UI always
//! renders the service's own view of the collection rather than a
//! locally patched one.

use tokio::sync::mpsc;

use crate::store::{RemoteStore, StoreCommand, StoreError, StoreEvent, StoreOp};

/// Spawns the background store task and returns its channel handles.
///
/// The task takes ownership of `store` and runs until every command
/// sender is dropped. A failed request is logged, reported as
/// [`StoreEvent::Failed`], and the task moves on to the next command;
/// it never dies on a failure.
///
/// Must be called from within a tokio runtime.
pub fn spawn_store<S>(
    store: S,
    channel_capacity: usize,
) -> (mpsc::Sender<StoreCommand>, mpsc::Receiver<StoreEvent>)
where
    S: RemoteStore + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<StoreCommand>(channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<StoreEvent>(channel_capacity);

    tokio::spawn(async move {
        command_handler(store, cmd_rx, evt_tx).await;
    });

    (cmd_tx, evt_rx)
}

/// Background task: execute store commands strictly in arrival order.
async fn command_handler<S: RemoteStore>(
    store: S,
    mut cmd_rx: mpsc::Receiver<StoreCommand>,
    evt_tx: mpsc::Sender<StoreEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            StoreCommand::LoadAll => refresh(&store, &evt_tx).await,
            StoreCommand::Create(payload) => match store.create(&payload).await {
                Ok(task) => {
                    // Created first so the UI can close the form before
                    // the fresh collection arrives.
                    let _ = evt_tx.send(StoreEvent::Created(task)).await;
                    refresh(&store, &evt_tx).await;
                }
                Err(error) => fail(&evt_tx, StoreOp::Create, &error).await,
            },
            StoreCommand::Update { id, payload } => match store.update(&id, &payload).await {
                Ok(_) => refresh(&store, &evt_tx).await,
                Err(error) => fail(&evt_tx, StoreOp::Update, &error).await,
            },
            StoreCommand::Delete(id) => match store.delete(&id).await {
                Ok(()) => refresh(&store, &evt_tx).await,
                Err(error) => fail(&evt_tx, StoreOp::Delete, &error).await,
            },
        }
    }
    tracing::debug!("store command handler shutting down");
}

/// Fetches the collection and publishes it as [`StoreEvent::Loaded`].
///
/// The only place loaded state comes from. When the fetch following a
/// successful mutation fails, the previously loaded collection stays
/// visible until the next reload.
async fn refresh<S: RemoteStore>(store: &S, evt_tx: &mpsc::Sender<StoreEvent>) {
    match store.list().await {
        Ok(tasks) => {
            let _ = evt_tx.send(StoreEvent::Loaded(tasks)).await;
        }
        Err(error) => fail(evt_tx, StoreOp::Load, &error).await,
    }
}

/// Logs a failed operation and reports it to the UI loop.
async fn fail(evt_tx: &mpsc::Sender<StoreEvent>, op: StoreOp, error: &StoreError) {
    tracing::warn!(%op, error = %error, "store request failed");
    let _ = evt_tx
        .send(StoreEvent::Failed {
            op,
            message: error.to_string(),
        })
        .await;
}
