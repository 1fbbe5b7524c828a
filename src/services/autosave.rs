//! Autosave service — debounced flush of the latest project snapshot.
//!
//! DESIGN
//! ======
//! A background task receives full snapshots over a channel. Each receipt
//! resets the debounce timer, so a burst of edits collapses into a single
//! write after the quiescence window; only the most recent snapshot is ever
//! written. Overlapping writes cannot occur because the task is the sole
//! writer and flushes inline. Closing the channel (dropping the handle)
//! triggers a final flush of whatever is pending.
//!
//! ERROR HANDLING
//! ==============
//! A failed flush is logged and dropped; the task keeps running and the
//! next edit produces a fresh snapshot to retry with. No retry queue.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::consts::AUTOSAVE_DEBOUNCE_MS;
use crate::services::project::{ProjectRecord, ProjectRepository};

/// Sender half handed to the editor engine. Dropping every clone closes the
/// channel and flushes the pending snapshot.
#[derive(Clone)]
pub struct AutosaveHandle {
    tx: mpsc::UnboundedSender<ProjectRecord>,
}

impl AutosaveHandle {
    /// Queue a snapshot, resetting the debounce timer.
    pub fn notify(&self, snapshot: ProjectRecord) {
        if self.tx.send(snapshot).is_err() {
            warn!("autosave task is gone; snapshot dropped");
        }
    }
}

/// Default debounce window from `AUTOSAVE_DEBOUNCE_MS`.
#[must_use]
pub fn default_debounce() -> Duration {
    Duration::from_millis(AUTOSAVE_DEBOUNCE_MS)
}

/// Spawn the background autosave task. Returns the engine-side handle and
/// the task handle for shutdown.
#[must_use]
pub fn spawn_autosave(
    repo: Arc<dyn ProjectRepository>,
    debounce: Duration,
) -> (AutosaveHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<ProjectRecord>();

    let task = tokio::spawn(async move {
        let mut pending: Option<ProjectRecord> = None;
        loop {
            match pending.take() {
                // Idle: wait for the first snapshot after quiescence.
                None => match rx.recv().await {
                    Some(snapshot) => pending = Some(snapshot),
                    None => return,
                },
                // Armed: a newer snapshot resets the timer; the timer firing
                // flushes the latest and returns to idle.
                Some(latest) => {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(snapshot) => pending = Some(snapshot),
                            None => {
                                flush(repo.as_ref(), &latest).await;
                                return;
                            }
                        },
                        () = tokio::time::sleep(debounce) => {
                            flush(repo.as_ref(), &latest).await;
                        }
                    }
                }
            }
        }
    });

    (AutosaveHandle { tx }, task)
}

async fn flush(repo: &dyn ProjectRepository, snapshot: &ProjectRecord) {
    if let Err(e) = repo.save_project(snapshot).await {
        error!(error = %e, project_id = %snapshot.id, "autosave flush failed");
    }
}

#[cfg(test)]
#[path = "autosave_test.rs"]
mod autosave_test;
