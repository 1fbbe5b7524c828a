//! Editor engine: the composition root a host UI embeds.
//!
//! DESIGN
//! ======
//! [`EditorEngine`] owns the state store and the drag controller, forwards
//! pointer events, and snapshots the project to the autosave service after
//! every content mutation. Project I/O runs against an injected
//! [`ProjectRepository`]; failures surface as the store's `error` and
//! `is_loading` flags rather than propagating, and no automatic retry is
//! attempted — the next user edit or manual reload is the recovery path.
//!
//! Everything here is single-threaded and synchronous except the repository
//! calls; all reducer actions run to completion within one dispatch.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::catalog::Registry;
use crate::drag::DragController;
use crate::element::ElementId;
use crate::geometry::Position;
use crate::services::autosave::AutosaveHandle;
use crate::services::project::{ProjectRecord, ProjectRepository};
use crate::store::{Action, EditorState};

/// The full headless editor. Hosts read rendering state from `state` and
/// feed pointer/palette events through the methods below.
pub struct EditorEngine {
    pub state: EditorState,
    pub drag: DragController,
    autosave: Option<AutosaveHandle>,
}

impl EditorEngine {
    /// Create an engine over an injected registry, with autosave detached.
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { state: EditorState::new(registry), drag: DragController::new(), autosave: None }
    }

    /// Attach the autosave handle. Subsequent content mutations queue
    /// debounced snapshots.
    #[must_use]
    pub fn with_autosave(mut self, handle: AutosaveHandle) -> Self {
        self.autosave = Some(handle);
        self
    }

    // --- Actions ---

    /// Apply a store action and queue an autosave snapshot.
    pub fn apply(&mut self, action: Action) {
        self.state.apply(action);
        self.queue_snapshot();
    }

    // --- Pointer events ---

    /// Pointer-down over an existing element: select it and open a drag
    /// session. Selection is transient, so no snapshot is queued.
    pub fn pointer_down_on(&mut self, id: ElementId, at: Position) {
        self.drag.begin_existing(&mut self.state, id, at);
    }

    /// Pointer-down over a palette entry.
    pub fn palette_drag_start(&mut self, at: Position) {
        self.drag.begin_palette(at);
    }

    /// Drop at `point`, optionally carrying a palette payload.
    pub fn drop_at(&mut self, point: Position, payload: Option<&str>) {
        self.drag.complete_drop(&mut self.state, point, payload);
        self.queue_snapshot();
    }

    /// Delete an element by id, whichever collection holds it.
    pub fn delete_element(&mut self, id: ElementId) {
        self.drag.delete_element(&mut self.state, id);
        self.queue_snapshot();
    }

    // --- Project I/O ---

    /// Load a project into the store. Sets `is_loading` for the duration
    /// and surfaces failure as the store `error` flag.
    pub async fn load_project(&mut self, repo: &dyn ProjectRepository, id: Uuid) {
        self.state.is_loading = true;
        self.state.error = None;

        match repo.load_project(id).await {
            Ok(record) => {
                info!(project_id = %record.id, sections = record.sections.len(),
                      components = record.components.len(), "project loaded");
                self.state.apply(Action::SetProject {
                    id: record.id,
                    name: record.name,
                    sections: record.sections,
                    components: record.components,
                });
            }
            Err(e) => {
                self.state.is_loading = false;
                self.state.error = Some(e.to_string());
            }
        }
    }

    /// Save the current project immediately, bypassing the debounce.
    /// Failure surfaces as the store `error` flag.
    pub async fn save_project(&mut self, repo: &dyn ProjectRepository) {
        let Some(snapshot) = self.snapshot() else {
            return;
        };
        if let Err(e) = repo.save_project(&snapshot).await {
            self.state.error = Some(e.to_string());
        }
    }

    /// The current project payload, or `None` before a project is loaded.
    #[must_use]
    pub fn snapshot(&self) -> Option<ProjectRecord> {
        let id = self.state.project_id?;
        Some(ProjectRecord {
            id,
            name: self.state.project_name.clone(),
            sections: self.state.sections.clone(),
            components: self.state.components.clone(),
        })
    }

    fn queue_snapshot(&self) {
        if let Some(handle) = &self.autosave {
            if let Some(snapshot) = self.snapshot() {
                handle.notify(snapshot);
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;
