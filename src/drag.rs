//! Drag/drop controller: pointer events in, store actions out.
//!
//! DESIGN
//! ======
//! The controller tracks one ephemeral drag session between pointer-down and
//! drop. A session over an existing element carries its id; a palette drag
//! carries none and is identified at drop time by the payload string
//! `"{type}-{category}-{name}"` from the drag-data channel. The session is
//! taken out of the controller at the top of the drop handler, so cleanup is
//! guaranteed on every branch — including the no-op branches for malformed
//! payloads and stale element ids.

use crate::catalog::SECTIONS_KIND;
use crate::consts::{GRID_SIZE, SECTION_FALLBACK_HEIGHT};
use crate::element::{ElementId, ElementKind, SectionHeight};
use crate::geometry::{self, Position, SectionPosition};
use crate::store::{Action, EditorState};

/// The palette drag payload, split into its three segments.
///
/// The only contract with the raw format is: split on `-`, treat the first
/// segment as the type. The trailing segment keeps any further dashes, so
/// entry names like `sign-up` survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteKey<'a> {
    pub kind: &'a str,
    pub category: &'a str,
    pub name: &'a str,
}

impl<'a> PaletteKey<'a> {
    /// Parse a raw payload. Returns `None` unless all three segments are
    /// present and non-empty.
    #[must_use]
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut parts = raw.splitn(3, '-');
        let kind = parts.next()?;
        let category = parts.next()?;
        let name = parts.next()?;
        if kind.is_empty() || category.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self { kind, category, name })
    }

    /// Whether this payload names a section template.
    #[must_use]
    pub fn is_section(&self) -> bool {
        self.kind == SECTIONS_KIND
    }
}

/// Ephemeral state of one drag gesture. Never persisted.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    /// Pointer position at drag start.
    pub start: Position,
    /// Id of the dragged element; `None` for a palette drag.
    pub element_id: Option<ElementId>,
}

/// Translates drag gestures into placement math and store actions.
#[derive(Debug)]
pub struct DragController {
    session: Option<DragSession>,
    grid: f64,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::with_grid(GRID_SIZE)
    }

    /// Controller with a custom grid pitch. A non-positive grid disables
    /// snapping.
    #[must_use]
    pub fn with_grid(grid: f64) -> Self {
        Self { session: None, grid }
    }

    /// Whether a drag session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Drag start over an existing element: select it and record the
    /// session.
    pub fn begin_existing(&mut self, state: &mut EditorState, id: ElementId, at: Position) {
        state.apply(Action::SelectElement { id: Some(id) });
        self.session = Some(DragSession { start: at, element_id: Some(id) });
    }

    /// Drag start from the palette. The payload arrives at drop time.
    pub fn begin_palette(&mut self, at: Position) {
        self.session = Some(DragSession { start: at, element_id: None });
    }

    /// Abandon the active session without dispatching anything.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Drop handler. Moves an existing element when a session for one is
    /// active; otherwise instantiates the palette payload. Malformed
    /// payloads and unknown templates drop as no-ops. The session is cleared
    /// on every branch.
    pub fn complete_drop(&mut self, state: &mut EditorState, drop_point: Position, payload: Option<&str>) {
        let session = self.session.take();

        if let Some(id) = session.and_then(|s| s.element_id) {
            self.move_existing(state, id, drop_point);
            return;
        }

        let Some(raw) = payload else { return };
        let Some(key) = PaletteKey::parse(raw) else { return };

        if key.is_section() {
            let height = state
                .registry()
                .get(raw)
                .map(|def| SectionHeight::Fixed(def.min_height.unwrap_or(SECTION_FALLBACK_HEIGHT)));
            state.apply(Action::AddSection { key: raw.to_owned(), height });
        } else {
            let position = geometry::snap_position(drop_point, self.grid);
            state.apply(Action::AddComponent { key: raw.to_owned(), position });
        }
    }

    /// Delete an element, dispatching the removal that matches its kind.
    pub fn delete_element(&self, state: &mut EditorState, id: ElementId) {
        match state.element_kind(id) {
            Some(ElementKind::Section) => state.apply(Action::RemoveSection { id }),
            Some(ElementKind::Component) => state.apply(Action::RemoveComponent { id }),
            None => {}
        }
    }

    fn move_existing(&self, state: &mut EditorState, id: ElementId, drop_point: Position) {
        match state.element_kind(id) {
            Some(ElementKind::Section) => {
                let y = geometry::snap_to_grid(drop_point.y, self.grid);
                state.apply(Action::UpdateSectionPosition { id, position: SectionPosition::new(y) });
            }
            Some(ElementKind::Component) => {
                let position = geometry::snap_position(drop_point, self.grid);
                state.apply(Action::UpdateComponentPosition { id, position });
            }
            // Stale session: the element was deleted mid-drag.
            None => {}
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;
