//! Editor state store: one authoritative tree, mutated only through actions.
//!
//! DESIGN
//! ======
//! [`EditorState`] owns the `sections` and `components` collections plus the
//! id-based selection. Every mutation goes through [`EditorState::apply`]
//! with a named [`Action`]; rendering code reads the current snapshot and
//! never mutates entries directly.
//!
//! ERROR HANDLING
//! ==============
//! The reducer never panics and never returns an error. An action that
//! references an unknown id or template key applies as a silent no-op: UI
//! events routinely arrive after their target was deleted (a stale drag
//! session, a double delete) and must not crash the editor. Before a project
//! is loaded, `SetProject` is the only action that applies.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::catalog::{ComponentDefinition, Registry};
use crate::consts::SECTION_FALLBACK_HEIGHT;
use crate::element::{Component, ElementId, ElementKind, ElementRef, Section, SectionHeight};
use crate::geometry::{self, Position, SectionPosition};

// =============================================================================
// ACTIONS
// =============================================================================

/// The full mutation vocabulary of the editor. Each action applies
/// atomically: it either fully updates the state or leaves it untouched.
#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the whole project payload (initial load). The only action
    /// accepted before a project exists.
    SetProject { id: Uuid, name: String, sections: Vec<Section>, components: Vec<Component> },

    /// Clone a section template onto the page at the next stacking offset.
    /// Unknown or non-section keys are no-ops.
    AddSection { key: String, height: Option<SectionHeight> },

    /// Clone a component template at a caller-supplied position. Unknown or
    /// non-component keys are no-ops.
    AddComponent { key: String, position: Position },

    /// Remove a section; clears selection when it pointed at `id`.
    RemoveSection { id: ElementId },

    /// Remove a component; clears selection when it pointed at `id`.
    RemoveComponent { id: ElementId },

    /// Full-object replace by matching id.
    UpdateSection(Box<Section>),

    /// Full-object replace by matching id.
    UpdateComponent(Box<Component>),

    /// Select the element with this id, or clear the selection when the id
    /// is `None` or matches nothing.
    SelectElement { id: Option<ElementId> },

    /// Position-only patch, used by drag end.
    UpdateComponentPosition { id: ElementId, position: Position },

    /// Position-only patch, used by drag end.
    UpdateSectionPosition { id: ElementId, position: SectionPosition },

    /// Deep-set a dotted property path on the currently selected element.
    /// No-op when nothing is selected.
    UpdateSelectedProperty { path: String, value: serde_json::Value },

    /// Replace the `custom_props` map wholesale for the given id, in
    /// whichever collection holds it.
    UpdateCustomProps { id: ElementId, custom_props: serde_json::Value },
}

// =============================================================================
// STATE
// =============================================================================

/// The authoritative editor tree and its transient selection.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Loaded project id; `None` until `SetProject` applies.
    pub project_id: Option<Uuid>,
    /// Loaded project name.
    pub project_name: String,
    /// Full-width rows in insertion order, conceptually stacked top to
    /// bottom.
    pub sections: Vec<Section>,
    /// Freely positioned leaves.
    pub components: Vec<Component>,
    /// Currently selected element id. The displayed object is derived by
    /// lookup on every read, never cached.
    pub selected_id: Option<ElementId>,
    /// True while a project load is in flight.
    pub is_loading: bool,
    /// Last project I/O failure, surfaced to the host UI. Cleared by the
    /// next successful load.
    pub error: Option<String>,
    registry: Arc<Registry>,
}

impl EditorState {
    /// Create an empty, not-yet-loaded state over an injected registry.
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            project_id: None,
            project_name: String::new(),
            sections: Vec::new(),
            components: Vec::new(),
            selected_id: None,
            is_loading: false,
            error: None,
            registry,
        }
    }

    /// The injected, read-only template registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // --- Queries ---

    /// Look up an element in either collection.
    #[must_use]
    pub fn find_element(&self, id: ElementId) -> Option<ElementRef<'_>> {
        if let Some(section) = self.sections.iter().find(|s| s.id == id) {
            return Some(ElementRef::Section(section));
        }
        self.components
            .iter()
            .find(|c| c.id == id)
            .map(ElementRef::Component)
    }

    /// Which collection holds `id`, if any.
    #[must_use]
    pub fn element_kind(&self, id: ElementId) -> Option<ElementKind> {
        self.find_element(id).map(|e| e.kind())
    }

    /// The currently selected element, derived by lookup.
    #[must_use]
    pub fn selected_element(&self) -> Option<ElementRef<'_>> {
        self.selected_id.and_then(|id| self.find_element(id))
    }

    // --- Reducer ---

    /// Apply one action. Never panics; unknown ids and keys are no-ops.
    pub fn apply(&mut self, action: Action) {
        if self.project_id.is_none() && !matches!(action, Action::SetProject { .. }) {
            debug!("action dropped: no project loaded");
            return;
        }

        match action {
            Action::SetProject { id, name, sections, components } => {
                self.set_project(id, name, sections, components);
            }
            Action::AddSection { key, height } => self.add_section(&key, height),
            Action::AddComponent { key, position } => self.add_component(&key, position),
            Action::RemoveSection { id } => self.remove_section(id),
            Action::RemoveComponent { id } => self.remove_component(id),
            Action::UpdateSection(section) => self.update_section(*section),
            Action::UpdateComponent(component) => self.update_component(*component),
            Action::SelectElement { id } => self.select_element(id),
            Action::UpdateComponentPosition { id, position } => {
                self.update_component_position(id, position);
            }
            Action::UpdateSectionPosition { id, position } => {
                self.update_section_position(id, position);
            }
            Action::UpdateSelectedProperty { path, value } => {
                self.update_selected_property(&path, value);
            }
            Action::UpdateCustomProps { id, custom_props } => {
                self.update_custom_props(id, custom_props);
            }
        }
    }

    // --- Handlers ---

    fn set_project(&mut self, id: Uuid, name: String, sections: Vec<Section>, components: Vec<Component>) {
        self.project_id = Some(id);
        self.project_name = name;
        self.sections = sections;
        self.components = components;
        self.selected_id = None;
        self.is_loading = false;
        self.error = None;
    }

    fn add_section(&mut self, key: &str, height: Option<SectionHeight>) {
        let Some(def) = self.registry.get(key) else {
            debug!(%key, "add_section: unknown template key");
            return;
        };
        if !def.is_section() {
            debug!(%key, "add_section: template is not a section");
            return;
        }

        let y = geometry::next_available_y(&self.sections);
        let height = height
            .unwrap_or(SectionHeight::Fixed(def.min_height.unwrap_or(SECTION_FALLBACK_HEIGHT)));
        let section = instantiate_section(def, y, height);
        self.sections.push(section);
    }

    fn add_component(&mut self, key: &str, position: Position) {
        let Some(def) = self.registry.get(key) else {
            debug!(%key, "add_component: unknown template key");
            return;
        };
        if def.is_section() {
            debug!(%key, "add_component: template is a section");
            return;
        }

        let component = instantiate_component(def, position);
        self.components.push(component);
    }

    fn remove_section(&mut self, id: ElementId) {
        self.sections.retain(|s| s.id != id);
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
    }

    fn remove_component(&mut self, id: ElementId) {
        self.components.retain(|c| c.id != id);
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
    }

    fn update_section(&mut self, section: Section) {
        if let Some(slot) = self.sections.iter_mut().find(|s| s.id == section.id) {
            *slot = section;
        }
    }

    fn update_component(&mut self, component: Component) {
        if let Some(slot) = self.components.iter_mut().find(|c| c.id == component.id) {
            *slot = component;
        }
    }

    fn select_element(&mut self, id: Option<ElementId>) {
        self.selected_id = id.filter(|id| self.find_element(*id).is_some());
    }

    fn update_component_position(&mut self, id: ElementId, position: Position) {
        if let Some(component) = self.components.iter_mut().find(|c| c.id == id) {
            component.position = position;
        }
    }

    fn update_section_position(&mut self, id: ElementId, position: SectionPosition) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.id == id) {
            section.position = position;
        }
    }

    fn update_selected_property(&mut self, path: &str, value: serde_json::Value) {
        let Some(id) = self.selected_id else {
            debug!("update_selected_property: nothing selected");
            return;
        };
        if let Some(section) = self.sections.iter_mut().find(|s| s.id == id) {
            deep_set(&mut section.properties, path, value);
        } else if let Some(component) = self.components.iter_mut().find(|c| c.id == id) {
            deep_set(&mut component.properties, path, value);
        }
    }

    fn update_custom_props(&mut self, id: ElementId, custom_props: serde_json::Value) {
        if let Some(component) = self.components.iter_mut().find(|c| c.id == id) {
            component.custom_props = Some(custom_props);
        } else if let Some(section) = self.sections.iter_mut().find(|s| s.id == id) {
            section.custom_props = Some(custom_props);
        }
    }
}

// =============================================================================
// TEMPLATE INSTANTIATION
// =============================================================================

fn instantiate_section(def: &ComponentDefinition, y: f64, height: SectionHeight) -> Section {
    Section {
        id: Uuid::new_v4(),
        name: def.name.clone(),
        kind: def.kind.clone(),
        category: def.category.clone(),
        properties: def.properties.clone(),
        position: SectionPosition::new(y),
        height,
        path: def.path.clone(),
        custom_props: None,
    }
}

fn instantiate_component(def: &ComponentDefinition, position: Position) -> Component {
    Component {
        id: Uuid::new_v4(),
        name: def.name.clone(),
        kind: def.kind.clone(),
        category: def.category.clone(),
        properties: def.properties.clone(),
        position,
        path: def.path.clone(),
        custom_props: None,
    }
}

// =============================================================================
// DEEP SET
// =============================================================================

/// Set a dotted path inside a JSON value, creating intermediate objects as
/// needed. Non-object values along the path are replaced with objects. An
/// empty path is a no-op.
fn deep_set(target: &mut serde_json::Value, path: &str, value: serde_json::Value) {
    if path.is_empty() {
        return;
    }
    match path.split_once('.') {
        None => {
            ensure_object(target);
            if let Some(map) = target.as_object_mut() {
                map.insert(path.to_owned(), value);
            }
        }
        Some((head, rest)) => {
            ensure_object(target);
            if let Some(map) = target.as_object_mut() {
                let child = map.entry(head.to_owned()).or_insert(serde_json::Value::Null);
                deep_set(child, rest, value);
            }
        }
    }
}

fn ensure_object(value: &mut serde_json::Value) {
    if !value.is_object() {
        *value = serde_json::Value::Object(serde_json::Map::new());
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
