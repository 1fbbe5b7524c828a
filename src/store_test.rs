#![allow(clippy::float_cmp)]

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use super::*;
use crate::element::NamedHeight;

fn registry() -> Arc<Registry> {
    Arc::new(Registry::with_default_catalog())
}

/// A state with an empty project already loaded.
fn fresh_state() -> EditorState {
    let mut state = EditorState::new(registry());
    state.apply(Action::SetProject {
        id: Uuid::new_v4(),
        name: "landing".into(),
        sections: Vec::new(),
        components: Vec::new(),
    });
    state
}

fn add_component_at(state: &mut EditorState, x: f64, y: f64) -> ElementId {
    state.apply(Action::AddComponent {
        key: "components-shadcn-button".into(),
        position: Position::new(x, y),
    });
    state.components.last().unwrap().id
}

fn add_section(state: &mut EditorState) -> ElementId {
    state.apply(Action::AddSection { key: "sections-layout-hero".into(), height: None });
    state.sections.last().unwrap().id
}

// =============================================================
// Pre-load gating
// =============================================================

#[test]
fn actions_before_set_project_are_noops() {
    let mut state = EditorState::new(registry());
    state.apply(Action::AddComponent {
        key: "components-shadcn-button".into(),
        position: Position::new(0.0, 0.0),
    });
    state.apply(Action::AddSection { key: "sections-layout-hero".into(), height: None });
    state.apply(Action::SelectElement { id: Some(Uuid::new_v4()) });

    assert!(state.project_id.is_none());
    assert!(state.components.is_empty());
    assert!(state.sections.is_empty());
    assert!(state.selected_id.is_none());
}

#[test]
fn set_project_is_accepted_first() {
    let mut state = EditorState::new(registry());
    let id = Uuid::new_v4();
    state.apply(Action::SetProject {
        id,
        name: "landing".into(),
        sections: Vec::new(),
        components: Vec::new(),
    });
    assert_eq!(state.project_id, Some(id));
    assert_eq!(state.project_name, "landing");
}

#[test]
fn set_project_replaces_payload_and_clears_transients() {
    let mut state = fresh_state();
    let selected = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::SelectElement { id: Some(selected) });
    state.error = Some("stale error".into());
    state.is_loading = true;

    let id = Uuid::new_v4();
    state.apply(Action::SetProject {
        id,
        name: "relaunch".into(),
        sections: Vec::new(),
        components: Vec::new(),
    });

    assert_eq!(state.project_id, Some(id));
    assert!(state.components.is_empty());
    assert!(state.selected_id.is_none());
    assert!(!state.is_loading);
    assert!(state.error.is_none());
}

// =============================================================
// AddSection
// =============================================================

#[test]
fn add_section_appends_at_next_offset() {
    let mut state = fresh_state();
    add_section(&mut state);
    assert_eq!(state.sections.len(), 1);
    assert_eq!(state.sections[0].position.y, 0.0);

    // hero declares a 600px minimum; the next section stacks below it
    add_section(&mut state);
    assert_eq!(state.sections[1].position.y, 600.0);
}

#[test]
fn add_section_defaults_height_to_template_min() {
    let mut state = fresh_state();
    add_section(&mut state);
    assert_eq!(state.sections[0].height, SectionHeight::Fixed(600.0));
}

#[test]
fn add_section_honors_explicit_height() {
    let mut state = fresh_state();
    state.apply(Action::AddSection {
        key: "sections-layout-hero".into(),
        height: Some(SectionHeight::Named(NamedHeight::Full)),
    });
    assert_eq!(state.sections[0].height, SectionHeight::Named(NamedHeight::Full));
}

#[test]
fn add_section_unknown_key_is_noop() {
    let mut state = fresh_state();
    state.apply(Action::AddSection { key: "sections-layout-missing".into(), height: None });
    assert!(state.sections.is_empty());
}

#[test]
fn add_section_rejects_component_template() {
    let mut state = fresh_state();
    state.apply(Action::AddSection { key: "components-shadcn-button".into(), height: None });
    assert!(state.sections.is_empty());
    assert!(state.components.is_empty());
}

#[test]
fn add_section_clones_template_fields() {
    let mut state = fresh_state();
    add_section(&mut state);
    let section = &state.sections[0];
    assert_eq!(section.name, "hero");
    assert_eq!(section.kind, "sections");
    assert_eq!(section.category, "layout");
    assert_eq!(section.path, "hero");
    assert_eq!(section.properties, json!({}));
    assert!(section.custom_props.is_none());
}

// =============================================================
// AddComponent
// =============================================================

#[test]
fn add_component_uses_caller_position() {
    let mut state = fresh_state();
    add_component_at(&mut state, 37.0, 53.0);
    // the store applies positions verbatim; snapping belongs to the controller
    assert_eq!(state.components[0].position, Position::new(37.0, 53.0));
}

#[test]
fn add_component_unknown_key_is_noop() {
    let mut state = fresh_state();
    state.apply(Action::AddComponent {
        key: "components-shadcn-missing".into(),
        position: Position::new(0.0, 0.0),
    });
    assert!(state.components.is_empty());
}

#[test]
fn add_component_rejects_section_template() {
    let mut state = fresh_state();
    state.apply(Action::AddComponent {
        key: "sections-layout-hero".into(),
        position: Position::new(0.0, 0.0),
    });
    assert!(state.components.is_empty());
    assert!(state.sections.is_empty());
}

#[test]
fn added_elements_have_unique_ids() {
    let mut state = fresh_state();
    let mut ids = Vec::new();
    for _ in 0..10 {
        ids.push(add_component_at(&mut state, 0.0, 0.0));
        ids.push(add_section(&mut state));
    }
    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[test]
fn template_is_not_mutated_by_instantiation() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::SelectElement { id: Some(id) });
    state.apply(Action::UpdateSelectedProperty { path: "label".into(), value: json!("Buy") });

    // the registry template keeps its empty defaults
    let def = state.registry().get("components-shadcn-button").unwrap();
    assert_eq!(def.properties, json!({}));

    // and a second instantiation starts clean
    let second = add_component_at(&mut state, 10.0, 10.0);
    let second = state.components.iter().find(|c| c.id == second).unwrap();
    assert_eq!(second.properties, json!({}));
}

// =============================================================
// Remove
// =============================================================

#[test]
fn remove_component_filters_it_out() {
    let mut state = fresh_state();
    let a = add_component_at(&mut state, 0.0, 0.0);
    let b = add_component_at(&mut state, 10.0, 10.0);
    state.apply(Action::RemoveComponent { id: a });
    assert_eq!(state.components.len(), 1);
    assert_eq!(state.components[0].id, b);
}

#[test]
fn remove_section_filters_it_out() {
    let mut state = fresh_state();
    let a = add_section(&mut state);
    state.apply(Action::RemoveSection { id: a });
    assert!(state.sections.is_empty());
}

#[test]
fn remove_selected_element_clears_selection() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::SelectElement { id: Some(id) });
    assert_eq!(state.selected_id, Some(id));

    state.apply(Action::RemoveComponent { id });
    assert!(state.selected_id.is_none());
}

#[test]
fn remove_selected_section_clears_selection() {
    let mut state = fresh_state();
    let id = add_section(&mut state);
    state.apply(Action::SelectElement { id: Some(id) });
    state.apply(Action::RemoveSection { id });
    assert!(state.selected_id.is_none());
}

#[test]
fn remove_other_element_keeps_selection() {
    let mut state = fresh_state();
    let keep = add_component_at(&mut state, 0.0, 0.0);
    let gone = add_component_at(&mut state, 10.0, 10.0);
    state.apply(Action::SelectElement { id: Some(keep) });
    state.apply(Action::RemoveComponent { id: gone });
    assert_eq!(state.selected_id, Some(keep));
}

#[test]
fn remove_unknown_id_is_noop() {
    let mut state = fresh_state();
    add_component_at(&mut state, 0.0, 0.0);
    add_section(&mut state);
    let before_sections = state.sections.clone();
    let before_components = state.components.clone();

    state.apply(Action::RemoveComponent { id: Uuid::new_v4() });
    state.apply(Action::RemoveSection { id: Uuid::new_v4() });

    assert_eq!(state.sections, before_sections);
    assert_eq!(state.components, before_components);
}

// =============================================================
// Update (full replace)
// =============================================================

#[test]
fn update_component_replaces_by_id() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    let mut replacement = state.components[0].clone();
    replacement.name = "primary-button".into();
    replacement.properties = json!({"label": "Go"});

    state.apply(Action::UpdateComponent(Box::new(replacement)));
    assert_eq!(state.components[0].id, id);
    assert_eq!(state.components[0].name, "primary-button");
    assert_eq!(state.components[0].properties, json!({"label": "Go"}));
}

#[test]
fn update_section_replaces_by_id() {
    let mut state = fresh_state();
    add_section(&mut state);
    let mut replacement = state.sections[0].clone();
    replacement.height = SectionHeight::Fixed(800.0);

    state.apply(Action::UpdateSection(Box::new(replacement)));
    assert_eq!(state.sections[0].height, SectionHeight::Fixed(800.0));
}

#[test]
fn update_unknown_element_is_noop() {
    let mut state = fresh_state();
    add_component_at(&mut state, 0.0, 0.0);
    let mut stranger = state.components[0].clone();
    stranger.id = Uuid::new_v4();
    stranger.name = "stranger".into();

    let before = state.components.clone();
    state.apply(Action::UpdateComponent(Box::new(stranger)));
    assert_eq!(state.components, before);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_existing_component() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::SelectElement { id: Some(id) });
    assert_eq!(state.selected_id, Some(id));
    assert_eq!(state.selected_element().unwrap().id(), id);
}

#[test]
fn select_existing_section() {
    let mut state = fresh_state();
    let id = add_section(&mut state);
    state.apply(Action::SelectElement { id: Some(id) });
    assert_eq!(state.selected_element().unwrap().kind(), ElementKind::Section);
}

#[test]
fn select_unknown_id_clears_selection() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::SelectElement { id: Some(id) });
    state.apply(Action::SelectElement { id: Some(Uuid::new_v4()) });
    assert!(state.selected_id.is_none());
}

#[test]
fn select_none_clears_selection() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::SelectElement { id: Some(id) });
    state.apply(Action::SelectElement { id: None });
    assert!(state.selected_id.is_none());
}

// =============================================================
// Position patches
// =============================================================

#[test]
fn update_component_position_patches_position_only() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    let before = state.components[0].clone();

    state.apply(Action::UpdateComponentPosition { id, position: Position::new(40.0, 50.0) });
    let after = &state.components[0];
    assert_eq!(after.position, Position::new(40.0, 50.0));
    assert_eq!(after.name, before.name);
    assert_eq!(after.properties, before.properties);
}

#[test]
fn update_section_position_patches_y() {
    let mut state = fresh_state();
    let id = add_section(&mut state);
    state.apply(Action::UpdateSectionPosition { id, position: SectionPosition::new(120.0) });
    assert_eq!(state.sections[0].position.y, 120.0);
}

#[test]
fn update_position_unknown_id_is_noop() {
    let mut state = fresh_state();
    add_component_at(&mut state, 5.0, 5.0);
    let before = state.components.clone();
    state.apply(Action::UpdateComponentPosition {
        id: Uuid::new_v4(),
        position: Position::new(99.0, 99.0),
    });
    assert_eq!(state.components, before);
}

// =============================================================
// UpdateSelectedProperty
// =============================================================

#[test]
fn selected_property_sets_top_level_key() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::SelectElement { id: Some(id) });
    state.apply(Action::UpdateSelectedProperty { path: "label".into(), value: json!("Buy now") });
    assert_eq!(state.components[0].properties, json!({"label": "Buy now"}));
}

#[test]
fn selected_property_deep_sets_nested_path() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::SelectElement { id: Some(id) });
    state.apply(Action::UpdateSelectedProperty {
        path: "style.colors.background".into(),
        value: json!("#112233"),
    });
    assert_eq!(
        state.components[0].properties,
        json!({"style": {"colors": {"background": "#112233"}}})
    );
}

#[test]
fn selected_property_preserves_sibling_keys() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::SelectElement { id: Some(id) });
    state.apply(Action::UpdateSelectedProperty { path: "style.color".into(), value: json!("red") });
    state.apply(Action::UpdateSelectedProperty { path: "style.size".into(), value: json!("lg") });
    assert_eq!(
        state.components[0].properties,
        json!({"style": {"color": "red", "size": "lg"}})
    );
}

#[test]
fn selected_property_applies_to_sections_too() {
    let mut state = fresh_state();
    let id = add_section(&mut state);
    state.apply(Action::SelectElement { id: Some(id) });
    state.apply(Action::UpdateSelectedProperty { path: "title".into(), value: json!("Welcome") });
    assert_eq!(state.sections[0].properties, json!({"title": "Welcome"}));
}

#[test]
fn selected_property_with_no_selection_is_noop() {
    let mut state = fresh_state();
    add_component_at(&mut state, 0.0, 0.0);
    let before = state.components.clone();
    state.apply(Action::UpdateSelectedProperty { path: "label".into(), value: json!("x") });
    assert_eq!(state.components, before);
}

#[test]
fn selected_property_overwrites_non_object_intermediate() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::SelectElement { id: Some(id) });
    state.apply(Action::UpdateSelectedProperty { path: "style".into(), value: json!("compact") });
    state.apply(Action::UpdateSelectedProperty { path: "style.color".into(), value: json!("red") });
    assert_eq!(state.components[0].properties, json!({"style": {"color": "red"}}));
}

// =============================================================
// UpdateCustomProps
// =============================================================

#[test]
fn custom_props_replace_not_merge() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::UpdateCustomProps { id, custom_props: json!({"color": "red"}) });
    state.apply(Action::UpdateCustomProps { id, custom_props: json!({"size": "lg"}) });
    // last write wins; this is a wholesale replace
    assert_eq!(state.components[0].custom_props, Some(json!({"size": "lg"})));
}

#[test]
fn custom_props_apply_to_sections() {
    let mut state = fresh_state();
    let id = add_section(&mut state);
    state.apply(Action::UpdateCustomProps { id, custom_props: json!({"theme": "dark"}) });
    assert_eq!(state.sections[0].custom_props, Some(json!({"theme": "dark"})));
}

#[test]
fn custom_props_unknown_id_is_noop() {
    let mut state = fresh_state();
    add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::UpdateCustomProps { id: Uuid::new_v4(), custom_props: json!({"x": 1}) });
    assert!(state.components[0].custom_props.is_none());
}

// =============================================================
// Queries
// =============================================================

#[test]
fn find_element_distinguishes_collections() {
    let mut state = fresh_state();
    let section = add_section(&mut state);
    let component = add_component_at(&mut state, 0.0, 0.0);

    assert_eq!(state.element_kind(section), Some(ElementKind::Section));
    assert_eq!(state.element_kind(component), Some(ElementKind::Component));
    assert_eq!(state.element_kind(Uuid::new_v4()), None);
}

#[test]
fn selected_element_is_none_after_delete() {
    let mut state = fresh_state();
    let id = add_component_at(&mut state, 0.0, 0.0);
    state.apply(Action::SelectElement { id: Some(id) });
    state.apply(Action::RemoveComponent { id });
    assert!(state.selected_element().is_none());
}

// =============================================================
// Injected registry
// =============================================================

#[test]
fn custom_catalog_drives_templates() {
    use crate::catalog::{Catalog, CatalogCategory, CatalogEntry, CatalogGroup};

    let catalog = Catalog {
        groups: vec![CatalogGroup {
            kind: "components".to_owned(),
            categories: vec![CatalogCategory {
                name: "custom".to_owned(),
                entries: vec![CatalogEntry::new("widget")],
            }],
        }],
    };
    let mut state = EditorState::new(Arc::new(Registry::new(&catalog)));
    state.apply(Action::SetProject {
        id: Uuid::new_v4(),
        name: "p".into(),
        sections: Vec::new(),
        components: Vec::new(),
    });

    state.apply(Action::AddComponent {
        key: "components-custom-widget".into(),
        position: Position::new(0.0, 0.0),
    });
    assert_eq!(state.components.len(), 1);
    assert_eq!(state.components[0].path, "widget");

    // the stock key does not exist in this registry
    state.apply(Action::AddComponent {
        key: "components-shadcn-button".into(),
        position: Position::new(0.0, 0.0),
    });
    assert_eq!(state.components.len(), 1);
}
