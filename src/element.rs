//! Document model: the placeable elements of a page and their wire shape.
//!
//! DESIGN
//! ======
//! A page is two collections: `sections` (full-width rows stacked top to
//! bottom) and `components` (freely positioned leaves). Both carry an open
//! `properties` JSON bag the store never inspects, plus an optional
//! `custom_props` bag of user overrides layered on top. Section vs component
//! is an explicit tagged distinction (`ElementKind` / `ElementRef`), never
//! inferred from field presence.
//!
//! Field names serialize in camelCase to match the persisted project JSON.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::SECTION_FALLBACK_HEIGHT;
use crate::geometry::{Position, SectionPosition};

/// Unique identifier for a section or component.
pub type ElementId = Uuid;

/// A freely positioned leaf element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Unique, stable id assigned at creation.
    pub id: ElementId,
    /// Display name from the registry template.
    pub name: String,
    /// Palette group this element came from (e.g. `"components"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Palette category within the group (e.g. `"shadcn"`).
    pub category: String,
    /// Open render-time props. Opaque to the store.
    pub properties: serde_json::Value,
    /// Placement in design pixels.
    pub position: Position,
    /// Registry lookup key for the renderable module.
    pub path: String,
    /// User overrides layered on top of `properties`. Replaced wholesale,
    /// never merged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Value>,
}

/// Declared height of a section.
///
/// Serializes as a bare number for [`SectionHeight::Fixed`] and as the
/// strings `"auto"` / `"full"` for the named variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionHeight {
    Fixed(f64),
    Named(NamedHeight),
}

/// Keyword heights resolved by the host renderer, not the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedHeight {
    Auto,
    Full,
}

impl SectionHeight {
    /// Height used for stacking math. Named heights have no pixel meaning in
    /// the headless engine and resolve to the fallback constant.
    #[must_use]
    pub fn effective(self) -> f64 {
        match self {
            Self::Fixed(h) => h,
            Self::Named(_) => SECTION_FALLBACK_HEIGHT,
        }
    }
}

/// A full-bleed horizontal row of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique, stable id assigned at creation.
    pub id: ElementId,
    /// Display name from the registry template.
    pub name: String,
    /// Palette group this element came from (always `"sections"` for stock
    /// templates).
    #[serde(rename = "type")]
    pub kind: String,
    /// Palette category within the group.
    pub category: String,
    /// Open render-time props. Opaque to the store.
    pub properties: serde_json::Value,
    /// Vertical placement; sections span the full canvas width.
    pub position: SectionPosition,
    /// Declared height.
    pub height: SectionHeight,
    /// Registry lookup key for the renderable module.
    pub path: String,
    /// User overrides layered on top of `properties`. Replaced wholesale,
    /// never merged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Value>,
}

impl Section {
    /// Height used for stacking math.
    #[must_use]
    pub fn effective_height(&self) -> f64 {
        self.height.effective()
    }
}

/// Which collection an element lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Section,
    Component,
}

/// A tagged borrowed view over either collection.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Section(&'a Section),
    Component(&'a Component),
}

impl ElementRef<'_> {
    /// The element's id, regardless of kind.
    #[must_use]
    pub fn id(&self) -> ElementId {
        match self {
            Self::Section(s) => s.id,
            Self::Component(c) => c.id,
        }
    }

    /// The element's tagged kind.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Section(_) => ElementKind::Section,
            Self::Component(_) => ElementKind::Component,
        }
    }

    /// The element's registry path.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Section(s) => &s.path,
            Self::Component(c) => &c.path,
        }
    }
}

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;
