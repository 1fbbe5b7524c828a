//! Placement math: pure, side-effect-free helpers for grid snapping,
//! section stacking, and container clamping.
//!
//! All values are design pixels at 1.0 zoom. Nothing in this module touches
//! editor state; the drag controller calls these and dispatches the results
//! as store actions.

use serde::{Deserialize, Serialize};

use crate::element::Section;

/// A free 2-D position for components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A vertical-only position for sections, which are full-bleed rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionPosition {
    pub y: f64,
}

impl SectionPosition {
    #[must_use]
    pub fn new(y: f64) -> Self {
        Self { y }
    }
}

/// A width/height pair used for clamping bounding boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Round `value` to the nearest multiple of `grid`.
///
/// Idempotent: `snap_to_grid(snap_to_grid(v, g), g) == snap_to_grid(v, g)`.
/// A non-positive grid disables snapping and returns `value` unchanged.
#[must_use]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return value;
    }
    (value / grid).round() * grid
}

/// Snap both axes of a position to the grid.
#[must_use]
pub fn snap_position(position: Position, grid: f64) -> Position {
    Position { x: snap_to_grid(position.x, grid), y: snap_to_grid(position.y, grid) }
}

/// The vertical offset where the next section should be placed.
///
/// Returns `0.0` when `sections` is empty, otherwise the last section's
/// `y + effective_height`. The offset depends only on the sections already
/// present; the incoming section's own height never shifts its insertion
/// point.
#[must_use]
pub fn next_available_y(sections: &[Section]) -> f64 {
    match sections.last() {
        Some(last) => last.position.y + last.effective_height(),
        None => 0.0,
    }
}

/// Constrain `position` so an element of `element` size stays fully inside a
/// container of `container` size on both axes.
///
/// An element larger than its container pins to the origin on that axis.
#[must_use]
pub fn clamp_to_container(position: Position, element: Size, container: Size) -> Position {
    let max_x = (container.width - element.width).max(0.0);
    let max_y = (container.height - element.height).max(0.0);
    Position { x: position.x.clamp(0.0, max_x), y: position.y.clamp(0.0, max_y) }
}

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;
