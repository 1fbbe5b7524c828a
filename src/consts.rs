//! Shared numeric constants for the editor engine.

// ── Placement ───────────────────────────────────────────────────

/// Grid pitch in design pixels at 1.0 zoom. Dropped elements snap to
/// multiples of this.
pub const GRID_SIZE: f64 = 10.0;

/// Stacking height, in design pixels, assumed for sections whose height is
/// `auto` or `full` rather than a fixed number.
pub const SECTION_FALLBACK_HEIGHT: f64 = 400.0;

/// Canvas width in design pixels at 1.0 zoom. Sections span this full width;
/// component drags are clamped against it.
pub const CANVAS_WIDTH: f64 = 1280.0;

// ── Persistence ─────────────────────────────────────────────────

/// Quiescence window for the debounced autosave task, in milliseconds. The
/// timer resets on every edit; only the latest snapshot is written.
pub const AUTOSAVE_DEBOUNCE_MS: u64 = 2000;
