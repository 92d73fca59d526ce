//! UI-agnostic view models.
//!
//! These types carry presentation data without depending on a rendering
//! framework. The TUI maps style classes to ratatui styles; a web frontend
//! would map them to CSS classes.

pub mod details;

/// Row-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Warning level (TUI: yellow). OOM kills.
    Warning,
    /// Dimmed (TUI: dark gray). Cosmetic stagger on alternate rows.
    Dimmed,
}

/// One rendered row: cell text plus a style class.
#[derive(Debug, Clone)]
pub struct ViewRow {
    pub cells: Vec<String>,
    pub style: RowStyleClass,
}
