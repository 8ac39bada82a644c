//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Cyan: interactive elements (live pager arrows, selector)
//! - Inverted cyan: the active page
//! - Dim: de-emphasized (dead arrows, hints)
//! - Red: rejected input

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Interactive element / keybinding hint: cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Rejected input / error message: red.
pub const STYLE_ERROR: Style = Style::new().fg(Color::Red);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Table column headings.
pub const STYLE_HEADER: Style = Style::new()
    .add_modifier(Modifier::BOLD)
    .add_modifier(Modifier::UNDERLINED);

/// The active page number.
pub const STYLE_ACTIVE_PAGE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// A pager arrow with nowhere to go.
pub const STYLE_DISABLED: Style = Style::new().fg(Color::DarkGray);

/// Filter input at rest.
pub const STYLE_INPUT: Style = Style::new().fg(Color::White);

/// Filter input while typing.
pub const STYLE_INPUT_FOCUSED: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
