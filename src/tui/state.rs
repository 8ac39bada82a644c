//! TUI state: the document being paged, the paginator, and input focus.
//!
//! The terminal plays the part of the page: `Document` holds the table,
//! the pager strip and the filter form, and the `Paginator` mutates it.
//! Rendering only reads this; the transition function is the only writer.

use crossterm::event::KeyEvent;

use crate::dom::{Document, PagerDom};
use crate::paginator::Paginator;
use crate::types::PagerConfig;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// The terminal was resized; redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Where keystrokes go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    /// Keys page through the table.
    #[default]
    Table,
    /// Keys edit the filter text. Carries the uncommitted draft.
    Filter { draft: String },
}

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Table, pager strip and form inputs.
    pub doc: Document,
    /// Paging state applied to `doc`.
    pub pager: Paginator,
    /// Current input focus.
    pub focus: Focus,
    /// Last problem worth showing (e.g. a rejected page size).
    pub status: Option<String>,
    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    /// Wrap a document and run the initial page setup.
    pub fn new(mut doc: Document, config: PagerConfig) -> Self {
        let mut pager = Paginator::new(config);
        pager.initialize(&mut doc);
        App {
            doc,
            pager,
            focus: Focus::Table,
            status: None,
            should_quit: false,
        }
    }

    /// Rows-per-page value currently in the selector.
    pub fn page_size_input(&self) -> String {
        self.doc.page_size_value()
    }

    pub fn is_editing_filter(&self) -> bool {
        matches!(self.focus, Focus::Filter { .. })
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Click `prev`.
    PrevPage,
    /// Click `next`.
    NextPage,
    FirstPage,
    LastPage,
    /// Click the n-th visible page number (1-based).
    JumpToSlot(u8),
    /// Select the next larger rows-per-page option.
    GrowPageSize,
    /// Select the next smaller rows-per-page option.
    ShrinkPageSize,
    /// Focus the filter input.
    EditFilter,
    /// Type a character into the filter draft.
    FilterInput(char),
    /// Delete the last character of the filter draft.
    FilterBackspace,
    /// Commit the draft and re-initialize the pager.
    ApplyFilter,
    /// Leave the filter input, discarding the draft.
    CancelFilter,
    /// Reset the form to its initial values.
    ResetForm,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of handling an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep running; redraw.
    Continue,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TESTS
// ============================================================================
