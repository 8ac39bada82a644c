//! State transitions: (App, Action) → Transition.
//!
//! Fully testable without a terminal. Page actions become pager events on
//! the document; everything else edits the form or the focus.

use tracing::debug;

use crate::dom::PagerDom;
use crate::paginator::PagerEvent;
use crate::types::{PageRef, PageSize};

use super::state::{Action, App, Focus, Transition};

/// Apply an action to the app.
pub fn update(app: &mut App, action: &Action) -> Transition {
    if *action == Action::Quit {
        return Transition::Quit;
    }

    match app.focus.clone() {
        Focus::Table => update_table(app, action),
        Focus::Filter { draft } => update_filter(app, draft, action),
    }
    Transition::Continue
}

// ============================================================================
// PER-FOCUS HANDLERS
// ============================================================================

/// Table focus: paging, page size, form reset, entering the filter.
fn update_table(app: &mut App, action: &Action) {
    match action {
        Action::PrevPage => click(app, PageRef::Prev),
        Action::NextPage => click(app, PageRef::Next),
        Action::FirstPage => click(app, PageRef::Number(1)),
        Action::LastPage => {
            let last = app.pager.page_count();
            click(app, PageRef::Number(last));
        }
        Action::JumpToSlot(slot) => {
            if let Some(page) = visible_page_at(app, *slot) {
                click(app, PageRef::Number(page));
            }
        }
        Action::GrowPageSize => step_page_size(app, PageSize::next_option),
        Action::ShrinkPageSize => step_page_size(app, PageSize::prev_option),
        Action::EditFilter => {
            app.focus = Focus::Filter {
                draft: app.doc.filter_value(),
            };
        }
        Action::ResetForm => {
            // Inputs first, then the pager reads them back
            app.doc.reset_form();
            dispatch(app, PagerEvent::FormReset);
        }
        _ => {}
    }
}

/// Filter focus: edit the draft, commit or cancel.
fn update_filter(app: &mut App, mut draft: String, action: &Action) {
    match action {
        Action::FilterInput(c) => {
            draft.push(*c);
            app.focus = Focus::Filter { draft };
        }
        Action::FilterBackspace => {
            draft.pop();
            app.focus = Focus::Filter { draft };
        }
        Action::ApplyFilter => {
            apply_filter(app, &draft);
            app.focus = Focus::Table;
        }
        Action::CancelFilter => app.focus = Focus::Table,
        _ => {}
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn dispatch(app: &mut App, event: PagerEvent) {
    match app.pager.handle(event, &mut app.doc) {
        Ok(()) => app.status = None,
        Err(e) => app.status = Some(e.to_string()),
    }
}

fn click(app: &mut App, target: PageRef) {
    debug!(%target, "page control clicked");
    dispatch(app, PagerEvent::ControlClicked(target));
}

/// Page number of the n-th visible numbered control (1-based).
fn visible_page_at(app: &App, slot: u8) -> Option<usize> {
    let index = usize::from(slot).checked_sub(1)?;
    app.doc
        .visible_controls()
        .filter_map(|c| c.page.number())
        .nth(index)
}

/// Move the rows-per-page selector to a neighbouring option.
fn step_page_size(app: &mut App, step: fn(PageSize) -> PageSize) {
    let current = PageSize::parse(&app.doc.page_size_value()).unwrap_or(app.pager.page_size());
    let next = step(current);
    if next == current {
        return;
    }
    app.doc.set_page_size_value(&next.to_string());
    dispatch(app, PagerEvent::PageSizeChanged);
}

/// Commit a new filter: the pager only reads the filter on initialization,
/// so re-initialize, then restore the rows-per-page choice.
fn apply_filter(app: &mut App, draft: &str) {
    let page_size = app.pager.page_size();
    app.doc.set_filter_value(draft);
    app.pager.initialize(&mut app.doc);
    app.status = None;

    if page_size != app.pager.page_size() {
        app.doc.set_page_size_value(&page_size.to_string());
        dispatch(app, PagerEvent::PageSizeChanged);
    }
    debug!(filter = draft, pages = app.pager.page_count(), "filter applied");
}

// ============================================================================
// TESTS
// ============================================================================
