//! Rendering: map App state to ratatui widgets.
//!
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::dom::{ControlNode, Document};
use crate::types::PageRef;

use super::state::{App, Focus};
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole screen.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // title, form, table, pager strip, status/help
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    frame.render_widget(render_title(app), chunks[0]);
    frame.render_widget(render_form(app), chunks[1]);
    render_table(&app.doc, frame, chunks[2]);
    frame.render_widget(render_pager(app), chunks[3]);
    frame.render_widget(render_footer(app), chunks[4]);
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar with the page position.
fn render_title(app: &App) -> Paragraph<'static> {
    let position = if app.pager.page_count() == 0 {
        "no matching rows".to_string()
    } else {
        format!(
            "page {} of {}",
            app.pager.current_page(),
            app.pager.page_count()
        )
    };

    Paragraph::new(Line::from(vec![
        Span::styled("table-pager", theme::STYLE_TITLE),
        Span::styled(format!("  {}", position), theme::STYLE_DIM),
    ]))
}

/// Filter input and rows-per-page selector.
fn render_form(app: &App) -> Paragraph<'static> {
    let (filter_text, filter_style) = match &app.focus {
        Focus::Filter { draft } => (format!("{}█", draft), theme::STYLE_INPUT_FOCUSED),
        Focus::Table => (app.pager.filter().as_str().to_string(), theme::STYLE_INPUT),
    };

    Paragraph::new(Line::from(vec![
        Span::raw("Filter: "),
        Span::styled(format!("[{}]", filter_text), filter_style),
        Span::raw("   Rows per page: "),
        Span::styled(format!("‹ {} ›", app.page_size_input()), theme::STYLE_INTERACTIVE),
    ]))
}

/// Help line, or the last error if there is one.
fn render_footer(app: &App) -> Paragraph<'static> {
    if let Some(status) = &app.status {
        return Paragraph::new(Span::styled(status.clone(), theme::STYLE_ERROR));
    }

    let help_text = match app.focus {
        Focus::Table => concat!(
            "[←/→] prev/next  [1-9] page  [Home/End] first/last  ",
            "[+/-] rows  [/] filter  [r] reset  [q] quit"
        ),
        Focus::Filter { .. } => "[Enter] apply  [Esc] cancel",
    };
    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// TABLE
// ============================================================================

fn render_table(doc: &Document, frame: &mut Frame, area: Rect) {
    let columns = doc
        .rows()
        .iter()
        .map(|r| r.cells.len())
        .chain(std::iter::once(doc.headers().len()))
        .max()
        .unwrap_or(0);

    if doc.visible_rows().next().is_none() {
        let empty = Paragraph::new(Span::styled("  (no rows on this page)", theme::STYLE_DIM));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(
        (0..columns).map(|i| Cell::from(doc.headers().get(i).cloned().unwrap_or_default())),
    )
    .style(theme::STYLE_HEADER);

    let rows: Vec<Row> = doc
        .visible_rows()
        .map(|r| {
            Row::new(
                (0..columns).map(|i| Cell::from(r.cells.get(i).cloned().unwrap_or_default())),
            )
        })
        .collect();

    let widths = vec![Constraint::Fill(1); columns.max(1)];
    let table = Table::new(rows, widths).header(header).column_spacing(2);
    frame.render_widget(table, area);
}

// ============================================================================
// PAGER STRIP
// ============================================================================

/// Visible pager items, active page highlighted, dead sentinels dimmed.
fn render_pager(app: &App) -> Paragraph<'static> {
    let current = app.pager.current_page();
    let last = app.pager.page_count();

    let spans: Vec<Span> = app
        .doc
        .visible_controls()
        .flat_map(|c| [control_span(c, current, last), Span::raw(" ")])
        .collect();

    Paragraph::new(Line::from(spans))
}

fn control_span(control: &ControlNode, current: usize, last: usize) -> Span<'static> {
    match control.page {
        PageRef::Prev => {
            let style = if current <= 1 {
                theme::STYLE_DISABLED
            } else {
                theme::STYLE_INTERACTIVE
            };
            Span::styled("«", style)
        }
        PageRef::Next => {
            let style = if current >= last {
                theme::STYLE_DISABLED
            } else {
                theme::STYLE_INTERACTIVE
            };
            Span::styled("»", style)
        }
        PageRef::Number(n) if control.active => {
            Span::styled(format!(" {} ", n), theme::STYLE_ACTIVE_PAGE)
        }
        PageRef::Number(n) => Span::raw(format!(" {} ", n)),
    }
}

// ============================================================================
// TESTS
// ============================================================================
