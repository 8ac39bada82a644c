//! Page snapshot formatting.
//!
//! Pure functions: (Paginator, Document, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::dom::{ControlNode, Document, PagerDom};
use crate::error::PagerError;
use crate::markup::page_html;
use crate::paginator::Paginator;
use crate::types::{OutputFormat, PageRef};

/// What a reader sees after the pager has run: the shown rows and the strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub filter: String,
    /// Rows passing the filter, across all pages.
    pub matching_rows: usize,
    pub total_rows: usize,
    pub headers: Vec<String>,
    /// Visible rows only, in document order.
    pub rows: Vec<Vec<String>>,
    /// The whole strip, hidden items included.
    pub controls: Vec<ControlNode>,
}

impl PageSnapshot {
    pub fn capture(pager: &Paginator, doc: &Document) -> Self {
        PageSnapshot {
            page: pager.current_page(),
            page_count: pager.page_count(),
            page_size: pager.page_size().get(),
            filter: pager.filter().as_str().to_string(),
            matching_rows: pager
                .filter()
                .count_matching((0..doc.row_count()).map(|i| doc.row_text(i))),
            total_rows: doc.row_count(),
            headers: doc.headers().to_vec(),
            rows: doc.visible_rows().map(|r| r.cells.clone()).collect(),
            controls: doc.controls().to_vec(),
        }
    }
}

/// Format the current page for output.
///
/// # Errors
/// Only the HTML format can fail, if a template does not render.
pub fn format_page(
    pager: &Paginator,
    doc: &Document,
    format: OutputFormat,
) -> Result<String, PagerError> {
    match format {
        OutputFormat::Human => Ok(format_human(&PageSnapshot::capture(pager, doc))),
        OutputFormat::Json => Ok(format_json(&PageSnapshot::capture(pager, doc))),
        OutputFormat::Html => page_html(doc, pager.config()),
    }
}

/// One-line rendering of the visible strip: `« 1 [2] 3 »`.
pub fn pager_line(controls: &[ControlNode]) -> String {
    controls
        .iter()
        .filter(|c| c.visible)
        .map(|c| match c.page {
            PageRef::Prev => "«".to_string(),
            PageRef::Next => "»".to_string(),
            PageRef::Number(n) if c.active => format!("[{n}]"),
            PageRef::Number(n) => n.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(snapshot: &PageSnapshot) -> String {
    let mut out = String::new();

    if snapshot.page_count == 0 {
        out.push_str("No matching rows.\n");
    } else {
        out.push_str(&format!(
            "Page {} of {}\n",
            snapshot.page, snapshot.page_count
        ));
    }
    out.push_str(&format!(
        "Rows per page: {}   Matching: {} of {}",
        snapshot.page_size, snapshot.matching_rows, snapshot.total_rows
    ));
    if !snapshot.filter.is_empty() {
        out.push_str(&format!("   Filter: {:?}", snapshot.filter));
    }
    out.push_str("\n\n");

    out.push_str(&format_grid(&snapshot.headers, &snapshot.rows));
    out.push('\n');
    out.push_str(&pager_line(&snapshot.controls));
    out.push('\n');

    out
}

/// Render rows as `a | b` columns padded to the widest cell.
fn format_grid(headers: &[String], rows: &[Vec<String>]) -> String {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0usize; columns];
    for line in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render = |line: &[String]| -> String {
        let cells: Vec<String> = (0..columns)
            .map(|i| {
                let cell = line.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = widths[i])
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    };

    let mut out = render(headers);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&render(row));
        out.push('\n');
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(snapshot: &PageSnapshot) -> String {
    serde_json::to_string_pretty(snapshot).unwrap_or_else(|e| {
        // Plain strings and integers only; cannot fail
        panic!("Failed to serialize page snapshot to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================
