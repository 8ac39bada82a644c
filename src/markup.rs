//! HTML generation for the table, pager strip and filter form.
//!
//! Each piece is an askama template; text from the table and the form is
//! escaped by the template engine.

use askama::Template;

use crate::dom::{ControlNode, Document, PagerDom, RowNode};
use crate::error::PagerError;
use crate::types::{PageRef, PagerConfig, PAGE_SIZE_OPTIONS};

/// Id of the item numbered controls are inserted before.
pub const INSERT_ANCHOR_ID: &str = "insert-pages-here";

// ============================================================================
// PAGER ITEMS
// ============================================================================

/// One pager list item.
///
/// A fresh numbered item renders exactly as the pager generates it:
/// `<li class="page-item" data-page="N"><a class="page-link" href="#">N<span class="sr-only">(current)</span></a></li>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Template)]
#[template(
    source = r##"<li class="page-item{% if active %} active{% endif %}" data-page="{{ page }}"{% if let Some(id) = self.anchor_id() %} id="{{ id }}"{% endif %}{% if !visible %} style="display: none;"{% endif %}><a class="page-link" href="#">{{ self.label()|safe }}{% if self.is_numbered() %}<span class="sr-only">(current)</span>{% endif %}</a></li>"##,
    ext = "html"
)]
pub struct PageItem {
    page: PageRef,
    active: bool,
    visible: bool,
}

impl PageItem {
    /// A numbered item as inserted by a rebuild: inactive and shown.
    pub fn new(page: usize) -> Self {
        PageItem {
            page: PageRef::Number(page),
            active: false,
            visible: true,
        }
    }

    fn label(&self) -> String {
        match self.page {
            PageRef::Prev => "&laquo;".to_string(),
            PageRef::Next => "&raquo;".to_string(),
            PageRef::Number(n) => n.to_string(),
        }
    }

    fn anchor_id(&self) -> Option<&'static str> {
        (self.page == PageRef::Next).then_some(INSERT_ANCHOR_ID)
    }

    fn is_numbered(&self) -> bool {
        !self.page.is_sentinel()
    }
}

impl From<&ControlNode> for PageItem {
    fn from(control: &ControlNode) -> Self {
        PageItem {
            page: control.page,
            active: control.active,
            visible: control.visible,
        }
    }
}

/// Markup of a pager item in its current state (active / hidden).
pub fn control_html(control: &ControlNode) -> Result<String, PagerError> {
    Ok(PageItem::from(control).render()?)
}

#[derive(Template)]
#[template(path = "pagination.html")]
struct PaginationView {
    items: Vec<String>,
}

/// The whole pager strip.
pub fn pagination_html(doc: &Document) -> Result<String, PagerError> {
    let items = doc
        .controls()
        .iter()
        .map(control_html)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PaginationView { items }.render()?)
}

// ============================================================================
// FORM
// ============================================================================

struct SizeOption {
    rows: usize,
    selected: bool,
}

#[derive(Template)]
#[template(path = "filter_form.html")]
struct FilterFormView {
    filter: String,
    options: Vec<SizeOption>,
}

/// The filter form with its text input and rows-per-page selector.
pub fn form_html(doc: &Document) -> Result<String, PagerError> {
    let current = doc.page_size_value();
    let options = PAGE_SIZE_OPTIONS
        .iter()
        .map(|&rows| SizeOption {
            rows,
            selected: rows.to_string() == current,
        })
        .collect();

    let view = FilterFormView {
        filter: doc.filter_value(),
        options,
    };
    Ok(view.render()?)
}

// ============================================================================
// TABLE
// ============================================================================

#[derive(Template)]
#[template(path = "table.html")]
struct TableView<'a> {
    id: &'a str,
    headers: &'a [String],
    rows: &'a [RowNode],
}

/// The table with hidden rows marked `display: none`.
pub fn table_html(doc: &Document, config: &PagerConfig) -> Result<String, PagerError> {
    let view = TableView {
        id: config.table_selector.trim_start_matches('#'),
        headers: doc.headers(),
        rows: doc.rows(),
    };
    Ok(view.render()?)
}

/// Form, table and pager strip, in page order.
pub fn page_html(doc: &Document, config: &PagerConfig) -> Result<String, PagerError> {
    let mut out = form_html(doc)?;
    out.push('\n');
    out.push_str(&table_html(doc, config)?);
    out.push('\n');
    out.push_str(&pagination_html(doc)?);
    out.push('\n');
    Ok(out)
}

// ============================================================================
// TESTS
// ============================================================================
