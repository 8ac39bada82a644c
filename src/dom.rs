//! The document surface a paginator drives.
//!
//! `PagerDom` is the narrow interface the paging algorithm needs: rows with
//! text and a visibility flag, an ordered strip of page controls, and the two
//! form inputs (filter text, rows per page). `Document` is the headless
//! implementation used by the CLI, the terminal UI and the tests.

use serde::Serialize;

use crate::types::{PageRef, PageSize};

/// Operations the paginator performs on a table and its pager strip.
///
/// Indices are positions in document order. Control indices are only valid
/// until the next `remove_page_controls` / `insert_page_control`.
pub trait PagerDom {
    /// Current value of the filter text input.
    fn filter_value(&self) -> String;

    /// Current value of the rows-per-page selector.
    fn page_size_value(&self) -> String;

    fn set_page_size_value(&mut self, value: &str);

    fn row_count(&self) -> usize;

    /// Text content of a row, as matched by the filter.
    fn row_text(&self, index: usize) -> String;

    fn set_row_visible(&mut self, index: usize, visible: bool);

    /// Number of page controls, sentinels included.
    fn control_count(&self) -> usize;

    fn control_page(&self, index: usize) -> PageRef;

    fn set_control_active(&mut self, index: usize, active: bool);

    fn set_control_visible(&mut self, index: usize, visible: bool);

    /// Remove every numbered control; sentinels stay in place.
    fn remove_page_controls(&mut self);

    /// Insert a numbered control immediately before the insertion anchor.
    fn insert_page_control(&mut self, page: usize);

    /// Number of numbered (non-sentinel) controls.
    fn page_control_count(&self) -> usize {
        (0..self.control_count())
            .filter(|&i| !self.control_page(i).is_sentinel())
            .count()
    }
}

// ============================================================================
// NODES
// ============================================================================

/// A table row: its cells and whether it is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowNode {
    pub cells: Vec<String>,
    pub visible: bool,
}

impl RowNode {
    pub fn new(cells: Vec<String>) -> Self {
        RowNode {
            cells,
            visible: true,
        }
    }

    /// Cells joined by single spaces.
    pub fn text(&self) -> String {
        self.cells.join(" ")
    }
}

/// A pager list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlNode {
    pub page: PageRef,
    pub active: bool,
    pub visible: bool,
}

impl ControlNode {
    pub fn new(page: PageRef) -> Self {
        ControlNode {
            page,
            active: false,
            visible: true,
        }
    }
}

/// A form field that remembers its initial value for `reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FormInput {
    value: String,
    default_value: String,
}

impl FormInput {
    fn new(value: &str) -> Self {
        FormInput {
            value: value.to_string(),
            default_value: value.to_string(),
        }
    }

    fn reset(&mut self) {
        self.value.clone_from(&self.default_value);
    }
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// In-memory table, pager strip and filter form.
///
/// The pager strip starts as `[prev, next]`; `next` doubles as the anchor
/// numbered controls are inserted before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    headers: Vec<String>,
    rows: Vec<RowNode>,
    controls: Vec<ControlNode>,
    filter_input: FormInput,
    page_size_input: FormInput,
}

impl Document {
    /// Build a document with an empty filter and the default page size.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Document {
            headers,
            rows: rows.into_iter().map(RowNode::new).collect(),
            controls: vec![ControlNode::new(PageRef::Prev), ControlNode::new(PageRef::Next)],
            filter_input: FormInput::new(""),
            page_size_input: FormInput::new(&PageSize::default().to_string()),
        }
    }

    /// Set the values the form is rendered with. They become the reset values too.
    pub fn with_form_defaults(mut self, filter: &str, page_size: &str) -> Self {
        self.filter_input = FormInput::new(filter);
        self.page_size_input = FormInput::new(page_size);
        self
    }

    /// Replace the pager strip, e.g. to model markup without sentinels.
    pub fn with_controls(mut self, pages: &[PageRef]) -> Self {
        self.controls = pages.iter().copied().map(ControlNode::new).collect();
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RowNode] {
        &self.rows
    }

    pub fn controls(&self) -> &[ControlNode] {
        &self.controls
    }

    /// Rows currently shown, in document order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &RowNode> {
        self.rows.iter().filter(|r| r.visible)
    }

    /// Controls currently shown, in strip order.
    pub fn visible_controls(&self) -> impl Iterator<Item = &ControlNode> {
        self.controls.iter().filter(|c| c.visible)
    }

    /// Page number carried by the active control, if any.
    pub fn active_page(&self) -> Option<usize> {
        self.controls
            .iter()
            .find(|c| c.active)
            .and_then(|c| c.page.number())
    }

    /// Type into the filter input.
    pub fn set_filter_value(&mut self, value: &str) {
        self.filter_input.value = value.to_string();
    }

    /// Restore both form inputs to the values the form was built with.
    pub fn reset_form(&mut self) {
        self.filter_input.reset();
        self.page_size_input.reset();
    }

    fn anchor_index(&self) -> usize {
        self.controls
            .iter()
            .position(|c| c.page == PageRef::Next)
            .unwrap_or(self.controls.len())
    }
}

impl PagerDom for Document {
    fn filter_value(&self) -> String {
        self.filter_input.value.clone()
    }

    fn page_size_value(&self) -> String {
        self.page_size_input.value.clone()
    }

    fn set_page_size_value(&mut self, value: &str) {
        self.page_size_input.value = value.to_string();
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_text(&self, index: usize) -> String {
        self.rows[index].text()
    }

    fn set_row_visible(&mut self, index: usize, visible: bool) {
        self.rows[index].visible = visible;
    }

    fn control_count(&self) -> usize {
        self.controls.len()
    }

    fn control_page(&self, index: usize) -> PageRef {
        self.controls[index].page
    }

    fn set_control_active(&mut self, index: usize, active: bool) {
        self.controls[index].active = active;
    }

    fn set_control_visible(&mut self, index: usize, visible: bool) {
        self.controls[index].visible = visible;
    }

    fn remove_page_controls(&mut self) {
        self.controls.retain(|c| c.page.is_sentinel());
    }

    fn insert_page_control(&mut self, page: usize) {
        let at = self.anchor_index();
        self.controls.insert(at, ControlNode::new(PageRef::Number(page)));
    }
}

// ============================================================================
// TESTS
// ============================================================================
