//! Domain types for table-pager.
//!
//! Page references, page sizes and the pager configuration.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PagerError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Rows-per-page used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Choices offered by the rows-per-page selector, in display order.
pub const PAGE_SIZE_OPTIONS: &[usize] = &[5, 10, 15, 20, 50, 70, 100];

/// Selector of the table the pager drives by default.
pub const DEFAULT_TABLE_SELECTOR: &str = "#table-id";

// ============================================================================
// PAGE REFERENCES
// ============================================================================

/// What a page control points at.
///
/// Mirrors the `data-page` attribute of a pager item: either a page
/// number (1-based) or one of the two stepping sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageRef {
    /// Step one page back.
    Prev,
    /// Jump to a page by number.
    Number(usize),
    /// Step one page forward.
    Next,
}

impl PageRef {
    /// True for the `prev`/`next` stepping items.
    pub fn is_sentinel(self) -> bool {
        matches!(self, PageRef::Prev | PageRef::Next)
    }

    /// The page number, if this is not a sentinel.
    pub fn number(self) -> Option<usize> {
        match self {
            PageRef::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Value of the `data-page` attribute.
    pub fn data_page(self) -> String {
        match self {
            PageRef::Prev => "prev".to_string(),
            PageRef::Next => "next".to_string(),
            PageRef::Number(n) => n.to_string(),
        }
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data_page())
    }
}

/// Serialized as its `data-page` value (`"prev"`, `"3"`, `"next"`).
impl Serialize for PageRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.data_page())
    }
}

impl FromStr for PageRef {
    type Err = PagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "prev" => Ok(PageRef::Prev),
            "next" => Ok(PageRef::Next),
            other => other
                .parse::<usize>()
                .map(PageRef::Number)
                .map_err(|_| PagerError::InvalidPageRef(other.to_string())),
        }
    }
}

// ============================================================================
// PAGE SIZE
// ============================================================================

/// A positive rows-per-page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PageSize(usize);

impl PageSize {
    /// Build a page size; zero is rejected.
    pub fn new(rows: usize) -> Result<Self, PagerError> {
        if rows == 0 {
            return Err(PagerError::InvalidPageSize("0".to_string()));
        }
        Ok(PageSize(rows))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Parse the raw value of the rows-per-page input.
    pub fn parse(raw: &str) -> Result<Self, PagerError> {
        let trimmed = raw.trim();
        let rows = trimmed
            .parse::<usize>()
            .map_err(|_| PagerError::InvalidPageSize(trimmed.to_string()))?;
        Self::new(rows).map_err(|_| PagerError::InvalidPageSize(trimmed.to_string()))
    }

    /// The next larger option of the selector, saturating at the largest.
    pub fn next_option(self) -> Self {
        PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|&o| o > self.0)
            .map(PageSize)
            .unwrap_or(self)
    }

    /// The next smaller option of the selector, saturating at the smallest.
    pub fn prev_option(self) -> Self {
        PAGE_SIZE_OPTIONS
            .iter()
            .rev()
            .copied()
            .find(|&o| o < self.0)
            .map(PageSize)
            .unwrap_or(self)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(DEFAULT_PAGE_SIZE)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for page snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text table.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
    /// Table and pager markup.
    Html,
}

/// Configuration for a paginator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerConfig {
    /// Rows per page written into the selector on (re)initialization.
    pub default_page_size: PageSize,
    /// Window limiting kicks in above this many controls (sentinels included).
    pub window_threshold: usize,
    /// Number of page controls kept visible by the sliding window.
    pub window_span: usize,
    /// Selector of the table being paginated.
    pub table_selector: String,
}

impl PagerConfig {
    /// Pages on each side of the active page inside the window.
    pub fn window_half(&self) -> usize {
        self.window_span / 2
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            default_page_size: PageSize::default(),
            window_threshold: 7,
            window_span: 5,
            table_selector: DEFAULT_TABLE_SELECTOR.to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
