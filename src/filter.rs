//! Row filtering by case-insensitive substring.
//!
//! Pure functions: no I/O, easily testable.

use serde::Serialize;

/// A lowercase substring read from the filter input.
///
/// The empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Filter {
    needle: String,
}

impl Filter {
    /// Build a filter from raw input text. The needle is lowercased once here.
    ///
    /// Surrounding whitespace is kept: a filter of `" a"` only matches text
    /// where `a` follows a space.
    pub fn new(raw: &str) -> Self {
        Filter {
            needle: raw.to_lowercase(),
        }
    }

    /// The filter that accepts everything.
    pub fn all() -> Self {
        Filter::default()
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Does a row with this text content pass the filter?
    pub fn matches(&self, text: &str) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        text.to_lowercase().contains(&self.needle)
    }

    /// Count how many of the given texts pass the filter.
    pub fn count_matching<I, S>(&self, texts: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts.into_iter().filter(|t| self.matches(t.as_ref())).count()
    }
}

// ============================================================================
// TESTS
// ============================================================================
