//! Page computation and row/control visibility.
//!
//! A `Paginator` owns the paging state (filter, rows per page, page count,
//! current page) and applies it to any `PagerDom`. All work is synchronous:
//! each call runs to completion and leaves the document consistent.
//!
//! Structure:
//! - Pure functions: page arithmetic
//! - `Paginator`: state plus the operations that mutate the document

use tracing::{debug, trace, warn};

use crate::dom::PagerDom;
use crate::error::PagerError;
use crate::filter::Filter;
use crate::types::{PageRef, PageSize, PagerConfig};

// ============================================================================
// PURE FUNCTIONS (Page Arithmetic)
// ============================================================================

/// Number of pages needed for `matching` rows: `ceil(matching / page_size)`.
pub fn page_count(matching: usize, page_size: PageSize) -> usize {
    matching.div_ceil(page_size.get())
}

/// Rank bounds of a page as `(exclusive_low, inclusive_high)`.
///
/// Ranks are 1-based positions among filtered rows, so page `k` holds the
/// ranks in `((k-1)*size, k*size]`.
pub fn page_bounds(page: usize, page_size: PageSize) -> (usize, usize) {
    let size = page_size.get();
    (page.saturating_sub(1) * size, page * size)
}

/// Is the filtered row with this 1-based rank shown on `page`?
pub fn is_row_on_page(rank: usize, page: usize, page_size: PageSize) -> bool {
    let (low, high) = page_bounds(page, page_size);
    rank > low && rank <= high
}

// ============================================================================
// EVENTS
// ============================================================================

/// User interactions the paginator reacts to.
///
/// Hosts route every interaction through [`Paginator::handle`], so there is
/// exactly one handler per event no matter how often the strip is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerEvent {
    /// The rows-per-page selector changed value.
    PageSizeChanged,
    /// A pager item was clicked.
    ControlClicked(PageRef),
    /// The filter form was reset. The host restores the form inputs first.
    FormReset,
    /// The filter form was submitted; swallowed.
    FormSubmitted,
}

// ============================================================================
// PAGINATOR
// ============================================================================

/// Paging state for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    config: PagerConfig,
    filter: Filter,
    page_size: PageSize,
    page_count: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(config: PagerConfig) -> Self {
        Paginator {
            page_size: config.default_page_size,
            config,
            filter: Filter::all(),
            page_count: 0,
            current_page: 1,
        }
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Set up the pager: read the filter once, reset the selector to the
    /// default page size, rebuild the strip and show page 1.
    pub fn initialize<D: PagerDom + ?Sized>(&mut self, dom: &mut D) {
        self.filter = Filter::new(&dom.filter_value());
        let page_size = self.config.default_page_size;
        dom.set_page_size_value(&page_size.to_string());
        debug!(
            table = %self.config.table_selector,
            filter = self.filter.as_str(),
            rows = dom.row_count(),
            "initializing pager"
        );
        self.rebuild(page_size, dom);
    }

    /// React to a new rows-per-page value: rebuild the strip and show page 1.
    ///
    /// # Errors
    /// Returns `InvalidPageSize` if the selector does not hold a positive
    /// integer. The document is left untouched in that case.
    pub fn on_page_size_change<D: PagerDom + ?Sized>(
        &mut self,
        dom: &mut D,
    ) -> Result<(), PagerError> {
        let raw = dom.page_size_value();
        let page_size = PageSize::parse(&raw).inspect_err(|e| {
            warn!(value = %raw, "ignoring page size change: {e}");
        })?;
        self.rebuild(page_size, dom);
        Ok(())
    }

    /// Show a page.
    ///
    /// `prev`/`next` step relative to the current page and are no-ops at
    /// the first/last page. Numbers are clamped into `[1, page_count]`.
    /// Returns the page now shown, or `None` if nothing changed.
    pub fn activate_page<D: PagerDom + ?Sized>(
        &mut self,
        target: PageRef,
        dom: &mut D,
    ) -> Option<usize> {
        let last_page = dom.page_control_count();
        let page = match target {
            PageRef::Prev => {
                if self.current_page <= 1 {
                    trace!("prev at first page");
                    return None;
                }
                self.current_page - 1
            }
            PageRef::Next => {
                if self.current_page >= last_page {
                    trace!(last_page, "next at last page");
                    return None;
                }
                self.current_page + 1
            }
            PageRef::Number(n) => n.clamp(1, last_page.max(1)),
        };

        self.current_page = page;
        self.mark_active(dom);
        self.apply_visible_window_limit(dom);
        self.show_page_rows(dom);
        debug!(page, last_page, "activated page");
        Some(page)
    }

    /// Keep a long pager compact.
    ///
    /// Above `window_threshold` controls, only a window of `window_span`
    /// page numbers stays visible: the first pages while the active page is
    /// near the start, otherwise the pages centred on the active one. `next`
    /// is always shown and `prev` is never touched.
    pub fn apply_visible_window_limit<D: PagerDom + ?Sized>(&self, dom: &mut D) {
        let total = dom.control_count();
        if total <= self.config.window_threshold {
            return;
        }

        let half = self.config.window_half();
        let span = self.config.window_span;
        let active = self.current_page;

        for i in 0..total {
            let visible = match dom.control_page(i) {
                PageRef::Prev => continue,
                PageRef::Next => true,
                PageRef::Number(n) if active <= half + 1 => n <= span,
                PageRef::Number(n) => n + half >= active && n <= active + half,
            };
            dom.set_control_visible(i, visible);
        }
    }

    /// Dispatch a user interaction.
    ///
    /// # Errors
    /// Propagates `on_page_size_change` errors.
    pub fn handle<D: PagerDom + ?Sized>(
        &mut self,
        event: PagerEvent,
        dom: &mut D,
    ) -> Result<(), PagerError> {
        match event {
            PagerEvent::PageSizeChanged => self.on_page_size_change(dom)?,
            PagerEvent::ControlClicked(target) => {
                self.activate_page(target, dom);
            }
            PagerEvent::FormReset => self.initialize(dom),
            PagerEvent::FormSubmitted => trace!("form submit suppressed"),
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // internal
    // ------------------------------------------------------------------------

    fn rebuild<D: PagerDom + ?Sized>(&mut self, page_size: PageSize, dom: &mut D) {
        self.page_size = page_size;
        self.current_page = 1;

        let matching = self
            .filter
            .count_matching((0..dom.row_count()).map(|i| dom.row_text(i)));
        self.page_count = page_count(matching, page_size);

        dom.remove_page_controls();
        for page in 1..=self.page_count {
            dom.insert_page_control(page);
        }
        debug!(
            matching,
            page_size = page_size.get(),
            pages = self.page_count,
            "rebuilt pager"
        );

        self.mark_active(dom);
        self.apply_visible_window_limit(dom);
        self.activate_page(PageRef::Number(1), dom);
    }

    fn mark_active<D: PagerDom + ?Sized>(&self, dom: &mut D) {
        let active = PageRef::Number(self.current_page);
        for i in 0..dom.control_count() {
            let is_active = dom.control_page(i) == active;
            dom.set_control_active(i, is_active);
        }
    }

    fn show_page_rows<D: PagerDom + ?Sized>(&self, dom: &mut D) {
        let mut rank = 0;
        for i in 0..dom.row_count() {
            if self.filter.matches(&dom.row_text(i)) {
                rank += 1;
                let shown = is_row_on_page(rank, self.current_page, self.page_size);
                dom.set_row_visible(i, shown);
            } else {
                dom.set_row_visible(i, false);
            }
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator::new(PagerConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn size(n: usize) -> PageSize {
        PageSize::new(n).unwrap()
    }

    /// Rows named "row-001", "row-002", ... so no row text contains another.
    fn numbered_doc(n: usize) -> Document {
        Document::new(
            vec!["name".into()],
            (1..=n).map(|i| vec![format!("row-{:03}", i)]).collect(),
        )
    }

    fn visible_texts(doc: &Document) -> Vec<String> {
        doc.visible_rows().map(|r| r.text()).collect()
    }

    fn expected_rows(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
        range.map(|i| format!("row-{:03}", i)).collect()
    }

    fn numbered_pages(doc: &Document) -> Vec<usize> {
        doc.controls().iter().filter_map(|c| c.page.number()).collect()
    }

    fn visible_pages(doc: &Document) -> Vec<PageRef> {
        doc.visible_controls().map(|c| c.page).collect()
    }

    fn initialized(rows: usize) -> (Paginator, Document) {
        let mut doc = numbered_doc(rows);
        let mut pager = Paginator::default();
        pager.initialize(&mut doc);
        (pager, doc)
    }

    // -- arithmetic --

    #[test]
    fn page_count_is_ceiling() {
        assert_eq!(page_count(25, size(10)), 3);
        assert_eq!(page_count(20, size(10)), 2);
        assert_eq!(page_count(1, size(10)), 1);
        assert_eq!(page_count(0, size(10)), 0);
        assert_eq!(page_count(7, size(1)), 7);
    }

    #[test]
    fn page_bounds_are_half_open_below() {
        assert_eq!(page_bounds(1, size(10)), (0, 10));
        assert_eq!(page_bounds(3, size(10)), (20, 30));
        assert!(!is_row_on_page(10, 2, size(10)));
        assert!(is_row_on_page(11, 2, size(10)));
        assert!(is_row_on_page(20, 2, size(10)));
        assert!(!is_row_on_page(21, 2, size(10)));
    }

    // -- initialize / page size --

    #[test]
    fn initialize_builds_controls_and_shows_first_page() {
        let (pager, doc) = initialized(25);
        assert_eq!(pager.page_count(), 3);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.page_size().get(), 10);
        assert_eq!(numbered_pages(&doc), vec![1, 2, 3]);
        assert_eq!(doc.controls().first().map(|c| c.page), Some(PageRef::Prev));
        assert_eq!(doc.controls().last().map(|c| c.page), Some(PageRef::Next));
        assert_eq!(doc.active_page(), Some(1));
        assert_eq!(visible_texts(&doc), expected_rows(1..=10));
    }

    #[test]
    fn initialize_writes_default_page_size_into_selector() {
        let mut doc = numbered_doc(30).with_form_defaults("", "50");
        let mut pager = Paginator::default();
        pager.initialize(&mut doc);
        assert_eq!(doc.page_size_value(), "10");
        assert_eq!(pager.page_count(), 3);
    }

    #[test]
    fn twenty_five_rows_page_two_shows_ranks_eleven_to_twenty() {
        let (mut pager, mut doc) = initialized(25);
        assert_eq!(pager.activate_page(PageRef::Number(2), &mut doc), Some(2));
        assert_eq!(visible_texts(&doc), expected_rows(11..=20));
    }

    #[test]
    fn last_page_may_be_short() {
        let (mut pager, mut doc) = initialized(25);
        pager.activate_page(PageRef::Number(3), &mut doc);
        assert_eq!(visible_texts(&doc), expected_rows(21..=25));
    }

    #[test]
    fn page_size_change_resets_to_first_page_and_rebuilds() {
        let (mut pager, mut doc) = initialized(25);
        pager.activate_page(PageRef::Number(3), &mut doc);

        doc.set_page_size_value("5");
        pager.handle(PagerEvent::PageSizeChanged, &mut doc).unwrap();

        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.page_size().get(), 5);
        assert_eq!(pager.page_count(), 5);
        assert_eq!(numbered_pages(&doc), vec![1, 2, 3, 4, 5]);
        assert_eq!(doc.active_page(), Some(1));
        assert_eq!(visible_texts(&doc), expected_rows(1..=5));
    }

    #[test]
    fn invalid_page_size_leaves_everything_untouched() {
        let (mut pager, mut doc) = initialized(25);
        pager.activate_page(PageRef::Number(2), &mut doc);
        let before_doc = doc.clone();
        let before_pager = pager.clone();

        for bad in ["abc", "0", "", "-1"] {
            doc.set_page_size_value(bad);
            let result = pager.on_page_size_change(&mut doc);
            assert!(matches!(result, Err(PagerError::InvalidPageSize(_))), "{bad:?}");
        }

        assert_eq!(pager, before_pager);
        assert_eq!(doc.rows(), before_doc.rows());
        assert_eq!(doc.controls(), before_doc.controls());
    }

    // -- filter --

    #[test]
    fn filter_hides_non_matching_rows_on_every_page() {
        let rows = ["abc one", "two", "three ABC", "four", "five"];
        let mut doc = Document::new(
            vec!["text".into()],
            rows.iter().map(|r| vec![r.to_string()]).collect(),
        )
        .with_form_defaults("abc", "10");
        let mut pager = Paginator::default();
        pager.initialize(&mut doc);

        assert_eq!(pager.page_count(), 1);
        assert_eq!(numbered_pages(&doc), vec![1]);
        assert_eq!(visible_texts(&doc), vec!["abc one", "three ABC"]);

        assert_eq!(pager.activate_page(PageRef::Next, &mut doc), None);
        pager.activate_page(PageRef::Number(1), &mut doc);
        assert_eq!(visible_texts(&doc), vec!["abc one", "three ABC"]);
    }

    #[test]
    fn filtered_ranks_skip_non_matching_rows() {
        // Every third row matches; page 2 at size 2 holds matches 3 and 4.
        let rows: Vec<Vec<String>> = (1..=12)
            .map(|i| {
                let tag = if i % 3 == 0 { "keep" } else { "drop" };
                vec![format!("{tag}-{i}")]
            })
            .collect();
        let mut doc = Document::new(vec!["t".into()], rows).with_form_defaults("keep", "10");
        let mut pager = Paginator::default();
        pager.initialize(&mut doc);
        doc.set_page_size_value("2");
        pager.on_page_size_change(&mut doc).unwrap();

        assert_eq!(pager.page_count(), 2);
        pager.activate_page(PageRef::Number(2), &mut doc);
        assert_eq!(visible_texts(&doc), vec!["keep-9", "keep-12"]);
    }

    #[test]
    fn filter_is_read_once_at_setup() {
        let (mut pager, mut doc) = initialized(25);
        doc.set_filter_value("row-001");
        doc.set_page_size_value("10");
        pager.on_page_size_change(&mut doc).unwrap();
        assert!(pager.filter().is_empty());
        assert_eq!(pager.page_count(), 3);
    }

    // -- prev / next --

    #[test]
    fn prev_at_first_page_is_noop() {
        let (mut pager, mut doc) = initialized(25);
        let before = doc.clone();
        assert_eq!(pager.activate_page(PageRef::Prev, &mut doc), None);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(doc, before);
    }

    #[test]
    fn next_at_last_page_is_noop() {
        let (mut pager, mut doc) = initialized(25);
        pager.activate_page(PageRef::Number(3), &mut doc);
        let before = doc.clone();
        assert_eq!(pager.activate_page(PageRef::Next, &mut doc), None);
        assert_eq!(pager.current_page(), 3);
        assert_eq!(doc, before);
    }

    #[test]
    fn next_and_prev_step_by_one() {
        let (mut pager, mut doc) = initialized(25);
        assert_eq!(pager.activate_page(PageRef::Next, &mut doc), Some(2));
        assert_eq!(pager.activate_page(PageRef::Next, &mut doc), Some(3));
        assert_eq!(pager.activate_page(PageRef::Prev, &mut doc), Some(2));
        assert_eq!(doc.active_page(), Some(2));
        assert_eq!(visible_texts(&doc), expected_rows(11..=20));
    }

    #[test]
    fn next_clamps_on_numbered_controls_without_sentinels() {
        let mut doc = numbered_doc(25).with_controls(&[]);
        let mut pager = Paginator::default();
        pager.initialize(&mut doc);
        assert_eq!(numbered_pages(&doc), vec![1, 2, 3]);
        pager.activate_page(PageRef::Next, &mut doc);
        pager.activate_page(PageRef::Next, &mut doc);
        assert_eq!(pager.activate_page(PageRef::Next, &mut doc), None);
        assert_eq!(pager.current_page(), 3);
    }

    #[test]
    fn out_of_range_numbers_are_clamped() {
        let (mut pager, mut doc) = initialized(25);
        assert_eq!(pager.activate_page(PageRef::Number(99), &mut doc), Some(3));
        assert_eq!(pager.activate_page(PageRef::Number(0), &mut doc), Some(1));
    }

    #[test]
    fn exactly_one_control_is_active() {
        let (mut pager, mut doc) = initialized(95);
        for target in [
            PageRef::Number(4),
            PageRef::Next,
            PageRef::Number(10),
            PageRef::Prev,
        ] {
            pager.activate_page(target, &mut doc);
            let active: Vec<PageRef> = doc
                .controls()
                .iter()
                .filter(|c| c.active)
                .map(|c| c.page)
                .collect();
            assert_eq!(active, vec![PageRef::Number(pager.current_page())]);
        }
    }

    // -- window limiting --

    #[test]
    fn seven_controls_are_never_limited() {
        // 5 pages + prev + next = 7 controls
        let (mut pager, mut doc) = initialized(50);
        assert_eq!(doc.control_count(), 7);
        for page in 1..=5 {
            pager.activate_page(PageRef::Number(page), &mut doc);
            assert!(doc.controls().iter().all(|c| c.visible), "page {page}");
        }
    }

    #[test]
    fn eight_controls_are_limited() {
        // 6 pages + prev + next = 8 controls
        let (mut pager, mut doc) = initialized(60);
        assert_eq!(doc.control_count(), 8);
        let numbers: Vec<usize> = visible_pages(&doc).iter().filter_map(|p| p.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert!(!doc.controls().iter().any(|c| c.page == PageRef::Number(6) && c.visible));

        pager.activate_page(PageRef::Number(6), &mut doc);
        let expected: Vec<PageRef> = std::iter::once(PageRef::Prev)
            .chain((4..=6).map(PageRef::Number))
            .chain(std::iter::once(PageRef::Next))
            .collect();
        assert_eq!(visible_pages(&doc), expected);
    }

    #[test]
    fn window_switches_to_centred_at_page_four() {
        let (mut pager, mut doc) = initialized(100);
        pager.activate_page(PageRef::Number(4), &mut doc);
        let expected: Vec<PageRef> = std::iter::once(PageRef::Prev)
            .chain((2..=6).map(PageRef::Number))
            .chain(std::iter::once(PageRef::Next))
            .collect();
        assert_eq!(visible_pages(&doc), expected);
    }

    #[test]
    fn window_near_start_shows_first_five() {
        let (mut pager, mut doc) = initialized(100);
        pager.activate_page(PageRef::Number(3), &mut doc);
        let expected: Vec<PageRef> = std::iter::once(PageRef::Prev)
            .chain((1..=5).map(PageRef::Number))
            .chain(std::iter::once(PageRef::Next))
            .collect();
        assert_eq!(visible_pages(&doc), expected);
    }

    #[test]
    fn window_centres_on_active_page() {
        let (mut pager, mut doc) = initialized(100);
        pager.activate_page(PageRef::Number(8), &mut doc);
        let shown: Vec<PageRef> = visible_pages(&doc);
        let expected: Vec<PageRef> = std::iter::once(PageRef::Prev)
            .chain((6..=10).map(PageRef::Number))
            .chain(std::iter::once(PageRef::Next))
            .collect();
        assert_eq!(shown, expected);
    }

    #[test]
    fn window_at_last_page_is_truncated() {
        let (mut pager, mut doc) = initialized(100);
        pager.activate_page(PageRef::Number(10), &mut doc);
        let numbers: Vec<usize> = visible_pages(&doc).iter().filter_map(|p| p.number()).collect();
        assert_eq!(numbers, vec![8, 9, 10]);
        assert!(visible_pages(&doc).contains(&PageRef::Next));
    }

    #[test]
    fn window_moves_back_to_start() {
        let (mut pager, mut doc) = initialized(100);
        pager.activate_page(PageRef::Number(9), &mut doc);
        pager.activate_page(PageRef::Number(1), &mut doc);
        let numbers: Vec<usize> = visible_pages(&doc).iter().filter_map(|p| p.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    // -- empty tables --

    #[test]
    fn no_matching_rows_means_no_pages() {
        let mut doc = numbered_doc(4).with_form_defaults("nothing", "10");
        let mut pager = Paginator::default();
        pager.initialize(&mut doc);
        assert_eq!(pager.page_count(), 0);
        assert_eq!(doc.page_control_count(), 0);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(doc.visible_rows().count(), 0);
        assert_eq!(pager.activate_page(PageRef::Next, &mut doc), None);
        assert_eq!(pager.activate_page(PageRef::Prev, &mut doc), None);
    }

    // -- events --

    #[test]
    fn form_reset_rereads_inputs() {
        let mut doc = numbered_doc(25).with_form_defaults("row-00", "10");
        let mut pager = Paginator::default();
        pager.initialize(&mut doc);
        assert_eq!(pager.page_count(), 1);

        doc.set_filter_value("row-001");
        doc.set_page_size_value("5");
        pager.handle(PagerEvent::PageSizeChanged, &mut doc).unwrap();
        pager.handle(PagerEvent::ControlClicked(PageRef::Next), &mut doc).unwrap();
        assert_eq!(pager.current_page(), 2);

        doc.reset_form();
        pager.handle(PagerEvent::FormReset, &mut doc).unwrap();
        assert_eq!(pager.filter().as_str(), "row-00");
        assert_eq!(pager.page_size().get(), 10);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(visible_texts(&doc), expected_rows(1..=9));
    }

    #[test]
    fn form_submit_changes_nothing() {
        let (mut pager, mut doc) = initialized(25);
        pager.activate_page(PageRef::Number(2), &mut doc);
        let before = (pager.clone(), doc.clone());
        pager.handle(PagerEvent::FormSubmitted, &mut doc).unwrap();
        assert_eq!((pager, doc), before);
    }

    #[test]
    fn repeated_rebuilds_do_not_multiply_clicks() {
        let (mut pager, mut doc) = initialized(100);
        for _ in 0..3 {
            doc.set_page_size_value("10");
            pager.handle(PagerEvent::PageSizeChanged, &mut doc).unwrap();
        }
        pager.handle(PagerEvent::ControlClicked(PageRef::Next), &mut doc).unwrap();
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn paginators_are_independent() {
        let (mut a, mut doc_a) = initialized(25);
        let (b, doc_b) = initialized(40);
        a.activate_page(PageRef::Number(3), &mut doc_a);
        assert_eq!(b.current_page(), 1);
        assert_eq!(b.page_count(), 4);
        assert_eq!(visible_texts(&doc_b), expected_rows(1..=10));
    }

    #[test]
    fn every_page_shows_exactly_its_ranks() {
        for rows in [0, 1, 9, 10, 11, 37] {
            for per_page in [1, 3, 10] {
                let mut doc = numbered_doc(rows);
                let mut pager = Paginator::default();
                pager.initialize(&mut doc);
                doc.set_page_size_value(&per_page.to_string());
                pager.on_page_size_change(&mut doc).unwrap();

                let pages = rows.div_ceil(per_page);
                assert_eq!(pager.page_count(), pages);
                assert_eq!(doc.page_control_count(), pages);

                for k in 1..=pages {
                    pager.activate_page(PageRef::Number(k), &mut doc);
                    let first = (k - 1) * per_page + 1;
                    let last = (k * per_page).min(rows);
                    assert_eq!(visible_texts(&doc), expected_rows(first..=last));
                }
            }
        }
    }
}
