/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Paged, optionally filtered projection of one collection.
//!
//! Invariants:
//! - `1 <= page <= total_pages`, with `total_pages = max(1, ceil(n / p))`.
//!   An empty collection has exactly one (empty) page.
//! - A page is a contiguous slice of the source in source order.
//! - Replacing the source, or setting or clearing the filter, resets
//!   the page to 1.
//! - The row cursor satisfies `pos < len` for the current page (or
//!   `pos == 0` when the page is empty).

use std::sync::Arc;

/// Navigation cursor over a bounded list.
///
/// Invariant: `pos < len` (or `pos == 0` when `len == 0`).
/// Movement methods return `true` when the position changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pos: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { pos: 0, len }
    }

    /// Move up (decrement). Returns true if position changed.
    pub fn move_up(&mut self) -> bool {
        if self.pos > 0 {
            self.pos -= 1;
            true
        } else {
            false
        }
    }

    /// Move down (increment). Returns true if position changed.
    pub fn move_down(&mut self) -> bool {
        if self.pos + 1 < self.len {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn home(&mut self) -> bool {
        self.set_if_changed(0)
    }

    pub fn end(&mut self) -> bool {
        self.set_if_changed(self.len.saturating_sub(1))
    }

    /// Update length and clamp position to remain valid.
    pub fn update_len(&mut self, new_len: usize) {
        self.len = new_len;
        self.pos = self.pos.min(new_len.saturating_sub(1));
    }

    /// Set position directly, clamped to the valid range.
    pub fn set_pos(&mut self, new_pos: usize) {
        self.pos = new_pos.min(self.len.saturating_sub(1));
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn set_if_changed(&mut self, new_pos: usize) -> bool {
        if self.pos != new_pos {
            self.pos = new_pos;
            true
        } else {
            false
        }
    }
}

/// `max(1, ceil(total / page_size))`. A zero page size is treated as 1.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total.div_ceil(page_size).max(1)
}

/// One page of a projection.
#[derive(Debug, PartialEq)]
pub struct PageWindow<'a, R> {
    pub items: &'a [R],
    /// 1-based, already clamped into `1..=total_pages`.
    pub page: usize,
    pub total_pages: usize,
}

/// Slice `collection` (or `filter`, when present) down to `page`.
///
/// Out-of-range pages are clamped rather than rejected.
pub fn view<'a, R>(
    collection: &'a [R],
    filter: Option<&'a [R]>,
    page: usize,
    page_size: usize,
) -> PageWindow<'a, R> {
    let rows = filter.unwrap_or(collection);
    let page_size = page_size.max(1);
    let total_pages = total_pages(rows.len(), page_size);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(rows.len());
    PageWindow {
        items: &rows[start.min(end)..end],
        page,
        total_pages,
    }
}

/// A server-side name search whose results replace the source rows.
#[derive(Debug, Clone)]
pub struct Filter<R> {
    pub query: String,
    pub results: Arc<Vec<R>>,
}

/// Per-tab view state: source identity, filter, page and row cursor.
#[derive(Debug, Clone)]
pub struct ViewState<R> {
    source: Arc<Vec<R>>,
    filter: Option<Filter<R>>,
    page: usize,
    page_size: usize,
    cursor: Cursor,
}

impl<R> ViewState<R> {
    pub fn new(source: Arc<Vec<R>>, page_size: usize) -> Self {
        let mut state = Self {
            source,
            filter: None,
            page: 1,
            page_size: page_size.max(1),
            cursor: Cursor::new(0),
        };
        state.sync_cursor();
        state
    }

    /// Point the view at `source`. Returns `true` (and resets to page
    /// 1) when the collection was actually replaced.
    pub fn sync_source(&mut self, source: &Arc<Vec<R>>) -> bool {
        if Arc::ptr_eq(&self.source, source) {
            return false;
        }
        self.source = Arc::clone(source);
        self.page = 1;
        self.cursor = Cursor::new(0);
        self.sync_cursor();
        true
    }

    /// Adopt a reconciled copy of the same collection. Any replacement
    /// of the source goes back to page 1.
    pub fn reconcile_source(&mut self, source: &Arc<Vec<R>>) {
        self.source = Arc::clone(source);
        self.reset_to_first_page();
    }

    pub fn set_filter(&mut self, query: impl Into<String>, results: Vec<R>) {
        self.filter = Some(Filter {
            query: query.into(),
            results: Arc::new(results),
        });
        self.reset_to_first_page();
    }

    /// Returns `true` if a filter was active.
    pub fn clear_filter(&mut self) -> bool {
        if self.filter.take().is_some() {
            self.reset_to_first_page();
            true
        } else {
            false
        }
    }

    pub fn filter(&self) -> Option<&Filter<R>> {
        self.filter.as_ref()
    }

    /// Replace the filter rows, keeping the query. Used when a
    /// mutation reconciles records that the filter shows; the page
    /// goes back to 1.
    pub fn replace_filter_results(&mut self, results: Arc<Vec<R>>) {
        if let Some(filter) = &mut self.filter {
            filter.results = results;
            self.reset_to_first_page();
        }
    }

    pub fn window(&self) -> PageWindow<'_, R> {
        view(
            &self.source,
            self.filter.as_ref().map(|f| f.results.as_slice()),
            self.page,
            self.page_size,
        )
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.row_count(), self.page_size)
    }

    /// Rows in the active projection (filter results or source).
    pub fn row_count(&self) -> usize {
        match &self.filter {
            Some(filter) => filter.results.len(),
            None => self.source.len(),
        }
    }

    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            self.cursor.home();
            self.sync_cursor();
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            self.cursor.home();
            self.sync_cursor();
            true
        } else {
            false
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// The row under the cursor on the current page.
    pub fn current(&self) -> Option<&R> {
        self.window().items.get(self.cursor.pos())
    }

    fn reset_to_first_page(&mut self) {
        self.page = 1;
        self.cursor.home();
        self.sync_cursor();
    }

    fn sync_cursor(&mut self) {
        let len = self.window().items.len();
        self.cursor.update_len(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: i64) -> Arc<Vec<i64>> {
        Arc::new((1..=n).collect())
    }

    #[test]
    fn total_pages_has_a_floor_of_one() {
        assert_eq!(total_pages(0, 6), 1);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(11, 4), 3);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn last_page_is_partial() {
        let rows = numbers(11);
        let window = view(&rows, None, 3, 4);
        assert_eq!(window.total_pages, 3);
        assert_eq!(window.items, &[9, 10, 11]);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let rows = numbers(11);
        assert_eq!(view(&rows, None, 0, 4).page, 1);
        let window = view(&rows, None, 9, 4);
        assert_eq!(window.page, 3);
        assert_eq!(window.items.len(), 3);
    }

    #[test]
    fn empty_collection_has_one_empty_page() {
        let rows: Vec<i64> = Vec::new();
        let window = view(&rows, None, 1, 6);
        assert_eq!(window.total_pages, 1);
        assert!(window.items.is_empty());
    }

    #[test]
    fn filter_replaces_source_rows() {
        let rows = numbers(11);
        let hits = vec![4, 8];
        let window = view(&rows, Some(&hits), 1, 4);
        assert_eq!(window.items, &[4, 8]);
        assert_eq!(window.total_pages, 1);
    }

    #[test]
    fn paging_is_clamped_and_reports_change() {
        let mut state = ViewState::new(numbers(11), 4);
        assert!(!state.prev_page());
        assert!(state.next_page());
        assert!(state.next_page());
        assert!(!state.next_page());
        assert_eq!(state.page(), 3);
        assert_eq!(state.cursor().len(), 3);
    }

    #[test]
    fn replaced_source_resets_page() {
        let mut state = ViewState::new(numbers(11), 4);
        state.next_page();
        let same = Arc::clone(&state.source);
        assert!(!state.sync_source(&same));
        assert_eq!(state.page(), 2);
        assert!(state.sync_source(&numbers(11)));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn reconciled_source_resets_page() {
        let mut state = ViewState::new(numbers(9), 4);
        state.next_page();
        state.next_page();
        state.reconcile_source(&numbers(8));
        assert_eq!(state.page(), 1);
        assert_eq!(state.cursor().pos(), 0);
        assert_eq!(state.total_pages(), 2);
    }

    #[test]
    fn setting_and_clearing_filter_resets_page() {
        let mut state = ViewState::new(numbers(11), 4);
        state.next_page();
        state.set_filter("x", vec![1, 2, 3, 4, 5]);
        assert_eq!(state.page(), 1);
        assert_eq!(state.total_pages(), 2);
        state.next_page();
        assert!(state.clear_filter());
        assert_eq!(state.page(), 1);
        assert!(!state.clear_filter());
    }

    #[test]
    fn replaced_filter_results_reset_page() {
        let mut state = ViewState::new(numbers(3), 2);
        state.set_filter("x", vec![1, 2, 3]);
        state.next_page();
        state.replace_filter_results(Arc::new(vec![1]));
        assert_eq!(state.page(), 1);
        assert_eq!(state.current(), Some(&1));
    }

    #[test]
    fn cursor_keeps_invariant() {
        let mut cursor = Cursor::new(3);
        assert!(!cursor.move_up());
        assert!(cursor.end());
        assert!(!cursor.move_down());
        cursor.update_len(1);
        assert_eq!(cursor.pos(), 0);
        cursor.update_len(0);
        assert!(cursor.is_empty());
        assert!(!cursor.home());
        cursor.set_pos(5);
        assert_eq!(cursor.pos(), 0);
    }
}
