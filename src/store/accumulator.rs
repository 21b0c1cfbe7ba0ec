//! Paginated result accumulator.
//!
//! Holds the merged pages of one list plus the query that produced them.
//! A first-page (or explicitly fresh) fetch replaces everything; a later
//! page under the same filters appends. A page whose filters differ from
//! the echoed query also replaces, so results of two searches never mix.

use museume_types::{ArtistClassQuery, ContestQuery, Page, WorkQuery};

/// Query shapes the accumulator can key replace-vs-append on.
pub trait ListQuery: Clone {
    fn page_number(&self) -> u32;
    fn set_page(&mut self, page: u32);
    fn search(&self) -> &str;
    fn set_search(&mut self, search: String);
    fn same_filters(&self, other: &Self) -> bool;
    /// Caller asked for a wholesale replace regardless of page.
    fn forces_fresh(&self) -> bool {
        false
    }
}

impl ListQuery for WorkQuery {
    fn page_number(&self) -> u32 {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    fn search(&self) -> &str {
        &self.search
    }

    fn set_search(&mut self, search: String) {
        self.search = search;
    }

    fn same_filters(&self, other: &Self) -> bool {
        WorkQuery::same_filters(self, other)
    }

    fn forces_fresh(&self) -> bool {
        self.is_like
    }
}

impl ListQuery for ContestQuery {
    fn page_number(&self) -> u32 {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    fn search(&self) -> &str {
        &self.search
    }

    fn set_search(&mut self, search: String) {
        self.search = search;
    }

    fn same_filters(&self, other: &Self) -> bool {
        ContestQuery::same_filters(self, other)
    }
}

impl ListQuery for ArtistClassQuery {
    fn page_number(&self) -> u32 {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    fn search(&self) -> &str {
        &self.search
    }

    fn set_search(&mut self, search: String) {
        self.search = search;
    }

    fn same_filters(&self, other: &Self) -> bool {
        ArtistClassQuery::same_filters(self, other)
    }
}

/// How a page was merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    Replaced,
    Appended,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator<T, Q> {
    results: Vec<T>,
    next: Option<String>,
    count: u64,
    query: Option<Q>,
}

impl<T, Q> Default for Accumulator<T, Q> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            next: None,
            count: 0,
            query: None,
        }
    }
}

impl<T, Q: ListQuery> Accumulator<T, Q> {
    /// Merge a fetched page for `query`.
    pub fn apply(&mut self, query: Q, page: Page<T>) -> Merge {
        let fresh = query.page_number() <= 1
            || query.forces_fresh()
            || self
                .query
                .as_ref()
                .map_or(true, |prev| !prev.same_filters(&query));

        self.next = page.next;
        self.count = page.count;
        self.query = Some(query);

        if fresh {
            self.results = page.results;
            Merge::Replaced
        } else {
            self.results.extend(page.results);
            Merge::Appended
        }
    }
}

impl<T, Q> Accumulator<T, Q> {
    /// Drop every item matching `pred`; returns how many were removed.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.results.len();
        self.results.retain(|item| !pred(item));
        let removed = before - self.results.len();
        self.count = self.count.saturating_sub(removed as u64);
        removed
    }

    pub fn for_each_mut(&mut self, f: impl FnMut(&mut T)) {
        self.results.iter_mut().for_each(f);
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Query echo of the last merged page.
    pub fn query(&self) -> Option<&Q> {
        self.query.as_ref()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
