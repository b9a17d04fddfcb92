//! Cached task pages, keyed by the query that produced them.

use std::collections::HashMap;

use crate::domain::{Page, Task};

use super::filter::CategoryFilter;

/// Page cache keyed by (page number, category selector).
///
/// Entries are whole envelopes, replaced wholesale. Mutations invalidate
/// everything at once - after a create, toggle or delete, any cached page
/// may be stale, so none survive.
#[derive(Debug, Default)]
pub struct PageCache {
    entries: HashMap<(u32, CategoryFilter), Page<Task>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, page: u32, filter: CategoryFilter) -> Option<&Page<Task>> {
        self.entries.get(&(page, filter))
    }

    pub fn insert(&mut self, filter: CategoryFilter, page: Page<Task>) {
        self.entries.insert((page.current_page, filter), page);
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
