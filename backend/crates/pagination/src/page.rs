//! Page envelope returned by paginated queries.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    data: Vec<T>,
    current_page: u32,
    per_page: u32,
    total: u64,
    last_page: u32,
}

impl<T> Page<T> {
    /// Assemble a page from loaded items and the total match count.
    ///
    /// `last_page` is never lower than one, so an empty result still reports
    /// a single (empty) page.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let pages = total.div_ceil(u64::from(request.per_page())).max(1);
        Self {
            data,
            current_page: request.page(),
            per_page: request.per_page(),
            total,
            last_page: u32::try_from(pages).unwrap_or(u32::MAX),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// One-based number of this page.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Configured page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of items across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of the final page.
    #[must_use]
    pub const fn last_page(&self) -> u32 {
        self.last_page
    }

    /// Whether pages follow this one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Convert every item while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
            last_page: self.last_page,
        }
    }
}
