//! Client page selection.

use crate::PaginationError;

/// Number of items per page when the caller does not configure one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A validated, one-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Validate a page number and page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPage`] when `page` is zero and
    /// [`PaginationError::ZeroPageSize`] when `per_page` is zero.
    pub const fn new(page: u32, per_page: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if per_page == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self { page, per_page })
    }

    /// First page with the given size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] when `per_page` is zero.
    pub const fn first(per_page: u32) -> Result<Self, PaginationError> {
        Self::new(1, per_page)
    }

    /// Interpret the raw `page` query parameter.
    ///
    /// An absent or blank parameter selects the first page.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPage`] when the value is not an
    /// unsigned integer and the errors of [`PageRequest::new`] otherwise.
    pub fn parse(raw: Option<&str>, per_page: u32) -> Result<Self, PaginationError> {
        let trimmed = raw.map(str::trim).filter(|value| !value.is_empty());
        let page = match trimmed {
            Some(value) => value
                .parse::<u32>()
                .map_err(|_| PaginationError::invalid_page(value))?,
            None => 1,
        };
        Self::new(page, per_page)
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of items preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)).saturating_mul(u64::from(self.per_page))
    }

    /// Maximum number of items to load for this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}
