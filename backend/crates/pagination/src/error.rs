//! Errors raised while interpreting pagination parameters.

/// Reasons a page request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The page parameter is not a positive integer.
    #[error("page must be a positive integer, got `{value}`")]
    InvalidPage {
        /// Raw value supplied by the client.
        value: String,
    },
    /// Page numbers start at one.
    #[error("page numbers start at 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

impl PaginationError {
    /// Build an [`PaginationError::InvalidPage`] error from the raw value.
    pub fn invalid_page(value: impl Into<String>) -> Self {
        Self::InvalidPage {
            value: value.into(),
        }
    }
}
