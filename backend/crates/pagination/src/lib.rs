//! Page-number pagination primitives shared by HTTP endpoints.
//!
//! A [`PageRequest`] describes which one-based page a client asked for and how
//! many items make up a page. Repositories translate it into an offset and a
//! limit, count the total number of matching rows, and hand both back as a
//! [`Page`]. [`PageLinks`] derives navigation URLs for a page from the
//! request URL so clients never assemble query strings themselves.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(2, 10)?;
//! assert_eq!(request.offset(), 10);
//!
//! let page = Page::new(vec!["k", "l"], request, 12);
//! assert_eq!(page.last_page(), 2);
//! assert!(!page.has_more());
//! # Ok::<(), pagination::PaginationError>(())
//! ```

mod error;
mod links;
mod page;
mod request;

pub use error::PaginationError;
pub use links::PageLinks;
pub use page::Page;
pub use request::{DEFAULT_PAGE_SIZE, PageRequest};
