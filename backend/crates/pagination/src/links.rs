//! Navigation links for a page.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Page;

/// Absolute URLs pointing at neighbouring pages.
///
/// Every query parameter of the request URL except `page` is preserved, so
/// filters carry over while navigating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    /// Link to the first page.
    pub first: String,
    /// Link to the last page.
    pub last: String,
    /// Link to the previous page, absent on the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    /// Link to the next page, absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PageLinks {
    /// Derive links for `page` from the URL that produced it.
    #[must_use]
    pub fn for_page<T>(request_url: &Url, page: &Page<T>) -> Self {
        let current = page.current_page();
        let prev = (current > 1).then(|| with_page(request_url, current.saturating_sub(1)));
        let next = page
            .has_more()
            .then(|| with_page(request_url, current.saturating_add(1)));
        Self {
            first: with_page(request_url, 1),
            last: with_page(request_url, page.last_page()),
            prev,
            next,
        }
    }
}

fn with_page(base: &Url, page: u32) -> String {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("page", &page.to_string());
    url.to_string()
}

#[cfg(test)]
mod tests {
    //! Unit coverage for link derivation.
    use super::*;
    use crate::PageRequest;
    use rstest::rstest;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[rstest]
    fn middle_page_links_both_directions() -> TestResult {
        let url = Url::parse("http://localhost/api/v1/travel-orders?status=approved&page=2")?;
        let page: Page<u8> = Page::new(Vec::new(), PageRequest::new(2, 10)?, 30);
        let links = PageLinks::for_page(&url, &page);
        assert_eq!(
            links.first,
            "http://localhost/api/v1/travel-orders?status=approved&page=1"
        );
        assert_eq!(
            links.prev.as_deref(),
            Some("http://localhost/api/v1/travel-orders?status=approved&page=1")
        );
        assert_eq!(
            links.next.as_deref(),
            Some("http://localhost/api/v1/travel-orders?status=approved&page=3")
        );
        assert_eq!(
            links.last,
            "http://localhost/api/v1/travel-orders?status=approved&page=3"
        );
        Ok(())
    }

    #[rstest]
    fn single_page_has_no_neighbours() -> TestResult {
        let url = Url::parse("http://localhost/orders")?;
        let page: Page<u8> = Page::new(vec![1], PageRequest::first(10)?, 1);
        let links = PageLinks::for_page(&url, &page);
        assert!(links.prev.is_none());
        assert!(links.next.is_none());
        assert_eq!(links.last, "http://localhost/orders?page=1");
        Ok(())
    }
}
