//! Search result types.

use serde::{Deserialize, Serialize};

use crate::pagination::PageBar;

/// A single matched document.
///
/// Text fields hold highlighted markup as produced by the configured
/// highlighter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Document URL.
    pub url: String,
    /// Document domain.
    pub domain: String,
    /// Highlighted title; the URL when the service sent no title.
    pub title: String,
    /// Highlighted headline.
    pub headline: Option<String>,
    /// Highlighted passages, in service order.
    pub passages: Vec<String>,
    /// Highlighted sitelinks block.
    pub sitelinks: Option<String>,
}

impl SearchResult {
    /// Creates a result whose title is its URL.
    pub fn new(url: impl Into<String>, domain: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: url.clone(),
            url,
            domain: domain.into(),
            headline: None,
            passages: Vec::new(),
            sitelinks: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the headline.
    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }

    /// Adds a passage.
    pub fn with_passage(mut self, passage: impl Into<String>) -> Self {
        self.passages.push(passage.into());
        self
    }

    /// Sets the sitelinks block.
    pub fn with_sitelinks(mut self, sitelinks: impl Into<String>) -> Self {
        self.sitelinks = Some(sitelinks.into());
        self
    }
}

/// Parsed response of one search call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    results: Vec<SearchResult>,
    total: u64,
    total_human: String,
    pages: u32,
    page: u32,
    limit: u32,
}

impl SearchResponse {
    /// Creates a response for the request's `page` and `limit`.
    ///
    /// The page count is `total / limit` rounded down.
    pub fn new(
        results: Vec<SearchResult>,
        total: u64,
        total_human: impl Into<String>,
        page: u32,
        limit: u32,
    ) -> Self {
        let pages = total
            .checked_div(u64::from(limit))
            .map(|pages| u32::try_from(pages).unwrap_or(u32::MAX))
            .unwrap_or(0);
        Self {
            results,
            total,
            total_human: total_human.into(),
            pages,
            page,
            limit,
        }
    }

    /// Returns the results.
    pub fn items(&self) -> &[SearchResult] {
        &self.results
    }

    /// Consumes the response and returns the results.
    pub fn into_items(self) -> Vec<SearchResult> {
        self.results
    }

    /// Total number of matching documents.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Total as phrased by the service, e.g. "found 2 thousand answers".
    pub fn total_human(&self) -> &str {
        &self.total_human
    }

    /// Number of pages: `total / limit`, rounded down.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Zero-based page index of the request.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Results per page of the request.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Whether a "next page" link should be offered.
    pub fn has_next_page(&self) -> bool {
        self.page < self.pages && self.pages > 1
    }

    /// Returns the page bar for this response.
    pub fn page_bar(&self) -> PageBar {
        PageBar::new(self.page, self.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_new() {
        let result = SearchResult::new("https://example.com", "example.com");
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.domain, "example.com");
        assert_eq!(result.title, "https://example.com");
        assert!(result.headline.is_none());
        assert!(result.passages.is_empty());
        assert!(result.sitelinks.is_none());
    }

    #[test]
    fn test_search_result_builder() {
        let result = SearchResult::new("u", "d")
            .with_title("Title")
            .with_headline("Head")
            .with_passage("one")
            .with_passage("two")
            .with_sitelinks("links");
        assert_eq!(result.title, "Title");
        assert_eq!(result.headline.as_deref(), Some("Head"));
        assert_eq!(result.passages, vec!["one", "two"]);
        assert_eq!(result.sitelinks.as_deref(), Some("links"));
    }

    #[test]
    fn test_pages_round_down() {
        assert_eq!(SearchResponse::new(vec![], 25, "", 0, 10).pages(), 2);
        assert_eq!(SearchResponse::new(vec![], 20, "", 0, 10).pages(), 2);
        assert_eq!(SearchResponse::new(vec![], 9, "", 0, 10).pages(), 0);
        assert_eq!(SearchResponse::new(vec![], 0, "", 0, 10).pages(), 0);
        assert_eq!(SearchResponse::new(vec![], 1000, "", 0, 7).pages(), 142);
    }

    #[test]
    fn test_pages_saturate() {
        let response = SearchResponse::new(vec![], u64::MAX, "", 0, 1);
        assert_eq!(response.pages(), u32::MAX);
    }

    #[test]
    fn test_accessors() {
        let response = SearchResponse::new(
            vec![SearchResult::new("u", "d")],
            42,
            "42 answers",
            1,
            10,
        );
        assert_eq!(response.items().len(), 1);
        assert_eq!(response.total(), 42);
        assert_eq!(response.total_human(), "42 answers");
        assert_eq!(response.page(), 1);
        assert_eq!(response.limit(), 10);
        assert_eq!(response.pages(), 4);
    }

    #[test]
    fn test_has_next_page() {
        assert!(SearchResponse::new(vec![], 100, "", 0, 10).has_next_page());
        assert!(!SearchResponse::new(vec![], 100, "", 10, 10).has_next_page());
        assert!(!SearchResponse::new(vec![], 15, "", 0, 10).has_next_page());
    }

    #[test]
    fn test_page_bar_uses_response_position() {
        let response = SearchResponse::new(vec![], 100, "", 3, 10);
        let bar = response.page_bar();
        assert_eq!(bar.current(), 3);
        assert_eq!(bar.pages(), 10);
    }

    #[test]
    fn test_search_response_serialization() {
        let response = SearchResponse::new(vec![SearchResult::new("u", "d")], 5, "five", 0, 10);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"total\":5"));
        assert!(json.contains("\"total_human\":\"five\""));
    }
}
