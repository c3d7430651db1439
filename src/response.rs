//! Response document parsing.

use crate::highlight::{highlight, Highlighter};
use crate::xml::{parse_document, XmlElement};
use crate::{Result, SearchError, SearchResponse, SearchResult};

/// Turns raw response bodies into [`SearchResponse`] values.
#[derive(Clone, Copy)]
pub struct ResponseParser {
    highlighter: Highlighter,
}

impl ResponseParser {
    /// Creates a parser using the default `<hlword>` highlighter.
    pub fn new() -> Self {
        Self {
            highlighter: highlight,
        }
    }

    /// Creates a parser with a custom highlight transform.
    pub fn with_highlighter(highlighter: Highlighter) -> Self {
        Self { highlighter }
    }

    /// Parses a response body for a request made with `page` and `limit`.
    pub fn parse(&self, body: &[u8], page: u32, limit: u32) -> Result<SearchResponse> {
        let malformed = |message: String| SearchError::MalformedResponse {
            message,
            body: body.to_vec(),
        };

        let text = std::str::from_utf8(body).map_err(|e| malformed(e.to_string()))?;
        let root = parse_document(text).map_err(malformed)?;

        // The live service wraps `response` in a `yandexsearch` root.
        let response = if root.name == "response" {
            &root
        } else {
            root.child("response")
                .ok_or_else(|| malformed(format!("no response element under <{}>", root.name)))?
        };

        if let Some(error) = response.child("error") {
            let code = error
                .attribute("code")
                .and_then(|code| code.trim().parse().ok())
                .unwrap_or_default();
            return Err(SearchError::RemoteService {
                code,
                message: error.text(),
            });
        }

        let results = response
            .path(&["results", "grouping"])
            .into_iter()
            .flat_map(|grouping| grouping.children_named("group"))
            .filter_map(|group| group.child("doc"))
            .map(|doc| self.parse_doc(doc))
            .collect();

        let total = response
            .children_named("found")
            .find(|found| found.attribute("priority") == Some("all"))
            .and_then(|found| found.text().trim().parse().ok())
            .unwrap_or(0);

        let total_human = response
            .child("found-human")
            .map(XmlElement::text)
            .unwrap_or_default();

        Ok(SearchResponse::new(results, total, total_human, page, limit))
    }

    fn parse_doc(&self, doc: &XmlElement) -> SearchResult {
        let field = |name: &str| doc.child(name).map(XmlElement::text).unwrap_or_default();
        let marked = |element: &XmlElement| (self.highlighter)(&element.inner_xml());

        let mut result = SearchResult::new(field("url"), field("domain"));
        if let Some(title) = doc.child("title") {
            result = result.with_title(marked(title));
        }
        if let Some(headline) = doc.child("headline") {
            result = result.with_headline(marked(headline));
        }
        if let Some(passages) = doc.child("passages") {
            result = passages
                .children_named("passage")
                .fold(result, |result, passage| result.with_passage(marked(passage)));
        }
        if let Some(link) = doc.path(&["snippets", "sitelinks", "link"]) {
            result = result.with_sitelinks(marked(link));
        }
        result
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<yandexsearch version="1.0">
  <request><query>rust</query></request>
  <response date="20240101T000000">
    <found priority="phrase">130</found>
    <found priority="strict">120</found>
    <found priority="all">125</found>
    <found-human>found 125 answers</found-human>
    <results>
      <grouping attr="" mode="flat" groups-on-page="10" docs-in-group="1">
        <group>
          <doc id="1">
            <url>https://www.rust-lang.org/</url>
            <domain>www.rust-lang.org</domain>
            <title><hlword>Rust</hlword> Programming Language</title>
            <headline>A language empowering everyone</headline>
            <passages>
              <passage>Why <hlword>Rust</hlword>?</passage>
              <passage>Fast &amp; safe</passage>
            </passages>
            <snippets><sitelinks><link>Install | Learn</link></sitelinks></snippets>
          </doc>
        </group>
        <group>
          <doc id="2">
            <url>https://doc.rust-lang.org/book/</url>
            <domain>doc.rust-lang.org</domain>
          </doc>
        </group>
      </grouping>
    </results>
  </response>
</yandexsearch>"#;

    #[test]
    fn test_parse_results() {
        let response = ResponseParser::new()
            .parse(RESPONSE.as_bytes(), 0, 10)
            .unwrap();
        assert_eq!(response.items().len(), 2);

        let first = &response.items()[0];
        assert_eq!(first.url, "https://www.rust-lang.org/");
        assert_eq!(first.domain, "www.rust-lang.org");
        assert_eq!(first.title, "<strong>Rust</strong> Programming Language");
        assert_eq!(first.headline.as_deref(), Some("A language empowering everyone"));
        assert_eq!(
            first.passages,
            vec!["Why <strong>Rust</strong>?", "Fast &amp; safe"]
        );
        assert_eq!(first.sitelinks.as_deref(), Some("Install | Learn"));
    }

    #[test]
    fn test_parse_missing_optional_fields() {
        let response = ResponseParser::new()
            .parse(RESPONSE.as_bytes(), 0, 10)
            .unwrap();
        let second = &response.items()[1];
        assert_eq!(second.title, "https://doc.rust-lang.org/book/");
        assert!(second.headline.is_none());
        assert!(second.passages.is_empty());
        assert!(second.sitelinks.is_none());
    }

    #[test]
    fn test_parse_totals_and_pages() {
        let response = ResponseParser::new()
            .parse(RESPONSE.as_bytes(), 2, 10)
            .unwrap();
        assert_eq!(response.total(), 125);
        assert_eq!(response.total_human(), "found 125 answers");
        assert_eq!(response.pages(), 12);
        assert_eq!(response.page(), 2);
        assert_eq!(response.limit(), 10);
    }

    #[test]
    fn test_parse_bare_response_root() {
        let body = r#"<response><found priority="all">25</found><found-human>25</found-human><results><grouping/></results></response>"#;
        let response = ResponseParser::new().parse(body.as_bytes(), 0, 10).unwrap();
        assert!(response.items().is_empty());
        assert_eq!(response.total(), 25);
        assert_eq!(response.pages(), 2);
    }

    #[test]
    fn test_parse_remote_error() {
        let body = r#"<yandexsearch><response><error code="15">Too many requests</error></response></yandexsearch>"#;
        let err = ResponseParser::new().parse(body.as_bytes(), 0, 10).unwrap_err();
        match err {
            SearchError::RemoteService { code, message } => {
                assert_eq!(code, 15);
                assert_eq!(message, "Too many requests");
            }
            other => panic!("Expected RemoteService, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_keeps_body() {
        let body = b"<html><body>502 Bad Gateway";
        let err = ResponseParser::new().parse(body, 0, 10).unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse { .. }));
        assert_eq!(err.raw_body(), Some(&body[..]));
    }

    #[test]
    fn test_parse_invalid_utf8_is_malformed() {
        let body = [0x3c, 0xff, 0xfe, 0x3e];
        let err = ResponseParser::new().parse(&body, 0, 10).unwrap_err();
        assert_eq!(err.raw_body(), Some(&body[..]));
    }

    #[test]
    fn test_parse_without_response_element_is_malformed() {
        let err = ResponseParser::new()
            .parse(b"<yandexsearch/>", 0, 10)
            .unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_custom_highlighter() {
        fn upper(raw: &str) -> String {
            raw.to_uppercase()
        }
        let response = ResponseParser::with_highlighter(upper)
            .parse(RESPONSE.as_bytes(), 0, 10)
            .unwrap();
        assert!(response.items()[0].title.starts_with("<HLWORD>RUST</HLWORD>"));
    }
}
