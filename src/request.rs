//! Query composition and request document construction.

use crate::xml::XmlElement;
use crate::{Result, SearchError, SearchParameters};

/// Offset added to catalog category codes.
pub const CATEGORY_OFFSET: u64 = 9_000_000;
/// Offset added to theme codes.
pub const THEME_OFFSET: u64 = 4_000_000;
/// Offset added to geo codes.
pub const GEO_OFFSET: u64 = 11_000_000;

/// Documents per group; the service returns one document per result entry.
const DOCS_IN_GROUP: u32 = 1;

/// Builds the boolean query string sent in the `query` element.
///
/// Host, site and domain filters are appended in that order, each as a
/// single term or a parenthesized `|` clause. Category, theme and geo codes
/// follow as offset `cat:` terms.
pub fn compose_query(params: &SearchParameters) -> String {
    let mut query = params.query().to_string();

    let filters = [
        filter_clause("host", params.hosts(), true),
        filter_clause("site", params.sites(), true),
        filter_clause("domain", params.domains(), false),
    ];
    for clause in filters.into_iter().flatten() {
        if !query.is_empty() {
            query.push(' ');
        }
        query.push_str(&clause);
    }

    let categories = [
        (params.cat(), CATEGORY_OFFSET),
        (params.theme(), THEME_OFFSET),
        (params.geo(), GEO_OFFSET),
    ];
    for (code, offset) in categories {
        if let Some(code) = code {
            query.push_str(&format!(" cat:{}", u64::from(code) + offset));
        }
    }

    query
}

fn filter_clause(field: &str, values: &[String], quoted: bool) -> Option<String> {
    let term = |value: &String| {
        if quoted {
            format!("{}:\"{}\"", field, value)
        } else {
            format!("{}:{}", field, value)
        }
    };

    match values {
        [] => None,
        [single] => Some(term(single)),
        many => Some(format!(
            "({})",
            many.iter().map(term).collect::<Vec<_>>().join(" | ")
        )),
    }
}

/// The outbound request document, built once per call.
///
/// Child order of `request` is fixed: `query`, `page`, `groupings`,
/// `sortby`, then the five snippet options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDocument {
    root: XmlElement,
}

impl RequestDocument {
    /// Builds the document tree from the parameters.
    pub fn build(params: &SearchParameters) -> Self {
        let groupby = XmlElement::new("groupby")
            .with_attribute("attr", params.group_by().as_str())
            .with_attribute("mode", params.group_mode().as_str())
            .with_attribute("groups-on-page", params.limit())
            .with_attribute("docs-in-group", DOCS_IN_GROUP);

        let mut root = XmlElement::new("request")
            .with_child(XmlElement::new("query").with_text(compose_query(params)))
            .with_child(XmlElement::new("page").with_text(params.page()))
            .with_child(XmlElement::new("groupings").with_child(groupby))
            .with_child(XmlElement::new("sortby").with_text(params.sort_by().as_str()));

        for (name, value) in params.options().wire_fields() {
            root = root.with_child(XmlElement::new(name).with_text(value));
        }

        Self { root }
    }

    /// Returns the root `request` element.
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Returns the composed query text.
    pub fn query(&self) -> String {
        self.root
            .child("query")
            .map(XmlElement::text)
            .unwrap_or_default()
    }

    /// Serializes the document with its XML declaration.
    pub fn to_xml(&self) -> Result<String> {
        self.root.to_document().map_err(SearchError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{GroupBy, GroupMode, SortBy, MAX_TITLE_LENGTH};

    #[test]
    fn test_compose_query_text_only() {
        let params = SearchParameters::new("rust");
        assert_eq!(compose_query(&params), "rust");
    }

    #[test]
    fn test_compose_query_single_host() {
        let params = SearchParameters::new("test").with_host("example.com");
        let query = compose_query(&params);
        assert_eq!(query, "test host:\"example.com\"");
        assert_eq!(query.matches("host:\"example.com\"").count(), 1);
    }

    #[test]
    fn test_compose_query_host_without_text_has_no_leading_space() {
        let params = SearchParameters::new("").with_host("example.com");
        assert_eq!(compose_query(&params), "host:\"example.com\"");
    }

    #[test]
    fn test_compose_query_host_list() {
        let params = SearchParameters::new("q").with_hosts(["a.com", "b.com"]);
        assert_eq!(compose_query(&params), "q (host:\"a.com\" | host:\"b.com\")");
    }

    #[test]
    fn test_compose_query_single_element_list_is_bare() {
        let params = SearchParameters::new("q").with_hosts(["a.com"]);
        assert_eq!(compose_query(&params), "q host:\"a.com\"");
    }

    #[test]
    fn test_compose_query_site_list() {
        let params = SearchParameters::new("q").with_sites(["a", "b"]);
        assert_eq!(compose_query(&params), "q (site:\"a\" | site:\"b\")");
    }

    #[test]
    fn test_compose_query_skips_blank_filters() {
        let params = SearchParameters::new("").with_host("");
        assert_eq!(compose_query(&params), "");

        let params = SearchParameters::new("rust").with_site("").with_domain("");
        assert_eq!(compose_query(&params), "rust");
    }

    #[test]
    fn test_compose_query_domain_unquoted() {
        let params = SearchParameters::new("q").with_domain("ru");
        assert_eq!(compose_query(&params), "q domain:ru");

        let params = SearchParameters::new("q").with_domains(["ru", "by"]);
        assert_eq!(compose_query(&params), "q (domain:ru | domain:by)");
    }

    #[test]
    fn test_compose_query_filter_order() {
        let params = SearchParameters::new("")
            .with_domain("ru")
            .with_site("docs.rs")
            .with_host("a.com");
        assert_eq!(
            compose_query(&params),
            "host:\"a.com\" site:\"docs.rs\" domain:ru"
        );
    }

    #[test]
    fn test_compose_query_category_offsets() {
        let params = SearchParameters::new("q")
            .with_host("a.com")
            .with_geo(213)
            .with_theme(7)
            .with_cat(12);
        assert_eq!(
            compose_query(&params),
            "q host:\"a.com\" cat:9000012 cat:4000007 cat:11000213"
        );
    }

    #[test]
    fn test_compose_query_category_keeps_leading_space_on_empty_query() {
        let params = SearchParameters::new("").with_cat(1);
        assert_eq!(compose_query(&params), " cat:9000001");
    }

    #[test]
    fn test_compose_query_empty() {
        assert_eq!(compose_query(&SearchParameters::new("")), "");
    }

    #[test]
    fn test_document_element_order() {
        let doc = RequestDocument::build(&SearchParameters::new("q"));
        let names: Vec<_> = doc.root().elements().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "query",
                "page",
                "groupings",
                "sortby",
                "maxpassages",
                "max-title-length",
                "max-headline-length",
                "max-passage-length",
                "max-text-length",
            ]
        );
    }

    #[test]
    fn test_document_values() {
        let params = SearchParameters::new("test")
            .with_host("example.com")
            .with_page(0)
            .with_limit(10)
            .unwrap();
        let doc = RequestDocument::build(&params);
        assert_eq!(doc.query(), "test host:\"example.com\"");
        assert_eq!(doc.root().child("page").unwrap().text(), "0");
        assert_eq!(doc.root().child("sortby").unwrap().text(), "rlv");
        assert_eq!(doc.root().child("maxpassages").unwrap().text(), "2");
        assert_eq!(doc.root().child("max-text-length").unwrap().text(), "640");
    }

    #[test]
    fn test_document_groupby_attributes() {
        let params = SearchParameters::new("q")
            .with_limit(25)
            .unwrap()
            .with_group_by(GroupBy::Site, GroupMode::Deep);
        let doc = RequestDocument::build(&params);
        let groupby = doc.root().path(&["groupings", "groupby"]).unwrap();
        let attrs: Vec<_> = groupby
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            attrs,
            vec![
                ("attr", "d"),
                ("mode", "deep"),
                ("groups-on-page", "25"),
                ("docs-in-group", "1"),
            ]
        );
    }

    #[test]
    fn test_document_group_none_is_flat() {
        let params = SearchParameters::new("q").with_group_by(GroupBy::None, GroupMode::Wide);
        let doc = RequestDocument::build(&params);
        let groupby = doc.root().path(&["groupings", "groupby"]).unwrap();
        assert_eq!(groupby.attribute("attr"), Some(""));
        assert_eq!(groupby.attribute("mode"), Some("flat"));
    }

    #[test]
    fn test_document_uses_option_overrides() {
        let params = SearchParameters::new("q")
            .with_sort_by(SortBy::ModifiedTime)
            .with_option(MAX_TITLE_LENGTH, 90)
            .unwrap();
        let doc = RequestDocument::build(&params);
        assert_eq!(doc.root().child("sortby").unwrap().text(), "tm");
        assert_eq!(doc.root().child("max-title-length").unwrap().text(), "90");
    }

    #[test]
    fn test_to_xml() {
        let params = SearchParameters::new("test").with_host("example.com");
        let xml = RequestDocument::build(&params).to_xml().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?><request>"));
        let query_start = xml.find("<query>").unwrap();
        let query_end = xml.find("</query>").unwrap();
        assert!(query_start < query_end);
        assert!(xml[query_start..query_end].contains("example.com"));
        assert!(xml.contains(
            "<groupings><groupby attr=\"\" mode=\"flat\" groups-on-page=\"10\" docs-in-group=\"1\"/></groupings>"
        ));
        assert!(xml.ends_with("<max-text-length>640</max-text-length></request>"));
    }
}
