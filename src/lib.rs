//! # yandex-xml
//!
//! A client for the Yandex.XML keyword search service.
//!
//! The service takes an XML request document over HTTP and answers with an
//! XML document of ranked, highlighted results. This library provides:
//!
//! - Typed search parameters with chained setters
//! - Query composition (host/site/domain filters, category codes)
//! - Request document building and serialization
//! - Response parsing with service error detection
//! - A page bar for rendering pagination
//!
//! ## Example
//!
//! ```rust,no_run
//! use yandex_xml::{ClientConfig, SearchClient, SearchParameters};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SearchClient::new(ClientConfig::new("user", "key"));
//!
//!     let params = SearchParameters::new("rust programming")
//!         .with_host("doc.rust-lang.org")
//!         .with_limit(10)?;
//!     let response = client.search(&params).await?;
//!
//!     for result in response.items() {
//!         println!("{}: {}", result.title, result.url);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod query;
mod request;
mod response;
mod result;
mod search;
mod xml;

pub mod highlight;
pub mod pagination;
pub mod proxy;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{Result, SearchError};
pub use pagination::{PageBar, PageEntry, PageKind};
pub use proxy::{ProxyConfig, ProxyProtocol};
pub use query::{
    ContentFilter, GroupBy, GroupMode, Locale, SearchOptions, SearchParameters, SortBy,
    DEFAULT_LIMIT, DEFAULT_OPTIONS, MAX_HEADLINE_LENGTH, MAX_PASSAGES, MAX_PASSAGE_LENGTH,
    MAX_TEXT_LENGTH, MAX_TITLE_LENGTH,
};
pub use request::{compose_query, RequestDocument, CATEGORY_OFFSET, GEO_OFFSET, THEME_OFFSET};
pub use response::ResponseParser;
pub use result::{SearchResponse, SearchResult};
pub use search::SearchClient;
pub use transport::{HttpTransport, Transport};
pub use xml::{XmlElement, XmlNode};
