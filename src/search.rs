//! Search execution.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::highlight::Highlighter;
use crate::transport::{HttpTransport, Transport};
use crate::{
    ClientConfig, RequestDocument, ResponseParser, Result, SearchError, SearchParameters,
    SearchResponse,
};

/// Client for the XML search service.
///
/// Holds immutable settings only; each [`search`](Self::search) call builds
/// its own request document and returns its own response.
pub struct SearchClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    parser: ResponseParser,
}

impl SearchClient {
    /// Creates a client that talks HTTP to `config.base_url`.
    pub fn new(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(&config);
        Self::with_transport(config, transport)
    }

    /// Creates a client with a custom transport.
    pub fn with_transport<T: Transport + 'static>(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            parser: ResponseParser::new(),
        }
    }

    /// Replaces the highlight transform applied to titles and snippets.
    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.parser = ResponseParser::with_highlighter(highlighter);
        self
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the request URL: base URL plus credentials and region/locale/filter.
    pub fn request_url(&self, params: &SearchParameters) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("user", &self.config.user)
                .append_pair("key", &self.config.key);
            if let Some(region) = params.region() {
                pairs.append_pair("lr", &region.to_string());
            }
            if let Some(locale) = params.locale() {
                pairs.append_pair("l10n", locale.as_str());
            }
            if let Some(filter) = params.filter() {
                pairs.append_pair("filter", filter.as_str());
            }
        }
        Ok(url)
    }

    /// Executes one search.
    ///
    /// Fails with [`SearchError::EmptyQuery`] before any network traffic when
    /// both the query text and the host filter are empty.
    pub async fn search(&self, params: &SearchParameters) -> Result<SearchResponse> {
        if params.query().is_empty() && params.hosts().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let document = RequestDocument::build(params);
        let body = document.to_xml()?;
        let url = self.request_url(params)?;

        debug!(
            "Searching '{}' page {} on {}",
            document.query(),
            params.page(),
            self.config.base_url
        );

        let raw = self
            .transport
            .post_xml(url.as_str(), body, params.proxy())
            .await?;
        debug!("Received {} bytes", raw.len());

        let response = self.parser.parse(&raw, params.page(), params.limit())?;
        debug!(
            "Parsed {} results of {} total",
            response.items().len(),
            response.total()
        );
        Ok(response)
    }
}
