//! Error types for the search client.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while configuring or executing a search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A parameter was set to a value the service does not accept.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Neither query text nor a host filter was supplied.
    #[error("Empty query: set query text or a host filter")]
    EmptyQuery,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body is not a usable XML document.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// Parser diagnostic.
        message: String,
        /// Raw response body as received.
        body: Vec<u8>,
    },

    /// The service answered with an `error` element.
    #[error("Remote service error {code}: {message}")]
    RemoteService {
        /// Numeric error code from the `code` attribute.
        code: i64,
        /// Error text.
        message: String,
    },

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The request document could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl SearchError {
    /// Returns the raw response body for [`SearchError::MalformedResponse`].
    pub fn raw_body(&self) -> Option<&[u8]> {
        match self {
            Self::MalformedResponse { body, .. } => Some(body),
            _ => None,
        }
    }
}
