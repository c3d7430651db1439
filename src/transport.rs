//! HTTP transport for request documents.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;

use crate::proxy::ProxyConfig;
use crate::{ClientConfig, Result};

const XML_MIME: &str = "application/xml";

/// Sends a serialized request document and returns the raw response body.
///
/// Implementations make exactly one attempt per call and do not interpret
/// the HTTP status.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` to `url`, optionally through `proxy`.
    async fn post_xml(&self, url: &str, body: String, proxy: Option<&ProxyConfig>)
        -> Result<Vec<u8>>;
}

/// Transport backed by reqwest.
///
/// Connections are forced over IPv4 and HTTP/1.1.
pub struct HttpTransport {
    user_agent: String,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl HttpTransport {
    /// Creates a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout_duration(),
            accept_invalid_certs: config.accept_invalid_certs,
        }
    }

    /// Builds a reqwest client for one request.
    pub fn build_client(&self, proxy: Option<&ProxyConfig>) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .http1_only()
            .local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            .danger_accept_invalid_certs(self.accept_invalid_certs);

        if let Some(proxy) = proxy {
            debug!("Using proxy: {}:{}", proxy.host, proxy.port);
            builder = builder.proxy(proxy.to_reqwest()?);
        }

        Ok(builder.build()?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_xml(
        &self,
        url: &str,
        body: String,
        proxy: Option<&ProxyConfig>,
    ) -> Result<Vec<u8>> {
        let client = self.build_client(proxy)?;
        let response = client
            .post(url)
            .header(CONTENT_TYPE, XML_MIME)
            .header(ACCEPT, XML_MIME)
            .body(body)
            .send()
            .await?;
        debug!("Search service answered with status {}", response.status());
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
