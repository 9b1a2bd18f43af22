//! Proxy agents: HTTP clients bound to one fixed forward proxy.

use reqwest::{Client, Proxy};

use crate::error::{Error, Result};

/// An HTTP client bound to a single forward proxy.
///
/// Every connection made through the agent's client goes to the configured
/// proxy, regardless of destination. Construction performs no I/O; the
/// first connection attempt happens on the first request.
///
/// The original URL string is kept verbatim for diagnostics and plays no
/// part in connection decisions once the client is built.
#[derive(Debug, Clone)]
pub struct ProxyAgent {
    proxy_url: String,
    client: Client,
}

impl ProxyAgent {
    /// Build an agent bound to `proxy_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the URL cannot be understood by
    /// the transport or the client cannot be constructed.
    pub fn new(proxy_url: impl Into<String>) -> Result<Self> {
        let proxy_url = proxy_url.into();

        let proxy = Proxy::all(&proxy_url).map_err(|e| {
            Error::Configuration(format!("invalid proxy URL {proxy_url:?}: {e}"))
        })?;

        let client = Client::builder().proxy(proxy).build().map_err(|e| {
            Error::Configuration(format!("failed to build client for proxy {proxy_url:?}: {e}"))
        })?;

        Ok(Self { proxy_url, client })
    }

    /// The configured proxy URL, exactly as supplied.
    #[must_use]
    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    /// The client whose connections are bound to this proxy.
    pub(crate) const fn client(&self) -> &Client {
        &self.client
    }
}
