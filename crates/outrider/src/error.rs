//! Error types for the egress layer.

use thiserror::Error;

/// Errors produced by proxy resolution and request dispatch.
///
/// Transport failures carry the underlying [`reqwest::Error`] unchanged so
/// callers can distinguish connection, DNS, TLS, and proxy failures by kind.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A resolved proxy URL could not be turned into a transport binding.
    ///
    /// Surfaced at registry build time so a bad slot fails before serving
    /// any request through it.
    #[error("Proxy configuration error: {0}")]
    Configuration(String),

    /// The request URL could not be parsed.
    ///
    /// Raised before any agent or network resource is touched. This is not
    /// a proxy failure and is never logged as one.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure: connection refused, DNS resolution, TLS
    /// negotiation, or a proxy hop.
    ///
    /// HTTP responses with non-2xx status are not errors at this layer;
    /// they come back as ordinary responses.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization failure while building a request body.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error came from the underlying transport.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The underlying transport failure, if that is what this error is.
    #[must_use]
    pub const fn as_transport(&self) -> Option<&reqwest::Error> {
        match self {
            Self::Transport(source) => Some(source),
            _ => None,
        }
    }
}
