//! HTTP download port
//!
//! The fixture fetcher only needs "GET this URL and stream the body into
//! this writer".

use std::io::Write;

use thiserror::Error;

/// Errors from a single GET request
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connecting, waiting for headers or a single body read took too long
    #[error("timed out fetching {url}")]
    Timeout {
        /// Requested URL
        url: String,
    },

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL
        url: String,
        /// Response status code
        status: u16,
    },

    /// Connection, DNS, body transfer or sink write failure
    #[error("network error fetching {url}: {message}")]
    Network {
        /// Requested URL
        url: String,
        /// Underlying error description
        message: String,
    },

    /// The request could not even be built (bad URL, client setup)
    #[error("invalid request for {url}: {message}")]
    Invalid {
        /// Requested URL
        url: String,
        /// Underlying error description
        message: String,
    },
}

impl HttpError {
    /// Whether retrying the same request might succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Status { .. } | Self::Network { .. })
    }
}

/// Blocking HTTP GET
pub trait HttpClient {
    /// Stream the body of `url` into `sink`, returning the bytes written.
    ///
    /// On error `sink` may hold a partial body.
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64, HttpError>;
}
