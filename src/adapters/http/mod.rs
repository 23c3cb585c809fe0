//! HTTP adapter
//!
//! Implements [`HttpClient`] with a blocking `reqwest` client.
//!
//! The timeout bounds connecting, waiting for the response headers and each
//! individual body read. It is not a deadline on the whole transfer, so a
//! large file that keeps arriving is never cut off.

use std::io::Write;
use std::time::Duration;

use crate::core::ports::{HttpClient, HttpError};

/// `User-Agent` sent with fixture downloads
pub const USER_AGENT: &str = concat!("upkeep-fixtures/", env!("CARGO_PKG_VERSION"));

/// Blocking reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Build a client whose connect, header and per-read waits are bounded by `timeout`
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64, HttpError> {
        let mut response = self.client.get(url).send().map_err(|e| classify(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Read by read, so the timeout applies to each chunk rather than the body
        response.copy_to(sink).map_err(|e| classify(url, &e))
    }
}

fn classify(url: &str, e: &reqwest::Error) -> HttpError {
    let url = url.to_string();
    if e.is_timeout() {
        HttpError::Timeout { url }
    } else if e.is_builder() {
        HttpError::Invalid {
            url,
            message: e.to_string(),
        }
    } else if let Some(status) = e.status() {
        HttpError::Status {
            url,
            status: status.as_u16(),
        }
    } else {
        HttpError::Network {
            url,
            message: e.to_string(),
        }
    }
}
