use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

use crate::error::CheckError;

/// Request timeout applied when the caller does not pick one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Thin wrapper over a reqwest client with a fixed per-request timeout.
///
/// No custom headers are sent and TLS validation is left at the reqwest
/// defaults. Redirects follow the client's default policy.
pub struct HttpClient {
    inner: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, CheckError> {
        let inner = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(CheckError::Client)?;

        Ok(Self { inner, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issues a single GET. The body is left unread.
    pub async fn get(&self, url: &str) -> Result<Response, reqwest::Error> {
        self.inner
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
    }
}
