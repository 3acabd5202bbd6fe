use std::error::Error as StdError;
use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, CONTENT_SECURITY_POLICY, X_FRAME_OPTIONS};

use crate::core::result::{CheckResult, NOT_SET};
use crate::error::CheckError;
use crate::http::HttpClient;

/// Fetches a URL and judges whether it can be framed.
///
/// One GET per call, no retries, the body is never read. Transport failures
/// come back as `CheckResult::Failure` so a bad target never aborts a run.
pub struct HeaderInspector {
    client: HttpClient,
}

impl HeaderInspector {
    pub fn new(timeout: Duration) -> Result<Self, CheckError> {
        Ok(Self {
            client: HttpClient::new(timeout)?,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.client.timeout()
    }

    pub async fn check(&self, url: &str) -> CheckResult {
        match self.client.get(url).await {
            Ok(response) => {
                debug!("{} -> HTTP {}", url, response.status());
                evaluate(url, response.headers())
            }
            Err(e) => {
                let message = error_chain(&e);
                debug!("{} -> request failed: {}", url, message);
                CheckResult::failure(url, message)
            }
        }
    }
}

/// Builds a record from response headers. Lookups are case-insensitive.
pub fn evaluate(url: &str, headers: &HeaderMap) -> CheckResult {
    CheckResult::success(
        url,
        header_or_not_set(headers, &X_FRAME_OPTIONS),
        header_or_not_set(headers, &CONTENT_SECURITY_POLICY),
    )
}

/// Repeated headers are joined with ", ". Non-ASCII bytes are decoded lossily
/// so a present-but-odd header still counts as present.
fn header_or_not_set(headers: &HeaderMap, name: &HeaderName) -> String {
    let values: Vec<String> = headers
        .get_all(name)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect();

    if values.is_empty() {
        NOT_SET.to_string()
    } else {
        values.join(", ")
    }
}

/// reqwest's top-level message hides the cause (DNS, refused, timeout).
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
