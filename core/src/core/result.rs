use serde::{Deserialize, Serialize};

use crate::SinkRef;

/// Placeholder recorded for a header the server did not send.
pub const NOT_SET: &str = "Not Set";

/// Outcome of checking one URL.
///
/// Serialized untagged so that a success record reads
/// `{"url", "x_frame_options", "content_security_policy", "vulnerable"}` and a
/// failure record reads `{"url", "error"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckResult {
    Success {
        url: String,
        x_frame_options: String,
        content_security_policy: String,
        vulnerable: bool,
    },
    Failure {
        url: String,
        error: String,
    },
}

impl CheckResult {
    /// Builds a success record; the verdict is derived from the two header values.
    pub fn success(
        url: impl Into<String>,
        x_frame_options: impl Into<String>,
        content_security_policy: impl Into<String>,
    ) -> Self {
        let x_frame_options = x_frame_options.into();
        let content_security_policy = content_security_policy.into();
        let vulnerable = x_frame_options == NOT_SET && content_security_policy == NOT_SET;
        CheckResult::Success {
            url: url.into(),
            x_frame_options,
            content_security_policy,
            vulnerable,
        }
    }

    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        CheckResult::Failure {
            url: url.into(),
            error: error.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            CheckResult::Success { url, .. } | CheckResult::Failure { url, .. } => url,
        }
    }

    /// Failures are unknown, never vulnerable.
    pub fn is_vulnerable(&self) -> bool {
        matches!(self, CheckResult::Success { vulnerable: true, .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CheckResult::Failure { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CheckResult::Failure { error, .. } => Some(error),
            CheckResult::Success { .. } => None,
        }
    }
}

/// Counts per verdict over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub vulnerable: usize,
    pub protected: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            if r.is_error() {
                acc.failed += 1;
            } else if r.is_vulnerable() {
                acc.vulnerable += 1;
            } else {
                acc.protected += 1;
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.vulnerable + self.protected + self.failed
    }
}

/// Reports collected results through a sink.
pub struct ResultAggregator;

impl ResultAggregator {
    pub fn report_summary(results: &[CheckResult], sink: &SinkRef) -> Summary {
        let summary = Summary::from_results(results);

        if summary.total() == 0 {
            sink.on_log("warn", "[WARN] No URLs were checked.");
            return summary;
        }

        let line = format!(
            "[INFO] {} checked: {} vulnerable, {} protected, {} failed",
            summary.total(),
            summary.vulnerable,
            summary.protected,
            summary.failed
        );
        let level = if summary.vulnerable > 0 { "warn" } else { "success" };
        sink.on_log(level, &line);

        for r in results.iter().filter(|r| r.is_vulnerable()) {
            sink.on_log("error", &format!("  [VULNERABLE] {}", r.url()));
        }
        summary
    }
}
