pub mod core;
pub mod error;
pub mod http;
pub mod modules;
pub mod utils;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub use crate::core::engine::CheckEngine;
pub use crate::core::inspector::{evaluate, HeaderInspector};
pub use crate::core::result::{CheckResult, ResultAggregator, Summary, NOT_SET};
pub use crate::error::CheckError;
pub use crate::http::client::DEFAULT_TIMEOUT_SECS;
pub use crate::http::HttpClient;
pub use crate::modules::export::{export, load_json, to_pretty_json, ExportFormat, FORMAT_NAMES};
pub use crate::modules::poc::{generate_poc, generate_poc_with, render_poc, PocOptions, DEFAULT_POC_PATH};
pub use crate::utils::{collect_targets, read_targets};

/// Run configuration assembled by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckConfig {
    pub url: Option<String>,
    pub bulk: Option<String>,
    pub poc: Option<String>,
    pub poc_output: String,
    pub escape_poc: bool,
    pub output: Option<String>,
    pub format: ExportFormat,
    pub timeout: u64,
    pub verbose: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            url: None,
            bulk: None,
            poc: None,
            poc_output: DEFAULT_POC_PATH.to_string(),
            escape_poc: false,
            output: None,
            format: ExportFormat::Json,
            timeout: DEFAULT_TIMEOUT_SECS,
            verbose: false,
        }
    }
}

impl CheckConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn poc_options(&self) -> PocOptions {
        PocOptions {
            escape_url: self.escape_poc,
        }
    }
}

/// Output abstraction for the check pipeline.
pub trait CheckEventSink: Send + Sync {
    fn on_log(&self, level: &str, message: &str);
    fn on_result(&self, result: &CheckResult);
    fn on_progress(&self, url: &str, current: usize, total: usize);
}

pub type SinkRef = Arc<dyn CheckEventSink>;

/// Colored terminal sink. Errors go to stderr, everything else to stdout.
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new_ref() -> SinkRef {
        Arc::new(Self)
    }
}

impl CheckEventSink for ConsoleSink {
    fn on_log(&self, level: &str, message: &str) {
        use colored::*;
        match level {
            "success" => println!("{}", message.green()),
            "error"   => eprintln!("{}", message.red()),
            "warn"    => println!("{}", message.yellow()),
            "banner"  => println!("{}", message.bright_cyan().bold()),
            _         => println!("{}", message),
        }
    }

    fn on_result(&self, result: &CheckResult) {
        use colored::*;
        match result {
            CheckResult::Success { url, vulnerable: true, .. } => {
                println!("    {} {} has no framing protection", "[VULNERABLE]".red().bold(), url.white());
            }
            CheckResult::Success { url, x_frame_options, content_security_policy, .. } => {
                println!(
                    "    {} {} (X-Frame-Options: {} | CSP: {})",
                    "[PROTECTED]".green().bold(),
                    url.white(),
                    x_frame_options.cyan(),
                    content_security_policy.dimmed()
                );
            }
            CheckResult::Failure { url, error } => {
                eprintln!("    {} {}: {}", "[FAILED]".yellow().bold(), url, error.dimmed());
            }
        }
    }

    fn on_progress(&self, url: &str, current: usize, total: usize) {
        use colored::*;
        if total > 1 {
            println!("{} Checking {} ({}/{})", "[INFO]".bright_cyan(), url, current, total);
        } else {
            println!("{} Checking {}", "[INFO]".bright_cyan(), url);
        }
    }
}
