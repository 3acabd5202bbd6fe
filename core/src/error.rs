use std::io;
use thiserror::Error;

use crate::modules::export::ExportFormat;

/// Errors surfaced by the checker. Per-URL network failures are not errors:
/// they are folded into `CheckResult::Failure` records by the inspector.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("File not found: {path}")]
    TargetsNotFound {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("unsupported format '{0}' (expected one of: json, csv, txt, xlsx)")]
    UnsupportedFormat(String),

    #[error("no results to export as {format}: cannot derive column headers from an empty result set")]
    EmptyResults { format: ExportFormat },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX generation failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl CheckError {
    pub(crate) fn io(path: impl Into<String>, source: io::Error) -> Self {
        CheckError::Io { path: path.into(), source }
    }
}
