use std::fmt;
use std::fs;
use std::str::FromStr;

use csv::Writer;
use log::debug;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};

use crate::core::result::CheckResult;
use crate::error::CheckError;

/// Column order for tabular exports. Success rows leave `error` empty and
/// failure rows leave the header and verdict columns empty.
pub const TABLE_COLUMNS: [&str; 5] = [
    "url",
    "x_frame_options",
    "content_security_policy",
    "vulnerable",
    "error",
];

pub const FORMAT_NAMES: [&str; 4] = ["json", "csv", "txt", "xlsx"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Txt,
    Xlsx,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Txt => write!(f, "txt"),
            ExportFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "txt" => Ok(ExportFormat::Txt),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(CheckError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Serializes `results` in `format` and writes them to `path`, overwriting.
pub fn export(results: &[CheckResult], path: &str, format: ExportFormat) -> Result<(), CheckError> {
    let data = render(results, format)?;
    fs::write(path, data).map_err(|e| CheckError::io(path, e))?;
    debug!("exported {} record(s) as {} to {}", results.len(), format, path);
    Ok(())
}

pub fn render(results: &[CheckResult], format: ExportFormat) -> Result<Vec<u8>, CheckError> {
    match format {
        ExportFormat::Json => to_pretty_json(results).map(String::into_bytes),
        ExportFormat::Txt => to_ndjson(results).map(String::into_bytes),
        ExportFormat::Csv => {
            require_rows(results, format)?;
            to_csv(results)
        }
        ExportFormat::Xlsx => {
            require_rows(results, format)?;
            to_xlsx(results)
        }
    }
}

/// JSON array with 4-space indentation.
pub fn to_pretty_json(results: &[CheckResult]) -> Result<String, CheckError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    results.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn to_ndjson(results: &[CheckResult]) -> Result<String, CheckError> {
    let mut out = String::new();
    for r in results {
        out.push_str(&serde_json::to_string(r)?);
        out.push('\n');
    }
    Ok(out)
}

fn require_rows(results: &[CheckResult], format: ExportFormat) -> Result<(), CheckError> {
    if results.is_empty() {
        Err(CheckError::EmptyResults { format })
    } else {
        Ok(())
    }
}

fn row_values(result: &CheckResult) -> [String; 5] {
    match result {
        CheckResult::Success {
            url,
            x_frame_options,
            content_security_policy,
            vulnerable,
        } => [
            url.clone(),
            x_frame_options.clone(),
            content_security_policy.clone(),
            vulnerable.to_string(),
            String::new(),
        ],
        CheckResult::Failure { url, error } => [
            url.clone(),
            String::new(),
            String::new(),
            String::new(),
            error.clone(),
        ],
    }
}

fn to_csv(results: &[CheckResult]) -> Result<Vec<u8>, CheckError> {
    let mut wtr = Writer::from_writer(vec![]);
    wtr.write_record(TABLE_COLUMNS)?;
    for r in results {
        wtr.write_record(row_values(r))?;
    }
    wtr.into_inner()
        .map_err(|e| CheckError::Csv(e.into_error().into()))
}

fn to_xlsx(results: &[CheckResult]) -> Result<Vec<u8>, CheckError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Results")?;

    for (col, name) in TABLE_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (i, r) in results.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in row_values(r).iter().enumerate() {
            worksheet.write_string(row, col as u16, value)?;
        }
    }

    worksheet.set_column_width(0, 40)?;
    worksheet.set_column_width(1, 20)?;
    worksheet.set_column_width(2, 40)?;

    Ok(workbook.save_to_buffer()?)
}

/// Reads a JSON export back into records.
pub fn load_json(path: &str) -> Result<Vec<CheckResult>, CheckError> {
    let data = fs::read_to_string(path).map_err(|e| CheckError::io(path, e))?;
    Ok(serde_json::from_str(&data)?)
}
