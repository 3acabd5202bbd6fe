use std::fs;
use std::io;

use crate::error::CheckError;
use crate::CheckConfig;

/// Reads a bulk target file: one URL per line, taken verbatim.
///
/// Blank lines are kept (they are checked as empty URLs and come back as
/// failure records). A missing file is reported as `TargetsNotFound`.
pub fn read_targets(path: &str) -> Result<Vec<String>, CheckError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CheckError::TargetsNotFound {
            path: path.to_string(),
            source: e,
        },
        _ => CheckError::io(path, e),
    })?;

    Ok(content.lines().map(str::to_string).collect())
}

/// Single URL first, then the bulk file in file order. No deduplication.
pub fn collect_targets(config: &CheckConfig) -> Result<Vec<String>, CheckError> {
    let mut targets = Vec::new();

    if let Some(ref url) = config.url {
        targets.push(url.clone());
    }

    if let Some(ref bulk) = config.bulk {
        targets.extend(read_targets(bulk)?);
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_targets_keeps_order_blanks_and_duplicates() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "http://a.test\r\n\nhttp://b.test\nhttp://a.test\n").unwrap();

        let targets = read_targets(file.path().to_str().unwrap()).unwrap();
        assert_eq!(targets, vec!["http://a.test", "", "http://b.test", "http://a.test"]);
    }

    #[test]
    fn test_read_targets_missing_file() {
        let err = read_targets("/definitely/not/here/urls.txt").unwrap_err();
        assert!(matches!(err, CheckError::TargetsNotFound { .. }));
        assert_eq!(err.to_string(), "File not found: /definitely/not/here/urls.txt");
    }

    #[test]
    fn test_collect_targets_single_first() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "http://bulk1.test").unwrap();
        writeln!(file, "http://bulk2.test").unwrap();

        let config = CheckConfig {
            url: Some("http://single.test".to_string()),
            bulk: Some(file.path().to_str().unwrap().to_string()),
            ..CheckConfig::default()
        };

        let targets = collect_targets(&config).unwrap();
        assert_eq!(targets, vec!["http://single.test", "http://bulk1.test", "http://bulk2.test"]);
    }

    #[test]
    fn test_collect_targets_empty_config() {
        assert!(collect_targets(&CheckConfig::default()).unwrap().is_empty());
    }
}
