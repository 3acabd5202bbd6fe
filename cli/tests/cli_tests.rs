use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Bulk list with one open and one protected target exports both, in order.
#[tokio::test(flavor = "multi_thread")]
async fn test_bulk_json_export_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-Frame-Options", "DENY"))
        .mount(&server)
        .await;

    let a = format!("{}/a", server.uri());
    let b = format!("{}/b", server.uri());

    let mut urls = NamedTempFile::new().unwrap();
    writeln!(urls, "{}", a).unwrap();
    writeln!(urls, "{}", b).unwrap();

    let dir = tempdir().unwrap();
    let out = dir.path().join("out.json");

    cargo_bin_cmd!("framecheck")
        .args([
            "--bulk",
            urls.path().to_str().unwrap(),
            "--format",
            "json",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Checking {}", a)))
        .stdout(predicate::str::contains("Results exported to"));

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["url"], a.as_str());
    assert_eq!(records[0]["vulnerable"], true);
    assert_eq!(records[1]["url"], b.as_str());
    assert_eq!(records[1]["x_frame_options"], "DENY");
    assert_eq!(records[1]["vulnerable"], false);
}

/// Without --output the results are printed as JSON.
#[tokio::test(flavor = "multi_thread")]
async fn test_single_url_prints_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Security-Policy", "frame-ancestors 'none'"))
        .mount(&server)
        .await;

    cargo_bin_cmd!("framecheck")
        .args(["--url", server.uri().as_str(), "--no-banner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"content_security_policy\": \"frame-ancestors 'none'\""))
        .stdout(predicate::str::contains("\"vulnerable\": false"));
}

/// A missing bulk file is reported and the run aborts with a non-zero code.
#[test]
fn test_missing_bulk_file_fails() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.json");

    cargo_bin_cmd!("framecheck")
        .args([
            "--url",
            "http://127.0.0.1:9/",
            "--bulk",
            "/no/such/urls.txt",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found: /no/such/urls.txt"))
        .stdout(predicate::str::contains("Checking").not());

    assert!(!out.exists());
}

/// CSV export with nothing checked fails with a clear message.
#[test]
fn test_csv_with_zero_results_fails_cleanly() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.csv");

    cargo_bin_cmd!("framecheck")
        .args(["--format", "csv", "--output", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no results to export as csv"));
}

/// Unknown formats are rejected by the argument parser.
#[test]
fn test_unsupported_format_rejected() {
    cargo_bin_cmd!("framecheck")
        .args(["--url", "http://example.com", "--format", "pdf", "--output", "out.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pdf"));
}

/// PoC generation writes the iframe page to the requested path.
#[test]
fn test_poc_generation() {
    let dir = tempdir().unwrap();
    let poc = dir.path().join("poc.html");

    cargo_bin_cmd!("framecheck")
        .args(["--poc", "https://example.com", "--poc-output", poc.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generating PoC for https://example.com"))
        .stdout(predicate::str::contains("PoC HTML saved to"));

    let html = fs::read_to_string(&poc).unwrap();
    assert!(html.contains(r#"<iframe src="https://example.com">"#));
}

/// A connection failure becomes an error record, not a crash.
#[test]
fn test_unreachable_url_is_recorded() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/", port);

    cargo_bin_cmd!("framecheck")
        .args(["--url", url.as_str(), "--timeout", "2", "--no-banner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"error\":"))
        .stdout(predicate::str::contains("\"vulnerable\"").not());
}

/// -v turns on debug logging on stderr; the default stays quiet.
#[test]
fn test_verbose_enables_debug_logging() {
    cargo_bin_cmd!("framecheck")
        .args(["-v", "--no-banner"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("checking 0 target(s) with a 10s timeout"));

    cargo_bin_cmd!("framecheck")
        .args(["--no-banner"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("checking 0 target(s)").not());
}
