//! Clickjacking proof-of-concept page generator.
//!
//! Produces a single static .html file that frames the target inside a fixed
//! 800x600 container. If the page renders the target, it can be framed.

use std::fs;

use log::debug;

use crate::error::CheckError;

pub const DEFAULT_POC_PATH: &str = "poc.html";

/// The framed URL is inserted verbatim unless `escape_url` is set. Operators
/// may deliberately pass attribute-breaking sources when testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PocOptions {
    pub escape_url: bool,
}

pub fn render_poc(url: &str, options: &PocOptions) -> String {
    let src = if options.escape_url {
        html_escape(url)
    } else {
        url.to_string()
    };

    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Clickjacking PoC</title>
<style>
body {{ font-family: Arial, sans-serif; text-align: center; background-color: #f4f4f4; margin: 0; padding: 20px; }}
.container {{ display: inline-block; width: 800px; height: 600px; overflow: hidden; border: 2px solid #333; border-radius: 8px; background-color: #fff; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.2); }}
iframe {{ width: 100%; height: 100%; border: none; }}
</style>
</head>
<body>
<h1>Clickjacking Proof of Concept</h1>
<p>The content of the target URL is displayed below:</p>
<div class="container">
    <iframe src="{src}"></iframe>
</div>
</body>
</html>
"#,
        src = src,
    )
}

/// Renders the page for `url` and writes it to `output_path`, overwriting.
pub fn generate_poc(url: &str, output_path: &str) -> Result<(), CheckError> {
    generate_poc_with(url, output_path, &PocOptions::default())
}

pub fn generate_poc_with(url: &str, output_path: &str, options: &PocOptions) -> Result<(), CheckError> {
    let html = render_poc(url, options);
    fs::write(output_path, html).map_err(|e| CheckError::io(output_path, e))?;
    debug!("wrote PoC for {} to {}", url, output_path);
    Ok(())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
