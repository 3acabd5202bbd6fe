use anyhow::Context;
use clap::Parser;
use std::process;

use framecheck_core::{
    collect_targets, export, generate_poc_with, to_pretty_json, CheckConfig, CheckEngine,
    CheckError, ConsoleSink, ExportFormat, HeaderInspector, ResultAggregator, SinkRef,
    DEFAULT_POC_PATH, DEFAULT_TIMEOUT_SECS, FORMAT_NAMES,
};

#[derive(Parser, Debug)]
#[command(
    name = "framecheck",
    version,
    about = "Clickjacking Vulnerability Checker & PoC Generator",
    after_help = "\x1b[1;36mEXAMPLES:\x1b[0m
  Single URL:                     framecheck --url https://target.com
  Bulk list to CSV:               framecheck --bulk urls.txt --format csv --output results.csv
  Excel report:                   framecheck --bulk urls.txt --format xlsx --output results.xlsx
  Generate a PoC page:            framecheck --poc https://target.com --poc-output poc.html
  Check and build PoC:            framecheck --url https://target.com --poc https://target.com"
)]
pub struct Args {
    #[arg(long, help = "Single URL to check")]
    pub url: Option<String>,

    #[arg(long, help = "File containing multiple URLs (one per line)")]
    pub bulk: Option<String>,

    #[arg(long, help = "Generate PoC for a specific URL")]
    pub poc: Option<String>,

    #[arg(long, default_value = DEFAULT_POC_PATH, help = "Output path for the PoC HTML page")]
    pub poc_output: String,

    #[arg(long, default_value_t = false, help = "HTML-escape the framed URL in the PoC page")]
    pub escape_poc: bool,

    #[arg(long, help = "Output file name")]
    pub output: Option<String>,

    #[arg(long, default_value = "json",
        value_parser = clap::builder::PossibleValuesParser::new(FORMAT_NAMES),
        help = "Output format")]
    pub format: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, help = "Request timeout in seconds")]
    pub timeout: u64,

    #[arg(short = 'v', long, default_value_t = false, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(long, default_value_t = false, help = "Do not print the banner")]
    pub no_banner: bool,
}

impl Args {
    fn to_config(&self) -> Result<CheckConfig, CheckError> {
        Ok(CheckConfig {
            url: self.url.clone(),
            bulk: self.bulk.clone(),
            poc: self.poc.clone(),
            poc_output: self.poc_output.clone(),
            escape_poc: self.escape_poc,
            output: self.output.clone(),
            format: self.format.parse::<ExportFormat>()?,
            timeout: self.timeout,
            verbose: self.verbose,
        })
    }
}

#[tokio::main]
async fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let args = Args::parse();
    let sink = ConsoleSink::new_ref();

    let config = match args.to_config() {
        Ok(c) => c,
        Err(e) => {
            sink.on_log("error", &format!("[ERROR] {}", e));
            process::exit(1);
        }
    };
    init_logging(config.verbose);

    if !args.no_banner {
        print_banner(&sink);
    }

    if let Err(e) = run(&config, &sink).await {
        sink.on_log("error", &format!("[ERROR] {:#}", e));
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn print_banner(sink: &SinkRef) {
    let banner = r#"
----------------------------------------------------------------------------
             Clickjacking Vulnerability Checker & PoC Generator

 Checks X-Frame-Options and Content-Security-Policy response headers to
 identify pages that can be framed.
----------------------------------------------------------------------------"#;
    sink.on_log("banner", banner);
}

/// Check → export or print → summary → PoC.
async fn run(config: &CheckConfig, sink: &SinkRef) -> anyhow::Result<()> {
    // A missing bulk file aborts before any request goes out.
    let targets = collect_targets(config)?;

    let inspector = HeaderInspector::new(config.timeout_duration())?;
    let engine = CheckEngine::new(inspector, sink.clone());
    let results = engine.run(&targets).await;

    match config.output {
        Some(ref path) => {
            export(&results, path, config.format)
                .with_context(|| format!("failed to export results to {}", path))?;
            sink.on_log("success", &format!("[INFO] Results exported to {}", path));
        }
        None => println!("{}", to_pretty_json(&results)?),
    }

    ResultAggregator::report_summary(&results, sink);

    if let Some(ref poc_url) = config.poc {
        sink.on_log("info", &format!("[INFO] Generating PoC for {}", poc_url));
        generate_poc_with(poc_url, &config.poc_output, &config.poc_options())
            .with_context(|| format!("failed to write PoC to {}", config.poc_output))?;
        sink.on_log("success", &format!("[INFO] PoC HTML saved to {}", config.poc_output));
    }

    Ok(())
}
