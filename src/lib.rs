//! apilens — REST API audit scanner.
//!
//! Fetches one snapshot per endpoint, runs it through an ordered battery
//! of security, structure, and performance rules, and scores the result.
//! The only rule that ever touches the network again is the opt-in active
//! rate-limit probe.
//!
//! # Quick Start
//!
//! ```no_run
//! use apilens::{scan, ScanOptions};
//!
//! let options = ScanOptions::default();
//! let report = scan("https://api.example.com/v1/users", &options).unwrap();
//! println!("Score: {}, Findings: {}", report.score, report.findings.len());
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod knowledge;
pub mod output;
pub mod rules;
pub mod score;
pub mod snapshot;

use std::path::PathBuf;

use config::Config;
use error::Result;
use fetch::Fetcher;
use output::OutputFormat;
use rules::{Finding, RuleEngine};
use snapshot::ResponseSnapshot;

/// Options for a scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Path to config file (defaults to `.apilens.toml` in the working dir).
    pub config_path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// CLI override enabling the active rate-limit probe.
    pub active_probe_override: Option<bool>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Console,
            active_probe_override: None,
        }
    }
}

/// Complete report for one scanned endpoint.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub url: String,
    pub findings: Vec<Finding>,
    pub score: i32,
}

/// Outcome of one endpoint within a batch. Failures are carried, not
/// raised, so one unreachable endpoint never stops the batch.
#[derive(Debug)]
pub struct EndpointOutcome {
    pub url: String,
    pub result: Result<ScanReport>,
}

/// Run a complete scan of one endpoint: fetch a snapshot, run every
/// enabled rule against it, score the findings.
pub fn scan(url: &str, options: &ScanOptions) -> Result<ScanReport> {
    let config = load_config(options)?;
    let fetcher = Fetcher::new(config.fetch.timeout())?;
    scan_with(url, &config, &fetcher)
}

/// Scan several endpoints strictly sequentially: one endpoint's full rule
/// suite completes before the next starts.
pub fn scan_batch(urls: &[String], options: &ScanOptions) -> Result<Vec<EndpointOutcome>> {
    let config = load_config(options)?;
    let fetcher = Fetcher::new(config.fetch.timeout())?;

    Ok(urls
        .iter()
        .map(|url| EndpointOutcome {
            url: url.clone(),
            result: scan_with(url, &config, &fetcher),
        })
        .collect())
}

fn load_config(options: &ScanOptions) -> Result<Config> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(".apilens.toml"));
    let mut config = Config::load(&config_path)?;

    if let Some(active) = options.active_probe_override {
        config.probe.enabled = active;
    }

    Ok(config)
}

fn scan_with(url: &str, config: &Config, fetcher: &Fetcher) -> Result<ScanReport> {
    tracing::info!(url, "scanning endpoint");

    let snapshot = fetcher.fetch(url)?;
    let engine = RuleEngine::for_scan(config, url);
    let findings = engine.run(&snapshot);
    let score = score::score(findings.len());

    tracing::info!(url, findings = findings.len(), score, "scan finished");

    Ok(ScanReport {
        url: url.to_owned(),
        findings,
        score,
    })
}

/// Run the rule pipeline over an already-captured snapshot. Embedders use
/// this to audit responses they fetched themselves. Passive rules only:
/// the active probe needs a live target URL.
pub fn audit_snapshot(snapshot: &ResponseSnapshot, config: &Config) -> ScanReport {
    let mut config = config.clone();
    config.probe.enabled = false;
    let engine = RuleEngine::for_scan(&config, "");
    let findings = engine.run(snapshot);
    let score = score::score(findings.len());
    ScanReport {
        url: snapshot.path().to_owned(),
        findings,
        score,
    }
}

/// Render a scan report in the specified format.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    output::render(report, format)
}
