use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use apilens::config::Config;
use apilens::error::AuditError;
use apilens::output::OutputFormat;
use apilens::rules::builtin;
use apilens::ScanOptions;

#[derive(Parser)]
#[command(
    name = "apilens",
    about = "REST API audit scanner — security, structure, and performance",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan one or more API endpoints
    Scan {
        /// Endpoint URLs to scan, in order
        #[arg(required = true)]
        urls: Vec<String>,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, markdown)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Enable the active rate-limit probe (sends a burst of real
        /// requests against the target)
        #[arg(long)]
        active: bool,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List all available rules and the codes they emit
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .apilens.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            urls,
            config,
            format,
            active,
            output,
        } => cmd_scan(urls, config, format, active, output),
        Commands::ListRules { format } => cmd_list_rules(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_scan(
    urls: Vec<String>,
    config: Option<PathBuf>,
    format_str: String,
    active: bool,
    output_path: Option<PathBuf>,
) -> Result<i32, AuditError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let options = ScanOptions {
        config_path: config,
        format,
        active_probe_override: if active { Some(true) } else { None },
    };

    let outcomes = apilens::scan_batch(&urls, &options)?;

    let mut rendered = String::new();
    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => {
                rendered.push_str(&apilens::render_report(report, format)?);
                rendered.push('\n');
            }
            Err(e) => {
                eprintln!("Error scanning {}: {}", outcome.url, e);
                failed += 1;
            }
        }
    }

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

fn cmd_list_rules(format_str: String) -> Result<i32, AuditError> {
    let rules = builtin::catalog();

    match format_str.as_str() {
        "json" => {
            let listing: Vec<serde_json::Value> = rules
                .iter()
                .map(|rule| {
                    serde_json::json!({
                        "name": rule.name(),
                        "codes": rule.codes(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        _ => {
            println!("{:<20} CODES", "NAME");
            println!("{}", "-".repeat(80));
            for rule in &rules {
                let codes: Vec<&str> = rule.codes().iter().map(|c| c.as_str()).collect();
                println!("{:<20} {}", rule.name(), codes.join(", "));
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, AuditError> {
    let path = PathBuf::from(".apilens.toml");

    if path.exists() && !force {
        eprintln!(".apilens.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .apilens.toml");

    Ok(0)
}
