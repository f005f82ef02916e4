//! treetally - one-shot directory tree report.
//!
//! Usage:
//!   treetally [PATH]                 Full text report with a file-type chart
//!   treetally [PATH] --format json   Report as JSON
//!   treetally --help                 Show help

mod render;

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use treetally_analyze::{RedundancyMode, ReportBuilder, ReportConfig};
use treetally_scan::{ScanConfig, TreeScanner};

#[derive(Parser)]
#[command(
    name = "treetally",
    version,
    about = "Report file types, largest files, folder sizes and redundant files in a tree",
    long_about = "treetally walks a directory tree once and reports:\n\n\
                  - the number of subfolders\n\
                  - the largest files\n\
                  - files sharing a name or an exact byte size\n\
                  - folders ranked by the size of the files directly inside them\n\
                  - a chart of space used per file extension\n\n\
                  Redundancy is judged by name and size only; contents are never compared."
)]
struct Cli {
    /// Path to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Number of largest files to list
    #[arg(short = 'n', long, default_value = "10")]
    top: usize,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Count a file once even when it shares both a name and a size
    #[arg(long)]
    distinct: bool,

    /// Skip the file-type chart
    #[arg(long)]
    no_chart: bool,

    /// Follow symbolic links. Without this flag, links to files and to
    /// directories are ignored: not listed, not sized, not counted
    #[arg(long)]
    follow_symlinks: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    no_hidden: bool,

    /// Glob pattern for entry names to skip (repeatable)
    #[arg(long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,

    /// Maximum depth to descend
    #[arg(long)]
    max_depth: Option<u32>,

    /// Threads for directory reads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let scan_config = ScanConfig::builder()
        .root(cli.path.clone())
        .follow_symlinks(cli.follow_symlinks)
        .include_hidden(!cli.no_hidden)
        .ignore_patterns(cli.ignore.clone())
        .max_depth(cli.max_depth)
        .threads(cli.threads)
        .build()
        .context("Invalid scan configuration")?;

    let report_config = ReportConfig::builder()
        .top_n(cli.top)
        .redundancy_mode(if cli.distinct {
            RedundancyMode::Distinct
        } else {
            RedundancyMode::Combined
        })
        .build()
        .context("Invalid report configuration")?;

    info!("Scanning {}", cli.path.display());

    let result = TreeScanner::new()
        .scan(&scan_config)
        .with_context(|| format!("Cannot analyze {}", cli.path.display()))?;

    info!(
        "Scanned {} files in {:.2}s",
        result.total_files(),
        result.scan_duration.as_secs_f64()
    );

    let report = ReportBuilder::with_config(report_config).build(&result);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => {
            render::write_report(&mut out, &report)?;
            if !cli.no_chart {
                render::write_type_chart(&mut out, &report.type_breakdown)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
