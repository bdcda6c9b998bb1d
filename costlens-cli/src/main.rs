use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use costlens_core::CleanRecord;
use costlens_ingest::{check_file, records_from_bytes, require_records, IngestStats};
use costlens_report::{aggregate_with, Highlights, Report};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

mod config;
mod home;
mod logging;
mod render;

use render::{Limits, View};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("COSTLENS_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "costlens", version = VERSION, about = "Summarize cost and transaction CSV exports")]
struct Cli {
    /// Log filter when RUST_LOG is unset (overrides config)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate a CSV into category/day totals and highlights
    Report {
        /// Path to the CSV export
        #[arg(long)]
        csv: PathBuf,

        #[arg(long, value_enum, default_value_t = View::All)]
        view: View,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Categories shown in charts (default from config)
        #[arg(long)]
        top: Option<usize>,

        /// Days shown in the recent summary (default from config)
        #[arg(long)]
        recent: Option<usize>,
    },

    /// Show how many rows survive ingestion
    Ingest {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Manage ~/.costlens/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    file: String,
    ingest: IngestStats,
    #[serde(flatten)]
    report: &'a Report,
    highlights: Highlights<'a>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init(cli.log_level.as_deref().unwrap_or(&cfg.logging.level));

    match cli.command {
        Command::Report {
            csv,
            view,
            json,
            top,
            recent,
        } => {
            let (rows_stats, records) = load_csv(&csv).await?;
            let records = require_records(records)
                .with_context(|| format!("no usable rows in {}", csv.display()))?;

            let report = aggregate_with(&records, &cfg.report.aggregate_options());

            if json {
                let out = JsonOutput {
                    file: display_name(&csv),
                    ingest: rows_stats,
                    report: &report,
                    highlights: report.highlights(),
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let limits = Limits {
                    top_categories: top.unwrap_or(cfg.report.top_categories),
                    recent_days: recent.unwrap_or(cfg.report.recent_days),
                };
                println!(
                    "File: {} | {} records loaded\n",
                    display_name(&csv),
                    render::format_count(report.summary.record_count)
                );
                print!("{}", render::render(&report, view, limits));
            }
        }

        Command::Ingest { csv } => {
            let (stats, _) = load_csv(&csv).await?;
            println!("Rows read: {}", stats.total_rows);
            println!("Rejected (missing id/amount): {}", stats.rejected);
            println!("Filtered (no date or amount): {}", stats.filtered);
            println!("Kept: {}", stats.kept);
            if stats.kept == 0 {
                bail!("No valid data found in {}. Please check your CSV format.", csv.display());
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

/// Read the file asynchronously, then parse and ingest the bytes in one synchronous pass.
async fn load_csv(path: &Path) -> Result<(IngestStats, Vec<CleanRecord>)> {
    check_file(path).with_context(|| format!("checking {}", path.display()))?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let (records, stats) =
        records_from_bytes(&bytes).with_context(|| format!("parsing {}", path.display()))?;

    info!(
        file = %path.display(),
        rows = stats.total_rows,
        kept = stats.kept,
        "loaded csv"
    );
    Ok((stats, records))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
