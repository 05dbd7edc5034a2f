//! Autostats - Automobile Sales Statistics Dashboard Core
//!
//! Loads the historical sales dataset once, then answers a report selection
//! with renderer-agnostic chart specifications emitted as JSON.

mod charts;
mod data;
mod report;
mod stats;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use report::Selection;

#[derive(Parser)]
#[command(name = "autostats")]
#[command(about = "Automobile sales statistics dashboard core", long_about = None)]
struct Cli {
    /// Path to the historical automobile sales CSV
    #[arg(long, default_value = "historical_automobile_sales.csv")]
    data: PathBuf,

    /// Report type: "Yearly Statistics" or "Recession Period Statistics"
    #[arg(long)]
    report: Option<String>,

    /// Report year, used by the yearly report only
    #[arg(long)]
    year: Option<i32>,

    /// Pretty-print the emitted chart specifications
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let table = data::load_dataset(&cli.data)
        .with_context(|| format!("failed to load dataset from {}", cli.data.display()))?;
    tracing::info!(rows = table.height(), path = %cli.data.display(), "dataset loaded");

    if let Some(label) = cli.report.as_deref() {
        tracing::debug!(
            year_control = report::year_control_enabled(label),
            "report controls resolved"
        );
    }

    let selection = Selection::from_inputs(cli.report.as_deref(), cli.year);
    let specs = report::compute_charts(&table, selection)?;
    tracing::info!(charts = specs.len(), "report computed");

    let payload = if cli.pretty {
        serde_json::to_string_pretty(&specs)?
    } else {
        serde_json::to_string(&specs)?
    };
    println!("{payload}");

    Ok(())
}
