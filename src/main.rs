//! CLI entry point for the forecast accuracy report.
//!
//! Loads the five lead-time snapshots, runs the scoring pipeline and writes
//! the summary tables and JSON report.

use anyhow::Result;
use clap::Parser;
use forecast_accuracy::{
    config::PipelineConfig, forecast::load_dir, output::write_outputs, pipeline,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "forecast_accuracy")]
#[command(about = "Scores how forecast accuracy decays with lead time", long_about = None)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the five lead-time snapshot CSVs
    #[arg(short = 'd', long)]
    forecast_dir: Option<PathBuf>,

    /// Directory to write the tables and report to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of cities in best/worst lists
    #[arg(short, long)]
    top: Option<usize>,

    /// Number of cities per side of the map partition
    #[arg(short, long)]
    map_size: Option<usize>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/forecast_accuracy.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("forecast_accuracy.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = cli.forecast_dir {
        config.forecast_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(n) = cli.top {
        config.ranking_size = n;
    }
    if let Some(n) = cli.map_size {
        config.map_size = n;
    }
    config.validate()?;

    let loaded = load_dir(&config.forecast_dir, &config.file_template)?;
    let output = pipeline::run(loaded, &config);
    write_outputs(&config.output_dir, &output)?;

    match output.report.national_accuracy {
        Some(accuracy) => info!(
            national_accuracy = accuracy,
            cities = output.report.cities,
            output_dir = %config.output_dir.display(),
            "Report ready"
        ),
        None => info!(output_dir = %config.output_dir.display(), "No city could be scored"),
    }

    Ok(())
}
