//! Multivalued dependency miner CLI
//!
//! Usage:
//!   mvd_miner data/orders.csv
//!   mvd_miner data/orders.parquet --algorithm bottom-up --json
//!   mvd_miner data/orders.csv --config config/mvd.toml --force-chunked

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mvd::config::Config;
use mvd::dataset::{impute_missing, load_frame, DatasetView};
use mvd::discovery::Algorithm;
use mvd::journal::FileJournal;
use mvd::session::AnalysisSession;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mvd_miner")]
#[command(about = "Discover multivalued dependencies in a CSV or Parquet dataset")]
struct Cli {
    /// Input file (.csv or .parquet)
    input: PathBuf,
    #[arg(long, default_value = "config/mvd.toml")]
    config: String,
    /// Which search to run; defaults to the configured list
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,
    /// Chunk rows and attributes even for small inputs
    #[arg(long)]
    force_chunked: bool,
    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Override the diagnostic log path
    #[arg(long)]
    log_file: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    TopDown,
    BottomUp,
    Both,
}

impl AlgorithmArg {
    fn algorithms(self) -> Vec<Algorithm> {
        match self {
            AlgorithmArg::TopDown => vec![Algorithm::TopDown],
            AlgorithmArg::BottomUp => vec![Algorithm::BottomUp],
            AlgorithmArg::Both => vec![Algorithm::TopDown, Algorithm::BottomUp],
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = if Path::new(&cli.config).exists() {
        Config::load(&cli.config)?
    } else {
        warn!("Config {} not found, using defaults", cli.config);
        Config::default()
    };
    if let Some(arg) = cli.algorithm {
        config.analysis.algorithms = arg.algorithms();
    }
    if cli.force_chunked {
        config.analysis.force_chunked = true;
    }
    if let Some(path) = cli.log_file {
        config.log.path = path;
    }

    let frame = load_frame(&cli.input)?;
    let frame = impute_missing(frame)?;
    let view = DatasetView::from_frame(&frame).context("Failed to encode dataset")?;

    let journal = FileJournal::open(&config.log.path)
        .with_context(|| format!("Failed to open log {}", config.log.path))?;
    let dataset = cli
        .input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.input.display().to_string());

    let session = AnalysisSession::new(config.analysis.clone(), &journal);
    let report = session.run(&dataset, &view)?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("\n=== {} ({} rows, {} attributes) ===", report.dataset, report.rows, report.attributes.len());
        for variant in &report.variants {
            println!(
                "\n--- {} ({:.3}s, {} dependencies{}) ---",
                variant.algorithm,
                variant.elapsed_secs,
                variant.dependency_count,
                if variant.truncated { ", truncated" } else { "" }
            );
            println!("{}", variant.text.trim_end());
        }
    }

    Ok(())
}
