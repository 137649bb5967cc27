//! stuncount - compare stun and breath statistics between two log archives

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stuncount::{compare, Config, OutputFormat, PatternSet};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Combat log stun statistics
#[derive(Parser, Debug)]
#[command(
    name = "stuncount",
    version,
    about = "Compare stun, spell and breath statistics of two zipped log sets"
)]
struct Args {
    /// Archive of logs recorded WITH the tested condition
    #[arg(long)]
    with: Option<PathBuf>,

    /// Archive of logs recorded WITHOUT the tested condition
    #[arg(long)]
    without: Option<PathBuf>,

    /// Extract archives next to themselves before analyzing
    #[arg(long)]
    extract: bool,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// TOML config file (default: ./stuncount.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stuncount=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(with) = args.with {
        config.with = with;
    }
    if let Some(without) = args.without {
        config.without = without;
    }
    if args.extract {
        config.extract = true;
    }
    if let Some(format) = args.format {
        config.format = format;
    }

    let patterns = PatternSet::new().context("Failed to compile combat patterns")?;
    let mode = config.extract_mode();

    let report = compare(&patterns, &config.with, &config.without, mode)
        .context("Failed to analyze log archives")?;

    match config.format {
        OutputFormat::Table => println!("{}", report.render_table()),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }

    Ok(())
}
