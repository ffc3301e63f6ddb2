//! Binary entrypoint for the photo carousel.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio_util::sync::CancellationToken;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use photo_carousel::config::Configuration;

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "photo-carousel", about = "3D photo-card carousel driver")]
struct Cli {
    /// Path to YAML config file; built-in defaults when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the photo library directory
    #[arg(long, value_name = "DIR")]
    photos: Option<PathBuf>,

    /// Stop after this long instead of running until ctrl-c
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    run_for: Option<std::time::Duration>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("photo_carousel={}", level).parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut cfg = match &cli.config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(dir) = cli.photos {
        cfg.photo_library_path = Some(dir);
    }
    let cfg = cfg.validated().context("validating configuration")?;

    let sources = photo_carousel::scan::discover(cfg.photo_library_path.as_deref())?;
    info!(count = sources.len(), "discovered photo sources");

    let cancel = CancellationToken::new();
    let ctrl = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl.cancel();
        }
    });
    if let Some(limit) = cli.run_for {
        let timer = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            timer.cancel();
        });
    }

    photo_carousel::tasks::driver::run(cfg, sources, cancel).await
}
