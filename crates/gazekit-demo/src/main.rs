//! Gaze demo
//!
//! Sweeps a camera back and forth across a ring of gazeable orbs and logs
//! every gaze transition.
//!
//! Usage:
//!   gaze-demo                         # defaults
//!   gaze-demo --ticks 600 --orbs 5    # longer run, more targets
//!   RUST_LOG=gazekit_core=debug gaze-demo

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gazekit_config::{default_config_path, GazeConfig};
use gazekit_demo::{run, DemoOptions};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gaze-demo", about = "Sweep a camera across gazeable targets")]
struct Cli {
    /// Configuration file (defaults to the per-user location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 240)]
    ticks: u64,

    /// Number of orbs placed on the ring
    #[arg(long, default_value_t = 3)]
    orbs: usize,

    /// Ring radius in world units
    #[arg(long, default_value_t = 8.0)]
    radius: f32,

    /// Camera yaw change per tick, in degrees
    #[arg(long, default_value_t = 1.5)]
    sweep: f32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = GazeConfig::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let report = run(
        &config,
        &DemoOptions {
            ticks: cli.ticks,
            orbs: cli.orbs,
            radius: cli.radius,
            sweep_degrees: cli.sweep,
        },
    );

    println!("ticks:        {}", report.ticks);
    println!("focus gained: {}", report.gained);
    println!("focus lost:   {}", report.lost);
    println!("full meters:  {}/{}", report.full_meters, cli.orbs);
    Ok(())
}
