//! subpic - Subtitle frame placement tool
//!
//! Runs the subtitle frame size fitter and placement logic from the command
//! line, either on a single size or on a JSON scenario file.

mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scenario::Scenario;
use std::path::PathBuf;
use subpic_core::{fit_size, Rect, Size};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// subpic - Place subtitle frames on a display surface
#[derive(Parser, Debug)]
#[command(name = "subpic")]
#[command(version, about, long_about = None)]
struct Args {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clamp a frame size to a maximum, keeping its aspect ratio
    Fit {
        /// Requested frame width
        #[arg(short = 'W', long)]
        width: i32,

        /// Requested frame height
        #[arg(short = 'H', long)]
        height: i32,

        /// Maximum frame width
        #[arg(long, default_value = "1920")]
        max_width: i32,

        /// Maximum frame height
        #[arg(long, default_value = "1080")]
        max_height: i32,
    },
    /// Allocate a frame from a scenario file and print where it is displayed
    Place {
        /// Path to the scenario JSON file
        scenario: PathBuf,

        /// Use a dynamic frame instead of the cached static one
        #[arg(short, long)]
        dynamic: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    debug!("subpic v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Fit {
            width,
            height,
            max_width,
            max_height,
        } => {
            let requested = Size::new(width, height);
            let fitted = fit_size(
                requested,
                Rect::from_size(requested),
                Size::new(max_width, max_height),
            );
            if fitted.clamped {
                info!(
                    "Clamped {}x{} to {}x{}",
                    width, height, fitted.size.width, fitted.size.height
                );
            }
            let output = serde_json::json!({
                "size": fitted.size,
                "video_rect": fitted.video_rect,
                "clamped": fitted.clamped,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Place { scenario, dynamic } => {
            let mut loaded = Scenario::load(&scenario)
                .with_context(|| format!("Failed to load scenario {:?}", scenario))?;
            loaded.dynamic |= dynamic;

            let output = loaded.run().context("Failed to place frame")?;
            match &output.placement {
                Some(placement) => info!(
                    "Frame lands at ({}, {})-({}, {})",
                    placement.dest.left,
                    placement.dest.top,
                    placement.dest.right,
                    placement.dest.bottom
                ),
                None => info!("Nothing to display"),
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
