use anyhow::Context;
use boxfall_common::BoxConfig;
use boxfall_render::{DebugTextTarget, FrameDriver};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boxfall-cli", about = "Headless tool for the falling box")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the frame driver without a window and print each frame
    Simulate {
        /// Number of frames to render
        #[arg(short, long, default_value = "10")]
        frames: u64,
        /// Offset added to the box position every frame
        #[arg(long, default_value_t = BoxConfig::DEFAULT_FALL_RATE, allow_negative_numbers = true)]
        fall_rate: f32,
    },
}

/// Drive `frames` frames into a text target and return its log.
fn simulate(frames: u64, fall_rate: f32) -> anyhow::Result<(String, FrameDriver)> {
    let config = BoxConfig {
        fall_rate,
        ..BoxConfig::default()
    };
    config.validate().context("invalid simulation settings")?;

    let mut driver = FrameDriver::new(config.fall_rate, config.clear_color);
    let mut target = DebugTextTarget::new();
    for _ in 0..frames {
        let report = driver.render_frame(&mut target);
        tracing::debug!(frame = report.frame, offset = report.offset, "simulated");
    }
    Ok((target.output().to_owned(), driver))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("boxfall-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", boxfall_render::crate_info());
            let cfg = BoxConfig::default();
            println!(
                "defaults: {}x{} fall_rate={} title={:?}",
                cfg.width, cfg.height, cfg.fall_rate, cfg.title
            );
        }
        Commands::Simulate { frames, fall_rate } => {
            println!("Simulating {frames} frames, fall_rate={fall_rate}");
            let (log, driver) = simulate(frames, fall_rate)?;
            print!("{log}");
            println!(
                "final offset={:.4} after {} frames ({} failed steps)",
                driver.fall().offset(),
                driver.fall().frame(),
                driver.failed_steps()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_prints_every_frame() {
        let (log, driver) = simulate(5, 0.1).unwrap();
        assert_eq!(log.lines().count(), 5);
        assert_eq!(driver.fall().frame(), 5);
        assert_eq!(driver.failed_steps(), 0);
        assert!(log.lines().all(|l| l.contains("draw=4")));
    }

    #[test]
    fn simulate_zero_frames() {
        let (log, driver) = simulate(0, 0.1).unwrap();
        assert!(log.is_empty());
        assert_eq!(driver.fall().offset(), 0.0);
    }

    #[test]
    fn simulate_rejects_infinite_rate() {
        assert!(simulate(3, f32::INFINITY).is_err());
    }

    #[test]
    fn simulate_subcommand_parses() {
        let cli = Cli::parse_from(["boxfall-cli", "simulate", "-f", "3", "--fall-rate", "0.5"]);
        assert!(matches!(
            cli.command,
            Commands::Simulate { frames: 3, fall_rate } if fall_rate == 0.5
        ));
    }
}
