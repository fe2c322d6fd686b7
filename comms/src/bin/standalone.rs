//! Sweeps roll from -180 to 180 degrees at 100 Hz, publishing continuously.

use clap::Parser;
use comms::{AppConfig, TransformBroadcaster};
use log::info;
use std::path::PathBuf;
use std::time::Duration;
use tf_broadcaster::standalone::{standalone_publisher, RollSweep, STANDALONE_RATE_HZ};
use tf_broadcaster::{AngleUnit, LogSink};
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log the transforms instead of publishing them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let app_config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    let mut ticker = tokio::time::interval(Duration::from_millis(1000 / STANDALONE_RATE_HZ));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut sweep = RollSweep::default();

    if args.dry_run {
        let mut publisher = standalone_publisher(LogSink);
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                _ = ticker.tick() => {
                    let roll = sweep.next().unwrap_or_default();
                    publisher.set_orientation(roll, 0.0, 0.0, AngleUnit::Degrees);
                    publisher.publish_tick();
                }
            }
        }
        return Ok(());
    }

    let (broadcaster, outbox) = TransformBroadcaster::new(app_config.zenoh).await?;
    let mut publisher = standalone_publisher(outbox);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let sweep_loop = async {
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                _ = ticker.tick() => {
                    let roll = sweep.next().unwrap_or_default();
                    publisher.set_orientation(roll, 0.0, 0.0, AngleUnit::Degrees);
                    publisher.publish_tick();
                }
            }
        }
        let _ = shutdown_tx.send(());
    };

    info!("Sweeping roll at {} Hz", STANDALONE_RATE_HZ);
    let (result, _) = tokio::join!(broadcaster.run(shutdown_rx), sweep_loop);
    result?;
    Ok(())
}
