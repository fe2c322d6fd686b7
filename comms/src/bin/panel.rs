//! Headless transform broadcaster panel.
//!
//! Widget events are read from stdin, one command per line:
//! `x 1.5`, `slide roll 75000`, `reset z`, `edit frame_id map`,
//! `commit frame_id`, `status stop|static|continuous`.

use clap::Parser;
use comms::driver::{run_panel, spawn_stdin_reader};
use comms::{AppConfig, TransformBroadcaster};
use log::{error, info, warn};
use std::path::PathBuf;
use tf_broadcaster::{get_config, PanelController, PanelPlugin, SettingsStore};
use tokio::sync::{mpsc, oneshot};

/// Publish a manually adjusted transform on the transform bus
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to persist the frame ids between sessions
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,
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
        None => AppConfig {
            panel: get_config().unwrap_or_default(),
            ..Default::default()
        },
    };
    info!("Starting panel with config: {:?}", app_config);

    let store = match args.settings {
        Some(path) => SettingsStore::with_path(path),
        None => SettingsStore::new()?,
    };

    let (broadcaster, outbox) = TransformBroadcaster::new(app_config.zenoh.clone()).await?;
    let mut controller = PanelController::new(app_config.panel.clone(), outbox)?;
    controller.restore_state(store.load());

    let (event_tx, event_rx) = mpsc::channel(64);
    spawn_stdin_reader(event_tx)?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let panel = async {
        run_panel(&mut controller, event_rx, async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await;
        let _ = shutdown_tx.send(());
    };

    let (result, _) = tokio::join!(broadcaster.run(shutdown_rx), panel);
    if let Err(e) = result {
        error!("Broadcaster failed: {}", e);
    }

    if let Err(e) = store.save(&controller.save_state()) {
        warn!("Failed to save settings to {:?}: {}", store.path(), e);
    }
    info!("Panel shut down");
    Ok(())
}
