//! Print every transform published by a panel, starting with the latched one.

use clap::Parser;
use comms::{AppConfig, CommsError, TransformListener};
use log::warn;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
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

    let listener = TransformListener::new(app_config.zenoh).await?;

    match listener.latched().await {
        Ok(transforms) => {
            for transform in transforms {
                println!("[latched] {}", transform);
            }
        }
        Err(CommsError::NoResponse) => warn!("No static transform published yet"),
        Err(e) => warn!("Could not query static transform: {}", e),
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            received = listener.recv() => {
                let (channel, transforms) = received?;
                for transform in transforms {
                    println!("[{}] {}", channel, transform);
                }
            }
        }
    }
    Ok(())
}
