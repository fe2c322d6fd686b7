use log::{debug, info, warn};
use std::io::BufRead;
use std::time::Duration;
use tf_broadcaster::{PanelController, PanelEvent, PanelPlugin, TransformSink};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Drive a started controller until `shutdown` resolves.
///
/// Host events and ticks are serviced from the same task, so they never
/// overlap. Ticks missed while busy are skipped rather than queued. The
/// panel keeps ticking after the event source closes.
pub async fn run_panel<S, F>(
    controller: &mut PanelController<S>,
    mut events: mpsc::Receiver<PanelEvent>,
    shutdown: F,
) where
    S: TransformSink,
    F: std::future::Future<Output = ()>,
{
    let period = Duration::from_millis(controller.config().tick_interval_ms.max(1));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);
    let mut events_closed = false;

    controller.start();
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Panel shutdown requested");
                break;
            }
            event = events.recv(), if !events_closed => match event {
                Some(event) => {
                    debug!("Panel event: {:?}", event);
                    controller.handle(event);
                }
                None => {
                    info!("Event source closed, panel keeps publishing");
                    events_closed = true;
                }
            },
            _ = ticker.tick() => {
                if let Some(channel) = controller.tick() {
                    debug!("Tick published on {} channel", channel);
                }
            }
        }
    }
    controller.stop();
}

/// Forward command lines from `reader` as panel events.
///
/// Blocks the calling thread; run it on a thread of its own.
pub fn forward_events<R: BufRead>(
    reader: R,
    events: mpsc::Sender<PanelEvent>,
) -> Result<(), std::io::Error> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<PanelEvent>() {
            Ok(event) => {
                if events.blocking_send(event).is_err() {
                    break;
                }
            }
            Err(e) => warn!("{}", e),
        }
    }
    Ok(())
}

/// Forward stdin command lines as panel events from a detached thread.
///
/// The thread is never joined, so a pending read does not hold up shutdown.
pub fn spawn_stdin_reader(events: mpsc::Sender<PanelEvent>) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("panel-stdin".to_string())
        .spawn(move || {
            if let Err(e) = forward_events(std::io::stdin().lock(), events) {
                log::error!("Failed to read stdin: {}", e);
            }
        })?;
    Ok(())
}
