use log::{debug, error, info};
use tf_broadcaster::{PanelError, TransformRecord, TransformSink, TransformType};
use tokio::sync::{mpsc, oneshot, watch};
use zenoh::qos::CongestionControl;

use crate::config::ZenohConfig;
use crate::error::CommsError;
use crate::serializers::serialize_tf_message;

/// Non-blocking [`TransformSink`] feeding a [`TransformBroadcaster`].
///
/// Static payloads are queued; dynamic payloads overwrite each other so a
/// slow transport only ever sees the latest one.
pub struct Outbox {
    static_tx: mpsc::UnboundedSender<Vec<u8>>,
    dynamic_tx: watch::Sender<Option<Vec<u8>>>,
}

impl TransformSink for Outbox {
    fn send(
        &mut self,
        channel: TransformType,
        transforms: &[TransformRecord],
    ) -> Result<(), PanelError> {
        let payload = serialize_tf_message(transforms).map_err(|e| PanelError::Send {
            channel,
            reason: e.to_string(),
        })?;
        match channel {
            TransformType::Static => {
                self.static_tx.send(payload).map_err(|_| PanelError::Send {
                    channel,
                    reason: "broadcaster stopped".to_string(),
                })
            }
            TransformType::Dynamic => {
                self.dynamic_tx.send_replace(Some(payload));
                Ok(())
            }
        }
    }
}

/// Forwards [`Outbox`] payloads to zenoh and serves the latched static transform.
pub struct TransformBroadcaster {
    session: zenoh::Session,
    config: ZenohConfig,
    static_rx: mpsc::UnboundedReceiver<Vec<u8>>,
    dynamic_rx: watch::Receiver<Option<Vec<u8>>>,
}

impl TransformBroadcaster {
    pub async fn new(config: ZenohConfig) -> Result<(Self, Outbox), CommsError> {
        let zenoh_config = config.to_zenoh_config()?;
        let session = zenoh::open(zenoh_config)
            .await
            .map_err(|e| CommsError::Zenoh(format!("Failed to open zenoh session: {}", e)))?;
        info!("Zenoh session established in {} mode", config.mode);

        let (static_tx, static_rx) = mpsc::unbounded_channel();
        let (dynamic_tx, dynamic_rx) = watch::channel(None);

        Ok((
            TransformBroadcaster {
                session,
                config,
                static_rx,
                dynamic_rx,
            },
            Outbox {
                static_tx,
                dynamic_tx,
            },
        ))
    }

    /// Runs until `shutdown` fires or every [`Outbox`] has been dropped
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) -> Result<(), CommsError> {
        let dynamic_publisher = self
            .session
            .declare_publisher(self.config.dynamic_key.clone())
            .congestion_control(CongestionControl::Drop)
            .await
            .map_err(|e| CommsError::Zenoh(format!("Failed to declare publisher: {}", e)))?;
        info!("Publishing dynamic transforms on: {}", self.config.dynamic_key);

        let queryable = self
            .session
            .declare_queryable(self.config.static_key.clone())
            .await
            .map_err(|e| CommsError::Zenoh(format!("Failed to declare queryable: {}", e)))?;
        info!("Latching static transforms on: {}", self.config.static_key);

        let mut latched: Option<Vec<u8>> = None;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Broadcaster shutdown requested");
                    break;
                }
                payload = self.static_rx.recv() => {
                    let Some(payload) = payload else {
                        info!("All outboxes dropped, stopping broadcaster");
                        break;
                    };
                    if let Err(e) = self
                        .session
                        .put(self.config.static_key.as_str(), payload.clone())
                        .await
                    {
                        error!("Failed to publish static transform: {}", e);
                    } else {
                        debug!("Published static transform ({} bytes)", payload.len());
                    }
                    latched = Some(payload);
                }
                changed = self.dynamic_rx.changed() => {
                    if changed.is_err() {
                        info!("All outboxes dropped, stopping broadcaster");
                        break;
                    }
                    let payload = self.dynamic_rx.borrow_and_update().clone();
                    if let Some(payload) = payload {
                        if let Err(e) = dynamic_publisher.put(payload).await {
                            error!("Failed to publish dynamic transform: {}", e);
                        }
                    }
                }
                query = queryable.recv_async() => {
                    let query = query
                        .map_err(|e| CommsError::Zenoh(format!("Queryable closed: {}", e)))?;
                    match &latched {
                        Some(payload) => {
                            if let Err(e) = query
                                .reply(self.config.static_key.as_str(), payload.clone())
                                .await
                            {
                                error!("Failed to reply with latched transform: {}", e);
                            }
                        }
                        None => debug!("Static query received before any static transform"),
                    }
                }
            }
        }

        Ok(())
    }
}
