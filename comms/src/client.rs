use log::debug;
use tf_broadcaster::{TransformRecord, TransformType};
use zenoh::handlers::FifoChannelHandler;
use zenoh::pubsub::Subscriber;
use zenoh::sample::Sample;

use crate::config::ZenohConfig;
use crate::error::CommsError;
use crate::serializers::deserialize_tf_message;

/// Client receiving the transforms of a [`TransformBroadcaster`](crate::TransformBroadcaster)
pub struct TransformListener {
    session: zenoh::Session,
    config: ZenohConfig,
    static_sub: Subscriber<FifoChannelHandler<Sample>>,
    dynamic_sub: Subscriber<FifoChannelHandler<Sample>>,
}

impl TransformListener {
    pub async fn new(config: ZenohConfig) -> Result<Self, CommsError> {
        let zenoh_config = config.to_zenoh_config()?;

        let session = zenoh::open(zenoh_config)
            .await
            .map_err(|e| CommsError::Zenoh(format!("Failed to open zenoh session: {}", e)))?;

        let static_sub = session
            .declare_subscriber(config.static_key.clone())
            .await
            .map_err(|e| CommsError::Zenoh(format!("Failed to declare subscriber: {}", e)))?;
        let dynamic_sub = session
            .declare_subscriber(config.dynamic_key.clone())
            .await
            .map_err(|e| CommsError::Zenoh(format!("Failed to declare subscriber: {}", e)))?;

        Ok(TransformListener {
            session,
            config,
            static_sub,
            dynamic_sub,
        })
    }

    /// Ask the broadcaster for the last static transform it sent
    pub async fn latched(&self) -> Result<Vec<TransformRecord>, CommsError> {
        let replies = self
            .session
            .get(self.config.static_key.as_str())
            .await
            .map_err(|e| CommsError::Zenoh(format!("Failed to send query: {}", e)))?;

        // Wait for first reply
        while let Ok(reply) = replies.recv_async().await {
            match reply.result() {
                Ok(sample) => {
                    let data = sample.payload().to_bytes();
                    return deserialize_tf_message(&data);
                }
                Err(e) => {
                    return Err(CommsError::Zenoh(format!("Query error: {}", e)));
                }
            }
        }

        Err(CommsError::NoResponse)
    }

    /// Next message on either channel
    pub async fn recv(&self) -> Result<(TransformType, Vec<TransformRecord>), CommsError> {
        let (channel, sample) = tokio::select! {
            sample = self.static_sub.recv_async() => (TransformType::Static, sample),
            sample = self.dynamic_sub.recv_async() => (TransformType::Dynamic, sample),
        };
        let sample = sample.map_err(|_| CommsError::ChannelClosed(channel))?;
        debug!("Received {} transform on {}", channel, sample.key_expr());
        let transforms = deserialize_tf_message(&sample.payload().to_bytes())?;
        Ok((channel, transforms))
    }
}
