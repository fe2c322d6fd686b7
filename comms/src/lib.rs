//! Zenoh transport for the transform broadcaster panel.
//!
//! Transforms are sent as ROS 2 `tf2_msgs/TFMessage` CDR payloads on two
//! keys: a latched static channel and a continuous dynamic channel.

pub mod broadcaster;
pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod serializers;

pub use broadcaster::{Outbox, TransformBroadcaster};
pub use client::TransformListener;
pub use config::{AppConfig, ZenohConfig};
pub use error::CommsError;
