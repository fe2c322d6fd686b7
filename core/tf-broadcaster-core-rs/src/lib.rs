pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod mapper;
pub mod publisher;
pub mod settings;
pub mod standalone;
pub mod types;
pub mod widgets;

pub use config::{get_config, PanelConfig};
pub use controller::{PanelController, PanelPlugin};
pub use error::PanelError;
pub use event::{Axis, FrameField, PanelEvent};
pub use mapper::{ValueMapper, SLIDER_MAX};
pub use publisher::{LogSink, PublicationStatus, TransformPublisher, TransformSink};
pub use settings::{PanelState, SettingsStore};
pub use types::{AngleUnit, TransformRecord, TransformType};
pub use widgets::{BoundedAdapter, BoundedValue, StatusAdapter, TextAdapter};
