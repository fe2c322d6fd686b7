use tf_broadcaster::{PanelError, TransformType};

/// Errors that can occur in the comms package
#[derive(Debug, thiserror::Error)]
pub enum CommsError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] cdr::Error),

    #[error("Zenoh error: {0}")]
    Zenoh(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Panel error: {0}")]
    Panel(#[from] PanelError),

    #[error("{0} channel closed")]
    ChannelClosed(TransformType),

    #[error("No latched transform available")]
    NoResponse,
}

impl From<String> for CommsError {
    fn from(s: String) -> Self {
        CommsError::Zenoh(s)
    }
}

impl From<&str> for CommsError {
    fn from(s: &str) -> Self {
        CommsError::Zenoh(s.to_string())
    }
}
