use crate::types::TransformType;

/// Errors that can occur in the broadcaster core
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("Invalid range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    #[error("Initial value {initial} outside of [{min}, {max}]")]
    InitialOutOfRange { initial: f64, min: f64, max: f64 },

    #[error("Failed to send on {channel} channel: {reason}")]
    Send {
        channel: TransformType,
        reason: String,
    },

    #[error("Invalid command: {0}")]
    Command(String),

    #[error("Configuration error: {0}")]
    Config(#[from] confy::ConfyError),
}
