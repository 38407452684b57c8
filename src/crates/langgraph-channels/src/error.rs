//! Error types for channel operations

use thiserror::Error;

/// Result type for channel operations
pub type Result<T> = std::result::Result<T, ChannelError>;

/// Errors that can occur while updating, reading or restoring channels
#[derive(Error, Debug)]
pub enum ChannelError {
    /// An update batch broke the channel's arity contract.
    ///
    /// Nothing from the batch was applied.
    #[error("Invalid update: {0}")]
    InvalidUpdate(String),

    /// A read found no visible value
    #[error("Empty channel: {0}")]
    EmptyChannel(String),

    /// A checkpoint payload is corrupt or belongs to another channel kind
    #[error("Invalid checkpoint: {0}")]
    InvalidCheckpoint(String),

    /// No channel registered under this name
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Binary serialization error
    #[error("Binary serialization error: {0}")]
    BinarySerialization(#[from] bincode::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChannelError {
    /// True for the "nothing to read yet" signal.
    pub fn is_empty_channel(&self) -> bool {
        matches!(self, ChannelError::EmptyChannel(_))
    }

    /// Whether the caller may retry the same operation in a later step.
    ///
    /// Only [`ChannelError::EmptyChannel`] qualifies; every other variant is a
    /// contract violation or a corrupt payload.
    pub fn is_recoverable(&self) -> bool {
        self.is_empty_channel()
    }
}
