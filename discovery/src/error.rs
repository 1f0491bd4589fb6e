//! Error types for the discovery engine boundary.
//!
//! The filter and summary transforms never fail. Errors only arise where
//! external input enters: configuration files and collaborator payloads.

/// Errors raised while loading configuration or decoding payloads.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Configuration YAML could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// A catalog or tutor payload could not be decoded
    #[error("Failed to decode payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Configuration parsed but is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
