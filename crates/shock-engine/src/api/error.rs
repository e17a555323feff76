use thiserror::Error;

/// Errors raised while setting up the effect.
/// Once a scene is running, nothing in the frame loop returns an error.
#[derive(Debug, Error)]
pub enum ShockError {
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for effect setup.
pub type ShockResult<T> = std::result::Result<T, ShockError>;
