//! Server error types

use thiserror::Error;

/// Errors surfaced by the dispatcher and simulator
#[derive(Debug, Error)]
pub enum ServerError {
    /// The frame matched no grammar entry, or carried an unusable value
    #[error("bad command: {0}")]
    BadCommand(String),

    /// The simulator could not be brought up
    #[error("initialization failed: {0}")]
    InitializationFailed(String),

    #[error(transparent)]
    Codec(#[from] hlx_codec::CodecError),

    #[error(transparent)]
    Model(#[from] hlx_model::ModelError),

    #[error(transparent)]
    Network(#[from] hlx_net::NetworkError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
