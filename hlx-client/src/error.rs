//! Client error types

use thiserror::Error;

/// Errors surfaced by the client facade and its controllers
#[derive(Debug, Error)]
pub enum ClientError {
    /// The peer answered `ERROR`, or sent a frame no grammar entry matched
    /// while a request was outstanding
    #[error("command rejected: {0}")]
    BadCommand(String),

    /// The request's deadline lapsed before a matching response arrived
    #[error("command timed out")]
    Timeout,

    /// The connection closed with requests still outstanding
    #[error("command cancelled by disconnect")]
    Cancelled,

    /// An operation was attempted before `connect` completed
    #[error("not connected")]
    NotInitialized,

    #[error(transparent)]
    Codec(#[from] hlx_codec::CodecError),

    #[error(transparent)]
    Model(#[from] hlx_model::ModelError),

    #[error(transparent)]
    Network(#[from] hlx_net::NetworkError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
