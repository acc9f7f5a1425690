use thiserror::Error;

/// Transport-level errors
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Send or disconnect attempted before a connection exists
    #[error("Connection manager is not initialized")]
    NotInitialized,

    /// Bind failure, unusable URL, or other unrecoverable startup problem
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// The URL scheme has no factory entry
    #[error("Unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    /// The host name could not be resolved before the deadline
    #[error("Host name resolution failed for '{0}'")]
    HostNameResolution(String),

    /// A connect or request deadline elapsed
    #[error("Timed out")]
    Timeout,

    /// The peer closed or the socket failed
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    /// Underlying socket error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for results that can return a NetworkError
pub type Result<T> = std::result::Result<T, NetworkError>;
