use thiserror::Error;

/// Errors raised by the wire primitives
///
/// These cover buffer ownership violations and pattern compilation failures.
/// Both are programmer errors: they indicate a bug in the caller (or a bad
/// grammar table) rather than a recoverable runtime condition.
#[derive(Debug, Error)]
pub enum WireError {
    /// A pattern failed to compile, or its capture count did not match the
    /// declared arity. Fatal at startup.
    #[error("Pattern initialization failed: {0}")]
    InitializationFailed(String),

    /// A mutation was attempted on a buffer whose mutation window is
    /// currently held elsewhere.
    #[error("Buffer is not owned for mutation")]
    BufferNotOwned,
}

/// Type alias for results that can return a WireError
pub type Result<T> = std::result::Result<T, WireError>;
