use thiserror::Error;

/// Codec-level errors
///
/// Parsing distinguishes "this frame is not that command" (a `None` from
/// `parse_*`, so the next pattern in a table can be tried) from "this frame
/// matched the grammar but carries an unusable value", which is a
/// [`CodecError::BadCommand`].
#[derive(Debug, Error)]
pub enum CodecError {
    /// A frame matched no grammar, or a matched capture could not be
    /// converted to its typed value.
    #[error("Bad command: {0}")]
    BadCommand(String),

    /// A grammar table failed to build. Fatal at startup.
    #[error("Codec initialization failed: {0}")]
    InitializationFailed(String),
}

impl From<hlx_wire::WireError> for CodecError {
    fn from(error: hlx_wire::WireError) -> Self {
        match error {
            hlx_wire::WireError::InitializationFailed(msg) => {
                CodecError::InitializationFailed(msg)
            }
            hlx_wire::WireError::BufferNotOwned => {
                CodecError::InitializationFailed("buffer not owned".to_string())
            }
        }
    }
}

/// Type alias for results that can return a CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
