use thiserror::Error;

/// Domain model errors
///
/// Mutations never leave an entity outside its invariants: a failed setter is
/// a no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A value falls outside its declared bounds, or a reference points at a
    /// nonexistent entity.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No entity of the requested kind carries this identifier.
    #[error("Unknown {kind} identifier {id}")]
    UnknownIdentifier { kind: &'static str, id: u8 },

    /// A required piece of the persisted configuration is absent.
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),
}

/// Type alias for results that can return a ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
