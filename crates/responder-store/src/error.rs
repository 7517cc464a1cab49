/// Faults from document storage.
///
/// These are not recoverable inside the store and propagate to the caller.
/// Validation and not-found conditions are never reported here; see
/// [`Rejection`](crate::Rejection).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The storage location could not be read (missing file, permissions).
    #[error("failed to read document at {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The storage location could not be written.
    #[error("failed to write document at {location}: {source}")]
    Write {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored content does not parse as a sequence of questions.
    #[error("malformed document at {location}: {source}")]
    Malformed {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory document could not be encoded for saving.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Returns `true` for faults raised while reading.
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    /// Returns `true` if the stored content failed to parse.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
