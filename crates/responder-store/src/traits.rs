use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::Document;

/// Whole-document storage.
///
/// Implementations must satisfy these invariants:
/// - `load` returns the full document exactly as last saved, or fails.
/// - `save` replaces the full document; there is no partial update.
/// - Nothing is cached between calls: every `load` observes the current
///   stored state.
/// - No locking or versioning. Two writers that loaded the same document
///   race, and the last `save` wins.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Read and parse the complete document.
    ///
    /// Returns `StoreError::Read` if the location cannot be read and
    /// `StoreError::Malformed` if its content is not a sequence of questions.
    async fn load(&self) -> StoreResult<Document>;

    /// Replace the stored document with `document`.
    async fn save(&self, document: &Document) -> StoreResult<()>;

    /// Human-readable name of the storage location, used in errors and logs.
    fn location(&self) -> String;
}
