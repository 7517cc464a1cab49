use std::io;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::model::Document;
use crate::traits::DocumentStorage;

const LOCATION: &str = "memory";

/// In-memory document storage.
///
/// Holds the serialized document text rather than parsed values, so loads
/// go through the same parsing as the file backend and malformed content
/// can be seeded for tests. `None` behaves like a missing file.
pub struct InMemoryDocumentStorage {
    raw: RwLock<Option<String>>,
}

impl InMemoryDocumentStorage {
    /// Create a storage holding an empty document (`[]`).
    pub fn new() -> Self {
        Self::from_raw("[]")
    }

    /// Create a storage with no document at all. Loads fail with
    /// `StoreError::Read`.
    pub fn uninitialized() -> Self {
        Self {
            raw: RwLock::new(None),
        }
    }

    /// Create a storage seeded with `document`.
    pub fn with_document(document: &Document) -> StoreResult<Self> {
        let raw = encode(document)?;
        Ok(Self::from_raw(raw))
    }

    /// Create a storage seeded with arbitrary text.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RwLock::new(Some(raw.into())),
        }
    }

    /// The currently stored text, if any.
    pub fn raw(&self) -> Option<String> {
        self.raw.read().expect("lock poisoned").clone()
    }

    /// Replace the stored text.
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.raw.write().expect("lock poisoned") = Some(raw.into());
    }
}

impl Default for InMemoryDocumentStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStorage for InMemoryDocumentStorage {
    async fn load(&self) -> StoreResult<Document> {
        let raw = self.raw().ok_or_else(|| StoreError::Read {
            location: LOCATION.into(),
            source: io::Error::new(io::ErrorKind::NotFound, "no document stored"),
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            location: LOCATION.into(),
            source,
        })
    }

    async fn save(&self, document: &Document) -> StoreResult<()> {
        let raw = encode(document)?;
        self.set_raw(raw);
        Ok(())
    }

    fn location(&self) -> String {
        LOCATION.into()
    }
}

impl std::fmt::Debug for InMemoryDocumentStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.raw().map(|raw| raw.len());
        f.debug_struct("InMemoryDocumentStorage")
            .field("document_bytes", &bytes)
            .finish()
    }
}

fn encode(document: &Document) -> StoreResult<String> {
    serde_json::to_string(document).map_err(|e| StoreError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExtraFields, Question};

    fn sample() -> Document {
        vec![Question {
            id: "q1".into(),
            author: "Mark Whalberg".into(),
            summary: "What is a homeostasis?".into(),
            answers: vec![],
            extra: ExtraFields::new(),
        }]
    }

    #[tokio::test]
    async fn new_storage_holds_empty_document() {
        let storage = InMemoryDocumentStorage::new();
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load() {
        let storage = InMemoryDocumentStorage::new();
        storage.save(&sample()).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), sample());
        assert!(storage.raw().unwrap().starts_with("[{"));
    }

    #[tokio::test]
    async fn seeded_document_loads() {
        let storage = InMemoryDocumentStorage::with_document(&sample()).unwrap();
        assert_eq!(storage.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn uninitialized_fails_read() {
        let storage = InMemoryDocumentStorage::uninitialized();
        let err = storage.load().await.unwrap_err();
        assert!(err.is_read());
    }

    #[tokio::test]
    async fn empty_text_is_malformed() {
        let storage = InMemoryDocumentStorage::from_raw("");
        assert!(storage.load().await.unwrap_err().is_malformed());

        storage.set_raw(r#"{"not": "a list"}"#);
        assert!(storage.load().await.unwrap_err().is_malformed());
    }

    #[test]
    fn debug_reports_size() {
        let storage = InMemoryDocumentStorage::new();
        let debug = format!("{storage:?}");
        assert!(debug.contains("document_bytes"));
    }
}
