use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::model::Document;
use crate::traits::DocumentStorage;

/// JSON file document storage.
///
/// The document is a single compact JSON array. Saves write a sibling
/// temporary file and rename it over the target, so the file on disk is
/// always either the previous document or the new one.
#[derive(Clone, Debug)]
pub struct FileDocumentStorage {
    path: PathBuf,
}

impl FileDocumentStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file holding an empty document if it does not exist.
    ///
    /// Returns `true` if a new file was created. An existing file is left
    /// untouched, whatever its content.
    pub async fn init(&self) -> StoreResult<bool> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| self.read_error(source))?;
        if exists {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.write_error(source))?;
        }
        self.save(&Document::new()).await?;
        debug!(path = %self.path.display(), "initialized empty document");
        Ok(true)
    }

    fn read_error(&self, source: io::Error) -> StoreError {
        StoreError::Read {
            location: self.location(),
            source,
        }
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            location: self.location(),
            source,
        }
    }
}

#[async_trait]
impl DocumentStorage for FileDocumentStorage {
    async fn load(&self) -> StoreResult<Document> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.read_error(source))?;
        serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
            location: self.location(),
            source,
        })
    }

    async fn save(&self, document: &Document) -> StoreResult<()> {
        let bytes =
            serde_json::to_vec(document).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_file(&path, &bytes))
            .await
            .map_err(|e| self.write_error(io::Error::other(e)))?
            .map_err(|source| self.write_error(source))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write `bytes` to a temporary file next to the real document, then rename
/// it into place.
///
/// A symlinked `path` is resolved first so the link survives and its target
/// is replaced. The existing document's permissions carry over to the new file.
fn replace_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let target = match std::fs::canonicalize(path) {
        Ok(real) => real,
        Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(e),
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    match std::fs::metadata(&target) {
        Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, ExtraFields, Question};

    fn sample() -> Document {
        vec![Question {
            id: "q1".into(),
            author: "Mateusz Czyzewski".into(),
            summary: "Of what nationality was Carl Friedrich Gauss?".into(),
            answers: vec![Answer {
                id: "a1".into(),
                author: "Karolina Easter".into(),
                summary: "German".into(),
                extra: ExtraFields::new(),
            }],
            extra: ExtraFields::new(),
        }]
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileDocumentStorage::new(dir.path().join("questions.json"));
        let err = storage.load().await.unwrap_err();
        assert!(err.is_read());
        assert!(err.to_string().contains("questions.json"));
    }

    #[tokio::test]
    async fn empty_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "").unwrap();
        let err = FileDocumentStorage::new(&path).load().await.unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileDocumentStorage::new(dir.path().join("questions.json"));
        storage.save(&sample()).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), sample());

        // Only the document remains; the temporary file was renamed away.
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn save_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileDocumentStorage::new(dir.path().join("questions.json"));
        storage.save(&sample()).await.unwrap();
        storage.save(&Document::new()).await.unwrap();
        let raw = std::fs::read_to_string(storage.path()).unwrap();
        assert_eq!(raw, "[]");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn save_keeps_document_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "[]").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        FileDocumentStorage::new(&path).save(&sample()).await.unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn save_through_symlink_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.json");
        let link = dir.path().join("questions.json");
        std::fs::write(&real, "[]").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let storage = FileDocumentStorage::new(&link);
        storage.save(&sample()).await.unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        let through_target = FileDocumentStorage::new(&real).load().await.unwrap();
        assert_eq!(through_target, sample());
    }

    #[tokio::test]
    async fn init_creates_once() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileDocumentStorage::new(dir.path().join("data").join("questions.json"));
        assert!(storage.init().await.unwrap());
        assert!(storage.load().await.unwrap().is_empty());

        storage.save(&sample()).await.unwrap();
        assert!(!storage.init().await.unwrap());
        assert_eq!(storage.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reads_documents_written_by_other_tools() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(
            &path,
            r#"[{"id":"q1","summary":"Who are you?","author":"Tim Doods","answers":[]}]"#,
        )
        .unwrap();
        let document = FileDocumentStorage::new(&path).load().await.unwrap();
        assert_eq!(document[0].author, "Tim Doods");
    }
}
