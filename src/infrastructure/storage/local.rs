use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Durable local storage for uploaded audio files.
///
/// Owns the upload directory; everything stored through this service lives
/// directly under `root` with a collision-resistant file name chosen by the
/// caller.
#[derive(Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub async fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;

        info!("✅ Upload directory ready at {}", root.display());

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute destination path for a stored file name.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub async fn remove(&self, file_name: &str) -> std::io::Result<()> {
        fs::remove_file(self.path_for(file_name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_root_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("uploads");

        let storage = LocalStorage::new(&root).await.unwrap();

        assert!(root.is_dir());
        assert_eq!(storage.root(), root);
    }

    #[tokio::test]
    async fn path_for_joins_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let dest = storage.path_for("talk-1234.mp3");
        assert_eq!(dest, dir.path().join("talk-1234.mp3"));
    }

    #[tokio::test]
    async fn remove_deletes_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let dest = storage.path_for("talk.mp3");
        std::fs::write(&dest, b"ID3").unwrap();

        storage.remove("talk.mp3").await.unwrap();
        assert!(!dest.exists());
    }
}
