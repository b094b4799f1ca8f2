//! Local filesystem implementation of the `FileStore` port.
//!
//! Paths are always relative to the configured root; absolute paths and
//! parent-directory traversal are rejected before touching the filesystem.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use boqlens_core::analysis::ports::FileStore;
use boqlens_domain::{BoqLensError, Result};
use tokio::fs;

use crate::errors::InfraError;

/// File store rooted at a local directory.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first save.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative.is_absolute()
            || relative.components().any(|part| matches!(part, Component::ParentDir));
        if escapes {
            return Err(BoqLensError::InvalidInput(format!("illegal storage path '{path}'")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await.map_err(map_io_error)?;
        }
        fs::write(&full, bytes).await.map_err(map_io_error)
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(path)?;
        match fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(BoqLensError::Storage(format!("file not found: {path}")))
            }
            Err(err) => Err(map_io_error(err)),
        }
    }
}

fn map_io_error(err: std::io::Error) -> BoqLensError {
    BoqLensError::from(InfraError::from(err))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn save_then_download_round_trips() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let store = LocalFileStore::new(temp_dir.path());

        store.save("abc/boq.csv", b"Code,Total\n1,100\n").await.expect("file saved");
        let bytes = store.download("abc/boq.csv").await.expect("file downloaded");
        assert_eq!(bytes, b"Code,Total\n1,100\n");
    }

    #[tokio::test]
    async fn missing_file_is_a_storage_error() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let store = LocalFileStore::new(temp_dir.path());

        let err = store.download("nope/missing.csv").await.unwrap_err();
        assert!(matches!(err, BoqLensError::Storage(_)));
    }

    #[tokio::test]
    async fn traversal_paths_are_rejected() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let store = LocalFileStore::new(temp_dir.path());

        let err = store.download("../outside.csv").await.unwrap_err();
        assert!(matches!(err, BoqLensError::InvalidInput(_)));
    }
}
