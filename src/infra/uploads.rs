//! Upload directory storage.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::config::UPLOAD_DIR_KEEPER;
use crate::errors::AppResult;

/// Directory holding uploaded images, addressed by bare filename.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under `filename`, creating the directory if needed.
    ///
    /// An existing file with the same name is overwritten. `filename` must
    /// already be sanitized.
    pub async fn write(&self, filename: &str, bytes: &[u8]) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.root).await?;
        let path = self.root.join(filename);
        fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Names of the regular files in the directory, sorted, without the
    /// keeper placeholder. A missing directory is created and reads empty.
    pub async fn list(&self) -> AppResult<Vec<String>> {
        fs::create_dir_all(&self.root).await?;

        let mut entries = fs::read_dir(&self.root).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name != UPLOAD_DIR_KEEPER {
                    files.push(name.to_string());
                }
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_directory_and_lists() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = UploadDir::new(tmp.path().join("static/uploads"));

        dir.write("b.png", b"png").await.unwrap();
        dir.write("a.jpg", b"jpg").await.unwrap();
        dir.write(UPLOAD_DIR_KEEPER, b"").await.unwrap();
        std::fs::create_dir(dir.root().join("nested")).unwrap();

        assert_eq!(dir.list().await.unwrap(), vec!["a.jpg", "b.png"]);
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = UploadDir::new(tmp.path());

        dir.write("bolo.png", b"old").await.unwrap();
        let path = dir.write("bolo.png", b"new").await.unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"new");
        assert_eq!(dir.list().await.unwrap(), vec!["bolo.png"]);
    }
}
