//! Image storage backend.
//!
//! A trait seam over the flat uploads directory so handlers never touch
//! paths directly.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Storage backend for uploaded images.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Write data under the given filename.
    async fn write(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Read a stored file, or None if it does not exist.
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Check whether a stored file exists.
    async fn exists(&self, name: &str) -> Result<bool>;
}

/// Local filesystem storage over a single flat directory.
pub struct LocalImageStorage {
    base_path: PathBuf,
}

impl LocalImageStorage {
    /// Create a new local image storage rooted at the given directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Resolve a filename to its on-disk path.
    ///
    /// Rejects anything that would escape the storage directory: path
    /// separators, parent-dir components, and NUL bytes.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains('\0') {
            bail!("invalid stored filename");
        }
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => bail!("path traversal not allowed in stored filename"),
        }
        Ok(self.base_path.join(name))
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve(name)?;

        let mut file = fs::File::create(&path)
            .await
            .context("failed to create file")?;
        file.write_all(data).await.context("failed to write file")?;
        file.flush().await.context("failed to flush file")?;

        debug!(name = %name, size = data.len(), "file written");
        Ok(())
    }

    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = match self.resolve(name) {
            Ok(path) => path,
            Err(_) => return Ok(None),
        };

        match fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("failed to read file"),
        }
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        let path = match self.resolve(name) {
            Ok(path) => path,
            Err(_) => return Ok(false),
        };
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }
}

impl std::fmt::Debug for LocalImageStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalImageStorage")
            .field("base_path", &self.base_path)
            .finish()
    }
}
