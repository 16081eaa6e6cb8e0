use std::path::Path;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use crate::errors::PortalResult;

/// Domain trait for the read-only filesystem access discovery needs
///
/// Discovery only ever reads, so the trait carries no write operations.
/// Tests substitute in-memory or failing implementations.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Names of the immediate subdirectories of `path`, in no particular order
    async fn list_dirs(&self, path: &Path) -> PortalResult<Vec<String>>;

    /// Read the entire file as text, replacing invalid UTF-8 with U+FFFD
    async fn read_to_string(&self, path: &Path) -> PortalResult<String>;

    /// Read at most `limit` bytes from the start of the file
    async fn read_prefix(&self, path: &Path, limit: usize) -> PortalResult<Vec<u8>>;

    /// Whether a file or directory exists at `path`
    async fn exists(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by `tokio::fs`
#[derive(Debug, Clone, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn list_dirs(&self, path: &Path) -> PortalResult<Vec<String>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::debug!("Skipping non UTF-8 folder name: {:?}", raw),
            }
        }

        Ok(names)
    }

    async fn read_to_string(&self, path: &Path) -> PortalResult<String> {
        let bytes = tokio::fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn read_prefix(&self, path: &Path, limit: usize) -> PortalResult<Vec<u8>> {
        let file = tokio::fs::File::open(path).await?;
        let mut buffer = Vec::with_capacity(limit);
        file.take(limit as u64).read_to_end(&mut buffer).await?;
        Ok(buffer)
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}
