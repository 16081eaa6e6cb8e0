use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::FileSystem;
use crate::errors::{PortalError, PortalResult};
use crate::models::{McpConfig, PackageManifest, ServerRecord, ServerSnippets};
use crate::service::features::preview_text;
use crate::service::record_builder::{FolderContents, build_record};
use crate::service::snippets::generate_snippets;

pub const MANIFEST_FILE: &str = "package.json";
pub const CONFIG_FILE: &str = "mcp-config.json";
pub const README_FILE: &str = "README.md";

/// Scans the servers root on every call and builds [`ServerRecord`]s.
///
/// Nothing is cached: each request sees the folders as they are on disk.
/// One broken folder never fails the listing; it is logged and skipped.
pub struct DiscoveryService {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    readme_preview_bytes: usize,
}

impl DiscoveryService {
    pub fn new(fs: Arc<dyn FileSystem>, root: PathBuf, readme_preview_bytes: usize) -> Self {
        Self {
            fs,
            root,
            readme_preview_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All valid server folders under the root, ordered by folder name
    pub async fn list_all(&self) -> Vec<ServerRecord> {
        let mut folders = match self.fs.list_dirs(&self.root).await {
            Ok(folders) => folders,
            Err(e) => {
                tracing::warn!(
                    "Error scanning servers directory {}: {}",
                    self.root.display(),
                    e
                );
                return Vec::new();
            }
        };
        folders.sort();

        let mut records = Vec::with_capacity(folders.len());
        for folder in &folders {
            if let Some(record) = self.load_folder(folder).await {
                records.push(record);
            }
        }

        tracing::debug!(
            "Discovered {} server(s) in {} folder(s)",
            records.len(),
            folders.len()
        );
        records
    }

    /// Record whose `id` matches; the first one wins when ids collide
    pub async fn get_by_id(&self, id: &str) -> PortalResult<ServerRecord> {
        self.list_all()
            .await
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| PortalError::ServerNotFound { id: id.to_string() })
    }

    /// Full README text of a server
    pub async fn get_readme(&self, id: &str) -> PortalResult<String> {
        let record = self.get_by_id(id).await?;
        let readme_path = Path::new(&record.path).join(README_FILE);

        if !self.fs.exists(&readme_path).await {
            return Err(PortalError::ReadmeNotFound { id: id.to_string() });
        }
        self.fs.read_to_string(&readme_path).await
    }

    /// Copy-paste setup artifacts of a server
    pub async fn snippets(&self, id: &str) -> PortalResult<ServerSnippets> {
        let record = self.get_by_id(id).await?;
        Ok(generate_snippets(&record))
    }

    async fn load_folder(&self, folder: &str) -> Option<ServerRecord> {
        let path = self.root.join(folder);

        let manifest_path = path.join(MANIFEST_FILE);
        if !self.fs.exists(&manifest_path).await {
            tracing::debug!("Skipping {}: no {}", folder, MANIFEST_FILE);
            return None;
        }
        let manifest: PackageManifest = match self.read_json(&manifest_path).await {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!("Error reading {} for {}: {}", MANIFEST_FILE, folder, e);
                return None;
            }
        };

        let config_path = path.join(CONFIG_FILE);
        let config = if self.fs.exists(&config_path).await {
            match self.read_json::<McpConfig>(&config_path).await {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Error reading {} for {}: {}", CONFIG_FILE, folder, e);
                    None
                }
            }
        } else {
            None
        };

        let readme_path = path.join(README_FILE);
        let has_readme = self.fs.exists(&readme_path).await;
        let readme_preview = if has_readme {
            self.read_preview(&readme_path, folder).await
        } else {
            String::new()
        };

        Some(build_record(FolderContents {
            folder,
            path: &path,
            manifest,
            config,
            readme_preview,
            has_readme,
        }))
    }

    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, String> {
        let text = self
            .fs
            .read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        serde_json::from_str(&text).map_err(|e| e.to_string())
    }

    async fn read_preview(&self, path: &Path, folder: &str) -> String {
        match self.fs.read_prefix(path, self.readme_preview_bytes).await {
            Ok(bytes) => preview_text(&bytes),
            Err(e) => {
                tracing::warn!("Error reading {} for {}: {}", README_FILE, folder, e);
                String::new()
            }
        }
    }
}
