use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use super::AssetStore;

/// Filesystem-backed asset storage. Keys are server-generated relative
/// paths such as `tasks_images/<uuid>.png`; URLs are rendered absolute
/// under `{base_url}/storage/`.
pub struct FsAssetStore {
    root: PathBuf,
    base_url: String,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys come from our own key generator, but never let a stored
        // key escape the storage root.
        if key.contains("..") || key.starts_with('/') {
            bail!("invalid asset key: {}", key);
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn store(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create asset directory for {}", key))?;
        }
        fs::write(&path, bytes).with_context(|| format!("failed to write asset {}", key))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::remove_file(&path).with_context(|| format!("failed to delete asset {}", key))
    }

    fn url(&self, key: &str) -> String {
        format!("{}/storage/{}", self.base_url, key)
    }
}
