//! Local filesystem implementation of `BlobStore`.
//!
//! Blobs live flat under one root directory and are served statically
//! under a public URL prefix by the API layer.

use anyhow::bail;
use async_trait::async_trait;
use bytes::Bytes;
use domains::BlobStore;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

pub struct LocalBlobStore {
    /// Root directory for all uploads (e.g. "./data/uploads")
    root: PathBuf,
    /// Public URL prefix (e.g. "/uploads")
    url_prefix: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Blob names are generated server-side, but a second line of defense
    /// against traversal costs nothing.
    fn resolve(&self, name: &str) -> anyhow::Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            bail!("invalid blob name: {name:?}");
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, name: &str, data: Bytes) -> anyhow::Result<()> {
        let path = self.resolve(name)?;
        fs::create_dir_all(&self.root).await?;
        fs::write(&path, &data).await?;
        debug!(blob = %name, bytes = data.len(), "blob written");
        Ok(())
    }

    async fn remove(&self, name: &str) -> anyhow::Result<()> {
        let path = self.resolve(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Already gone counts as removed.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.url_prefix.trim_end_matches('/'), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> LocalBlobStore {
        let root = std::env::temp_dir().join(format!("blob-store-test-{}", Uuid::new_v4()));
        LocalBlobStore::new(root, "/uploads")
    }

    #[tokio::test]
    async fn put_then_remove_round_trip() {
        let store = temp_store();
        store.put("pic.png", Bytes::from_static(b"data")).await.unwrap();
        let on_disk = fs::read(store.root().join("pic.png")).await.unwrap();
        assert_eq!(on_disk, b"data");
        store.remove("pic.png").await.unwrap();
        assert!(!store.root().join("pic.png").exists());
    }

    #[tokio::test]
    async fn removing_a_missing_blob_is_not_an_error() {
        let store = temp_store();
        store.remove("never-written.png").await.unwrap();
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let store = temp_store();
        assert!(store.put("../escape.png", Bytes::new()).await.is_err());
        assert!(store.put("a/b.png", Bytes::new()).await.is_err());
        assert!(store.remove("..").await.is_err());
    }

    #[tokio::test]
    async fn public_url_joins_prefix_and_name() {
        let store = LocalBlobStore::new("/tmp/x", "/uploads/");
        assert_eq!(store.public_url("pic.png"), "/uploads/pic.png");
    }
}
