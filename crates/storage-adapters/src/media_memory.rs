//! In-memory `BlobStore` for tests.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use domains::BlobStore;

#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, Bytes>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blobs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, name: &str, data: Bytes) -> anyhow::Result<()> {
        self.blobs.insert(name.to_string(), data);
        Ok(())
    }

    async fn remove(&self, name: &str) -> anyhow::Result<()> {
        self.blobs.remove(name);
        Ok(())
    }

    fn public_url(&self, name: &str) -> String {
        format!("/uploads/{name}")
    }
}
