use crate::application::ports::blob_store::{BlobMetadata, BlobStore, StoredBlob};
use crate::application::ports::document_store::DurableDocumentStore;
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// プロセス内だけで完結するドキュメント領域（テスト・一時実行用）
#[derive(Default)]
pub struct MemoryDocumentStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DurableDocumentStore for MemoryDocumentStore {
    async fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, StoredBlob>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, blob: StoredBlob) -> Result<(), AppError> {
        self.blobs
            .write()
            .await
            .insert(blob.metadata.id.clone(), blob);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<StoredBlob>, AppError> {
        Ok(self.blobs.read().await.get(id).cloned())
    }

    async fn metadata(&self, id: &str) -> Result<Option<BlobMetadata>, AppError> {
        Ok(self
            .blobs
            .read()
            .await
            .get(id)
            .map(|blob| blob.metadata.clone()))
    }
}
