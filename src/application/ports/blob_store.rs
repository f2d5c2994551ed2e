use crate::shared::error::AppError;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobMetadata {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub sha256: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub metadata: BlobMetadata,
    pub bytes: Bytes,
}

/// 生成IDをキーとする追記専用のバイナリ格納領域
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, blob: StoredBlob) -> Result<(), AppError>;

    async fn get(&self, id: &str) -> Result<Option<StoredBlob>, AppError>;

    async fn metadata(&self, id: &str) -> Result<Option<BlobMetadata>, AppError>;
}
