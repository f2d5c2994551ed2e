use crate::application::ports::blob_store::{BlobMetadata, BlobStore, StoredBlob};
use crate::shared::error::AppError;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;

/// `<root>/blobs/<id>.bin` と `<root>/meta/<id>.json` に分けて保存する
pub struct FsBlobStore {
    root_dir: PathBuf,
    blobs_dir: PathBuf,
    meta_dir: PathBuf,
}

fn validate_id(id: &str) -> Result<(), AppError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!("invalid blob id: {id}")))
    }
}

impl FsBlobStore {
    pub async fn new(root_dir: PathBuf) -> Result<Self, AppError> {
        let blobs_dir = root_dir.join("blobs");
        let meta_dir = root_dir.join("meta");
        for dir in [&blobs_dir, &meta_dir] {
            fs::create_dir_all(dir)
                .await
                .map_err(|err| AppError::Storage(format!("Failed to create media dir: {err}")))?;
        }
        Ok(Self {
            root_dir,
            blobs_dir,
            meta_dir,
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn blob_path(&self, id: &str) -> PathBuf {
        self.blobs_dir.join(format!("{id}.bin"))
    }

    fn meta_path(&self, id: &str) -> PathBuf {
        self.meta_dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, blob: StoredBlob) -> Result<(), AppError> {
        let id = blob.metadata.id.clone();
        validate_id(&id)?;
        fs::write(self.blob_path(&id), &blob.bytes)
            .await
            .map_err(|err| AppError::Storage(format!("Failed to write media blob: {err}")))?;
        let meta = serde_json::to_vec_pretty(&blob.metadata).map_err(|err| {
            AppError::SerializationError(format!("Failed to serialize media metadata: {err}"))
        })?;
        // メタデータが存在するものだけを読み出し対象とする
        fs::write(self.meta_path(&id), meta)
            .await
            .map_err(|err| AppError::Storage(format!("Failed to write media metadata: {err}")))
    }

    async fn get(&self, id: &str) -> Result<Option<StoredBlob>, AppError> {
        let Some(metadata) = self.metadata(id).await? else {
            return Ok(None);
        };
        match fs::read(self.blob_path(id)).await {
            Ok(bytes) => Ok(Some(StoredBlob {
                metadata,
                bytes: Bytes::from(bytes),
            })),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::Storage(format!("Failed to read media blob: {err}"))),
        }
    }

    async fn metadata(&self, id: &str) -> Result<Option<BlobMetadata>, AppError> {
        if validate_id(id).is_err() {
            return Ok(None);
        }
        let bytes = match fs::read(self.meta_path(id)).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(AppError::Storage(format!(
                    "Failed to read media metadata: {err}"
                )))
            }
        };
        serde_json::from_slice(&bytes).map(Some).map_err(|err| {
            AppError::DeserializationError(format!("Failed to parse media metadata: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::now;
    use tempfile::TempDir;

    fn blob(id: &str, bytes: &'static [u8]) -> StoredBlob {
        StoredBlob {
            metadata: BlobMetadata {
                id: id.to_string(),
                name: "clip.mp4".into(),
                mime_type: "video/mp4".into(),
                size: bytes.len() as u64,
                sha256: String::new(),
                created_at: now(),
            },
            bytes: Bytes::from_static(bytes),
        }
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = FsBlobStore::new(temp.path().to_path_buf()).await.unwrap();
        let original = blob("7f1c2a9e-0000-4000-8000-000000000001", b"frames");

        store.put(original.clone()).await.unwrap();
        let loaded = store.get(&original.metadata.id).await.unwrap();
        assert_eq!(loaded, Some(original));
    }

    #[tokio::test]
    async fn unknown_and_unsafe_ids_are_absent() {
        let temp = TempDir::new().unwrap();
        let store = FsBlobStore::new(temp.path().to_path_buf()).await.unwrap();
        assert_eq!(store.get("missing").await.unwrap(), None);
        assert_eq!(store.get("../meta/x").await.unwrap(), None);
        assert!(store.put(blob("../escape", b"x")).await.is_err());
    }
}
