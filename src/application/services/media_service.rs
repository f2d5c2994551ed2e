use crate::application::ports::blob_store::{BlobMetadata, BlobStore, StoredBlob};
use crate::domain::value_objects::{now, MediaRef};
use crate::shared::error::AppError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

const DEFAULT_RESOLVE_CACHE: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(size) => size,
    None => unreachable!(),
};

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Aucun média à télécharger.")]
    EmptySource,
    #[error("Référence média locale invalide: {0}")]
    InvalidReference(String),
    #[error("Média local introuvable: {0}")]
    NotFound(String),
    #[error("stockage média indisponible: {0}")]
    Unavailable(String),
    #[error("data URI invalide: {0}")]
    InvalidDataUri(String),
    #[error("téléchargement distant non pris en charge: {0}")]
    RemoteUnsupported(String),
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::NotFound(_) => AppError::NotFound(err.to_string()),
            MediaError::EmptySource
            | MediaError::InvalidReference(_)
            | MediaError::InvalidDataUri(_)
            | MediaError::RemoteUnsupported(_) => AppError::InvalidInput(err.to_string()),
            MediaError::Unavailable(_) => AppError::Storage(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaUpload {
    pub url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedMedia {
    /// ローカル参照ではないのでそのまま使える
    External(String),
    /// 本体は `LocalMediaStore::read` で必要時に読む
    Local(BlobMetadata),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedMedia {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// `data:<mime>;base64,<payload>` を分解する
fn decode_data_uri(source: &str) -> Result<(String, Bytes), MediaError> {
    let body = source
        .strip_prefix("data:")
        .ok_or_else(|| MediaError::InvalidDataUri(source.chars().take(32).collect()))?;
    let (header, payload) = body
        .split_once(',')
        .ok_or_else(|| MediaError::InvalidDataUri("missing payload".into()))?;

    if let Some(mime) = header.strip_suffix(";base64") {
        let bytes = STANDARD
            .decode(payload)
            .map_err(|err| MediaError::InvalidDataUri(err.to_string()))?;
        Ok((mime.to_string(), Bytes::from(bytes)))
    } else {
        let decoded = urlencoding::decode_binary(payload.as_bytes()).into_owned();
        Ok((header.to_string(), Bytes::from(decoded)))
    }
}

/// 大きなアップロードを本体ドキュメントとは別に保持するメディアストア。
/// 解決キャッシュはメタデータのみで、バイト列は保持しない
pub struct LocalMediaStore {
    blobs: Arc<dyn BlobStore>,
    resolved: Mutex<LruCache<String, BlobMetadata>>,
}

impl LocalMediaStore {
    pub fn new(blobs: Arc<dyn BlobStore>, resolve_cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(resolve_cache_size).unwrap_or(DEFAULT_RESOLVE_CACHE);
        Self {
            blobs,
            resolved: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub async fn save(
        &self,
        name: &str,
        mime_type: &str,
        bytes: Bytes,
    ) -> Result<MediaUpload, MediaError> {
        let id = Uuid::new_v4().to_string();
        let size = bytes.len() as u64;
        let metadata = BlobMetadata {
            id: id.clone(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
            sha256: sha256_hex(&bytes),
            created_at: now(),
        };

        self.blobs
            .put(StoredBlob { metadata, bytes })
            .await
            .map_err(|err| MediaError::Unavailable(err.to_string()))?;
        debug!(blob_id = %id, size, "local media saved");

        Ok(MediaUpload {
            url: MediaRef::new(id, name).to_string(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
        })
    }

    /// 解決できないローカル参照は `None`（呼び出し側は「利用不可」として扱う）
    pub async fn resolve(&self, reference: &str) -> Option<ResolvedMedia> {
        if !MediaRef::is_local(reference) {
            return Some(ResolvedMedia::External(reference.to_string()));
        }

        let normalized = reference.trim().to_string();
        if let Some(cached) = self.resolved.lock().await.get(&normalized) {
            return Some(ResolvedMedia::Local(cached.clone()));
        }

        let parsed = MediaRef::parse(&normalized)?;
        match self.blobs.metadata(parsed.id()).await {
            Ok(Some(metadata)) => {
                self.resolved
                    .lock()
                    .await
                    .put(normalized, metadata.clone());
                Some(ResolvedMedia::Local(metadata))
            }
            Ok(None) => {
                debug!(blob_id = parsed.id(), "local media reference has no blob");
                None
            }
            Err(err) => {
                warn!(blob_id = parsed.id(), "local media lookup failed: {err}");
                None
            }
        }
    }

    /// 解決済みメディアの本体を読む。呼び出し側が手放せば解放される
    pub async fn read(&self, metadata: &BlobMetadata) -> Result<Bytes, MediaError> {
        let blob = self
            .blobs
            .get(&metadata.id)
            .await
            .map_err(|err| MediaError::Unavailable(err.to_string()))?
            .ok_or_else(|| MediaError::NotFound(metadata.id.clone()))?;
        Ok(blob.bytes)
    }

    pub async fn fetch_for_download(
        &self,
        reference: &str,
        fallback_name: &str,
    ) -> Result<DownloadedMedia, MediaError> {
        let source = reference.trim();
        if source.is_empty() {
            return Err(MediaError::EmptySource);
        }

        if MediaRef::is_local(source) {
            let parsed = MediaRef::parse(source)
                .ok_or_else(|| MediaError::InvalidReference(source.to_string()))?;
            let blob = self
                .blobs
                .get(parsed.id())
                .await
                .map_err(|err| MediaError::Unavailable(err.to_string()))?
                .ok_or_else(|| MediaError::NotFound(parsed.id().to_string()))?;
            let file_name = if blob.metadata.name.is_empty() {
                fallback_name.to_string()
            } else {
                blob.metadata.name.clone()
            };
            return Ok(DownloadedMedia {
                file_name,
                mime_type: blob.metadata.mime_type,
                bytes: blob.bytes,
            });
        }

        if source.starts_with("data:") {
            let (mime_type, bytes) = decode_data_uri(source)?;
            return Ok(DownloadedMedia {
                file_name: fallback_name.to_string(),
                mime_type,
                bytes,
            });
        }

        Err(MediaError::RemoteUnsupported(source.to_string()))
    }
}

/// アップロード先の振り分け。音声・動画・大容量はローカルストア、それ以外は data URI
pub struct MediaUploader {
    store: Arc<LocalMediaStore>,
    inline_limit_bytes: u64,
}

impl MediaUploader {
    pub fn new(store: Arc<LocalMediaStore>, inline_limit_bytes: u64) -> Self {
        Self {
            store,
            inline_limit_bytes,
        }
    }

    fn is_heavy(&self, mime_type: &str, size: u64) -> bool {
        size > self.inline_limit_bytes
            || mime_type.starts_with("video/")
            || mime_type.starts_with("audio/")
    }

    pub async fn upload(&self, name: &str, mime_type: &str, bytes: Bytes) -> MediaUpload {
        let size = bytes.len() as u64;
        if self.is_heavy(mime_type, size) {
            match self.store.save(name, mime_type, bytes.clone()).await {
                Ok(upload) => return upload,
                Err(err) => warn!("local media save failed, inlining upload: {err}"),
            }
        }

        MediaUpload {
            url: format!("data:{mime_type};base64,{}", STANDARD.encode(&bytes)),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
        }
    }
}
