use crate::application::ports::document_store::DurableDocumentStore;
use crate::domain::entities::{Document, RawDocument};
use crate::domain::seed::demo_document;
use crate::domain::value_objects::now;
use crate::shared::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// 単一ドキュメントの唯一の書き込み口。
///
/// 永続化に失敗するとプロセス終了までメモリ上のミラーだけで動作し続ける（縮退モード）。
pub struct DocumentStore {
    backend: Arc<dyn DurableDocumentStore>,
    key: String,
    mirror: Mutex<Document>,
    degraded: AtomicBool,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn DurableDocumentStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            mirror: Mutex::new(demo_document(now())),
            degraded: AtomicBool::new(false),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    /// 欠けているキーは空配列ではなくシード値で補う
    pub fn normalize(&self, raw: RawDocument) -> Document {
        raw.normalize(demo_document(now()))
    }

    pub async fn load(&self) -> Document {
        let mut mirror = self.mirror.lock().await;
        self.load_locked(&mut mirror).await;
        mirror.clone()
    }

    pub async fn save(&self, document: Document) {
        let mut mirror = self.mirror.lock().await;
        self.save_locked(&mut mirror, document).await;
    }

    /// load → 変更 → save を1つのロック内で行う。`f` が失敗した場合は何も保存しない
    pub async fn transact<F, R>(&self, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut Document) -> Result<R, AppError>,
    {
        let mut mirror = self.mirror.lock().await;
        self.load_locked(&mut mirror).await;
        let mut working = mirror.clone();
        let result = f(&mut working)?;
        self.save_locked(&mut mirror, working).await;
        Ok(result)
    }

    /// シードデータで初期化し直す
    pub async fn reset(&self) -> Document {
        let seed = demo_document(now());
        let mut mirror = self.mirror.lock().await;
        self.save_locked(&mut mirror, seed.clone()).await;
        info!("document store reset to seed dataset");
        seed
    }

    async fn load_locked(&self, mirror: &mut Document) {
        if self.is_degraded() {
            return;
        }

        match self.backend.read(&self.key).await {
            Ok(Some(raw)) => match serde_json::from_str::<RawDocument>(&raw) {
                Ok(parsed) => {
                    let missing = parsed.missing_kinds();
                    if !missing.is_empty() {
                        debug!(?missing, "filling missing collections from seed");
                    }
                    *mirror = self.normalize(parsed);
                }
                Err(err) => {
                    warn!("persisted document is corrupt, reseeding: {err}");
                    let seed = demo_document(now());
                    self.save_locked(mirror, seed).await;
                }
            },
            Ok(None) => {
                info!(backend = self.backend_name(), "no persisted document, seeding");
                let seed = demo_document(now());
                self.save_locked(mirror, seed).await;
            }
            Err(err) => self.enter_degraded("read", &err),
        }
    }

    async fn save_locked(&self, mirror: &mut Document, document: Document) {
        *mirror = document;
        if self.is_degraded() {
            return;
        }

        let serialized = match serde_json::to_string(&*mirror) {
            Ok(serialized) => serialized,
            Err(err) => {
                self.enter_degraded("serialize", &AppError::from(err));
                return;
            }
        };
        if let Err(err) = self.backend.write(&self.key, &serialized).await {
            self.enter_degraded("write", &err);
        }
    }

    fn enter_degraded(&self, operation: &str, err: &AppError) {
        if !self.degraded.swap(true, Ordering::AcqRel) {
            warn!(
                backend = self.backend_name(),
                "document {operation} failed, continuing in memory-only mode: {err}"
            );
        }
    }
}
