use crate::application::ports::document_store::DurableDocumentStore;
use crate::application::ports::sync_bus::SyncChannel;
use crate::domain::value_objects::SyncSignal;
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// 最新シグナルを永続キーへ書き込む。他プロセスは `read_latest` でポーリングする
pub struct DurableKeyChannel {
    store: Arc<dyn DurableDocumentStore>,
    key: String,
}

impl DurableKeyChannel {
    pub fn new(store: Arc<dyn DurableDocumentStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 壊れた値や未書き込みは `None`
    pub async fn read_latest(&self) -> Result<Option<SyncSignal>, AppError> {
        let raw = self.store.read(&self.key).await?;
        Ok(raw.as_deref().and_then(SyncSignal::parse))
    }
}

#[async_trait]
impl SyncChannel for DurableKeyChannel {
    fn name(&self) -> &'static str {
        "durable_key"
    }

    async fn publish(&self, signal: &SyncSignal) -> Result<(), AppError> {
        let payload = signal.to_json()?;
        self.store.write(&self.key, &payload).await?;
        debug!(key = %self.key, "sync signal persisted");
        Ok(())
    }
}
