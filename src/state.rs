use crate::application::ports::blob_store::BlobStore;
use crate::application::ports::document_store::DurableDocumentStore;
use crate::application::ports::sync_bus::SyncChannel;
use crate::application::services::{
    DocumentStore, EntityHub, LocalMediaStore, MediaUploader, ReportService, ScreenSyncFilter,
    SyncBroadcaster,
};
use crate::domain::display::DisplaySnapshot;
use crate::domain::entities::{TargetScreen, TvContentType};
use crate::domain::media_source::resolve_media_source;
use crate::infrastructure::insights::MockInsightGenerator;
use crate::infrastructure::storage::{
    FileDocumentStore, FsBlobStore, MemoryBlobStore, MemoryDocumentStore, SqliteDocumentStore,
};
use crate::infrastructure::sync::{
    BroadcastSyncChannel, DurableKeyChannel, LocalEventChannel, ScreenSyncListener,
};
use crate::shared::config::{AppConfig, StorageBackend};
use crate::shared::error::AppError;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

/// アプリケーション全体の状態を管理する構造体
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub hub: EntityHub,
    pub media: Arc<LocalMediaStore>,
    pub uploader: Arc<MediaUploader>,
    pub reports: Arc<ReportService>,
    pub durable_sync: Arc<DurableKeyChannel>,
    pub broadcast: Arc<BroadcastSyncChannel>,
    pub local_events: Arc<LocalEventChannel>,
}

async fn open_document_backend(config: &AppConfig) -> Arc<dyn DurableDocumentStore> {
    let opened: Result<Arc<dyn DurableDocumentStore>, AppError> = match config.storage.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryDocumentStore::new())),
        StorageBackend::File => FileDocumentStore::new(config.data_dir())
            .await
            .map(|store| Arc::new(store) as Arc<dyn DurableDocumentStore>),
        StorageBackend::Sqlite => {
            if let Err(err) = tokio::fs::create_dir_all(config.data_dir()).await {
                warn!("Failed to create data dir for sqlite: {err}");
            }
            SqliteDocumentStore::connect(&config.storage.database_url)
                .await
                .map(|store| Arc::new(store) as Arc<dyn DurableDocumentStore>)
        }
    };

    // 永続領域が使えなくても起動は継続する
    opened.unwrap_or_else(|err| {
        warn!(
            backend = ?config.storage.backend,
            "document backend unavailable, using memory: {err}"
        );
        Arc::new(MemoryDocumentStore::new())
    })
}

async fn open_blob_store(config: &AppConfig) -> Arc<dyn BlobStore> {
    if config.storage.backend == StorageBackend::Memory {
        return Arc::new(MemoryBlobStore::new());
    }
    match FsBlobStore::new(config.media_dir()).await {
        Ok(store) => Arc::new(store),
        Err(err) => {
            warn!("media dir unavailable, keeping uploads in memory: {err}");
            Arc::new(MemoryBlobStore::new())
        }
    }
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;

        let backend = open_document_backend(&config).await;
        let store = Arc::new(DocumentStore::new(
            Arc::clone(&backend),
            config.storage.document_key.clone(),
        ));

        let durable_sync = Arc::new(DurableKeyChannel::new(
            backend,
            config.sync.storage_key.clone(),
        ));
        let broadcast = Arc::new(BroadcastSyncChannel::new(
            config.sync.channel_name.clone(),
            config.sync.channel_capacity,
        ));
        let local_events = Arc::new(LocalEventChannel::new(config.sync.event_name.clone()));
        let channels: Vec<Arc<dyn SyncChannel>> = vec![
            durable_sync.clone(),
            broadcast.clone(),
            local_events.clone(),
        ];
        let hub = EntityHub::new(store, Arc::new(SyncBroadcaster::new(channels)));

        let media = Arc::new(LocalMediaStore::new(
            open_blob_store(&config).await,
            config.media.resolve_cache_size,
        ));
        let uploader = Arc::new(MediaUploader::new(
            Arc::clone(&media),
            config.media.inline_limit_bytes,
        ));
        let reports = Arc::new(ReportService::new(
            hub.clone(),
            Arc::new(MockInsightGenerator::new()),
        ));

        info!(
            backend = hub.store().backend_name(),
            channels = ?hub.sync().channel_names(),
            "cabinet store initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            hub,
            media,
            uploader,
            reports,
            durable_sync,
            broadcast,
            local_events,
        })
    }

    /// 永続化しない構成（テスト・デモ用）
    pub async fn in_memory() -> Result<Self, AppError> {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        Self::new(config).await
    }

    pub fn screen(&self) -> TargetScreen {
        TargetScreen::parse(&self.config.display.screen).unwrap_or(TargetScreen::SalleAttente)
    }

    pub async fn display_snapshot(&self, screen: TargetScreen, today: NaiveDate) -> DisplaySnapshot {
        let document = self.hub.store().load().await;
        DisplaySnapshot::build(&document, screen, today)
    }

    /// 表示画面向けの更新シグナル受信口
    pub fn listen_for_screen(&self) -> ScreenSyncListener {
        self.broadcast
            .listen(ScreenSyncFilter::new(self.config.display.screen.clone()))
    }

    pub fn display_media_source(
        &self,
        media: &str,
        content_type: Option<TvContentType>,
        title: Option<&str>,
    ) -> String {
        resolve_media_source(media, content_type, title, &self.config.display.asset_root)
    }
}
