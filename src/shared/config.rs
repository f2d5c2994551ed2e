use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DOCUMENT_KEY: &str = "cabinet-smart.base44.database.v2";
pub const DEFAULT_SYNC_STORAGE_KEY: &str = "cabinet-smart.tv.sync.v1";
pub const DEFAULT_SYNC_CHANNEL: &str = "cabinet-smart.tv.sync.channel";
pub const DEFAULT_SYNC_EVENT: &str = "cabinet-smart:tv-sync";

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    File,
    Sqlite,
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" | "fs" => Some(Self::File),
            "sqlite" | "sql" => Some(Self::Sqlite),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub media: MediaConfig,
    pub sync: SyncConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: String,
    pub document_key: String,
    pub database_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    pub dir: String,
    pub resolve_cache_size: usize,
    pub inline_limit_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub storage_key: String,
    pub channel_name: String,
    pub event_name: String,
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub asset_root: String,
    pub screen: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|dir| dir.join("cabinet-smart"))
        .unwrap_or_else(|| PathBuf::from("./data"))
        .to_string_lossy()
        .into_owned()
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        let media_dir = PathBuf::from(&data_dir)
            .join("media")
            .to_string_lossy()
            .into_owned();
        let database_url = format!(
            "sqlite://{}?mode=rwc",
            PathBuf::from(&data_dir).join("cabinet.db").display()
        );

        Self {
            storage: StorageConfig {
                backend: StorageBackend::File,
                data_dir,
                document_key: DEFAULT_DOCUMENT_KEY.to_string(),
                database_url,
            },
            media: MediaConfig {
                dir: media_dir,
                resolve_cache_size: 64,
                inline_limit_bytes: 8 * 1024 * 1024, // 8MB
            },
            sync: SyncConfig {
                storage_key: DEFAULT_SYNC_STORAGE_KEY.to_string(),
                channel_name: DEFAULT_SYNC_CHANNEL.to_string(),
                event_name: DEFAULT_SYNC_EVENT.to_string(),
                channel_capacity: 64,
            },
            display: DisplayConfig {
                asset_root: "/".to_string(),
                screen: "salle_attente".to_string(),
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // 既定値
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("CABINET_STORAGE_BACKEND") {
            if let Some(backend) = StorageBackend::parse(&v) {
                cfg.storage.backend = backend;
            }
        }
        if let Ok(v) = std::env::var("CABINET_DATA_DIR") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.storage.data_dir = trimmed.to_string();
                cfg.media.dir = PathBuf::from(trimmed)
                    .join("media")
                    .to_string_lossy()
                    .into_owned();
                cfg.storage.database_url = format!(
                    "sqlite://{}?mode=rwc",
                    PathBuf::from(trimmed).join("cabinet.db").display()
                );
            }
        }
        if let Ok(v) = std::env::var("CABINET_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.storage.database_url = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("CABINET_DOCUMENT_KEY") {
            if !v.trim().is_empty() {
                cfg.storage.document_key = v.trim().to_string();
            }
        }

        // メディア設定
        if let Ok(v) = std::env::var("CABINET_MEDIA_DIR") {
            if !v.trim().is_empty() {
                cfg.media.dir = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("CABINET_MEDIA_CACHE_SIZE") {
            if let Some(value) = parse_usize(&v) {
                cfg.media.resolve_cache_size = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("CABINET_MEDIA_INLINE_LIMIT_BYTES") {
            if let Some(value) = parse_u64(&v) {
                cfg.media.inline_limit_bytes = value;
            }
        }

        // TV同期設定
        if let Ok(v) = std::env::var("CABINET_SYNC_STORAGE_KEY") {
            if !v.trim().is_empty() {
                cfg.sync.storage_key = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("CABINET_SYNC_CHANNEL") {
            if !v.trim().is_empty() {
                cfg.sync.channel_name = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("CABINET_SYNC_CHANNEL_CAPACITY") {
            if let Some(value) = parse_usize(&v) {
                cfg.sync.channel_capacity = value.max(1);
            }
        }

        if let Ok(v) = std::env::var("CABINET_ASSET_ROOT") {
            cfg.display.asset_root = normalize_asset_root(&v);
        }
        if let Ok(v) = std::env::var("CABINET_SCREEN") {
            if !v.trim().is_empty() {
                cfg.display.screen = v.trim().to_string();
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.storage.document_key.trim().is_empty() {
            return Err("Storage document_key must not be empty".to_string());
        }
        if self.storage.backend == StorageBackend::Sqlite
            && self.storage.database_url.trim().is_empty()
        {
            return Err("Storage database_url is required for the sqlite backend".to_string());
        }
        if self.media.resolve_cache_size == 0 {
            return Err("Media resolve_cache_size must be greater than 0".to_string());
        }
        if self.sync.channel_capacity == 0 {
            return Err("Sync channel_capacity must be greater than 0".to_string());
        }
        if !self.display.asset_root.ends_with('/') {
            return Err("Display asset_root must end with '/'".to_string());
        }
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    pub fn media_dir(&self) -> PathBuf {
        PathBuf::from(&self.media.dir)
    }
}

fn normalize_asset_root(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}
