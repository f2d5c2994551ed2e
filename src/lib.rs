pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod state;

pub use application::services::{
    DeleteOutcome, DocumentStore, EntityClient, EntityHub, LocalMediaStore, MediaUploader,
    ScreenSyncFilter, Subscription, SyncBroadcaster,
};
pub use domain::entities::{Document, Entity, Record};
pub use domain::value_objects::{EntityKind, SyncScreen, SyncSignal, SyncSource};
pub use shared::{AppConfig, AppError, Result};
pub use state::AppState;

/// ログ設定の初期化。`RUST_LOG` が無ければ `cabinet_store_lib=debug,info`
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cabinet_store_lib=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
