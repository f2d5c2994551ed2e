pub mod document_store;
pub mod entity_client;
pub mod media_service;
pub mod report_service;
pub mod subscriptions;
pub mod sync_broadcaster;

pub use document_store::DocumentStore;
pub use entity_client::{DeleteOutcome, EntityClient, EntityHub};
pub use media_service::{
    DownloadedMedia, LocalMediaStore, MediaError, MediaUpload, MediaUploader, ResolvedMedia,
};
pub use report_service::ReportService;
pub use subscriptions::{Subscription, SubscriptionRegistry};
pub use sync_broadcaster::{ScreenSyncFilter, SyncBroadcaster};
