pub mod blob_store;
pub mod document_store;
pub mod insight_generator;
pub mod sync_bus;

pub use blob_store::{BlobMetadata, BlobStore, StoredBlob};
pub use document_store::DurableDocumentStore;
pub use insight_generator::{GeneratedInsights, InsightGenerator};
pub use sync_bus::SyncChannel;
