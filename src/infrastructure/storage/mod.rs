pub mod blob_file_store;
pub mod file_document_store;
pub mod memory_store;
pub mod sqlite_document_store;

pub use blob_file_store::FsBlobStore;
pub use file_document_store::FileDocumentStore;
pub use memory_store::{MemoryBlobStore, MemoryDocumentStore};
pub use sqlite_document_store::SqliteDocumentStore;
