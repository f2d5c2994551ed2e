pub mod entity_kind;
pub mod media_ref;
pub mod record_id;
pub mod sync_signal;

pub use entity_kind::EntityKind;
pub use media_ref::{MediaRef, LOCAL_MEDIA_PREFIX};
pub use record_id::{now, IdGenerator};
pub use sync_signal::{SyncScreen, SyncSignal, SyncSource};
