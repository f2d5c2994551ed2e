pub mod broadcast_channel;
pub mod durable_key_channel;
pub mod local_event_channel;

pub use broadcast_channel::{BroadcastSyncChannel, ScreenSyncListener};
pub use durable_key_channel::DurableKeyChannel;
pub use local_event_channel::LocalEventChannel;
