pub mod derived;
pub mod display;
pub mod entities;
pub mod media_source;
pub mod seed;
pub mod value_objects;

pub use derived::{ChangeAction, ChangeSet, DerivationPipeline, DerivationRule, DerivedRecord};
pub use display::DisplaySnapshot;
pub use entities::{Document, Entity, RawDocument, Record};
pub use value_objects::{EntityKind, MediaRef, SyncScreen, SyncSignal, SyncSource};
