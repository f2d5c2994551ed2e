use crate::application::ports::sync_bus::SyncChannel;
use crate::domain::value_objects::SyncSignal;
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::error;

type EventListener = Arc<dyn Fn(&SyncSignal) + Send + Sync>;

/// 同一コンテキスト内のリスナーへ同期的に配送するイベント
pub struct LocalEventChannel {
    event_name: String,
    listeners: Mutex<BTreeMap<u64, EventListener>>,
    next_listener_id: AtomicU64,
}

impl LocalEventChannel {
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            listeners: Mutex::new(BTreeMap::new()),
            next_listener_id: AtomicU64::new(1),
        }
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn add_listener<F>(&self, listener: F) -> u64
    where
        F: Fn(&SyncSignal) + Send + Sync + 'static,
    {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(id, Arc::new(listener));
        id
    }

    pub fn remove_listener(&self, id: u64) -> bool {
        self.lock().remove(&id).is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<u64, EventListener>> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SyncChannel for LocalEventChannel {
    fn name(&self) -> &'static str {
        "local_event"
    }

    async fn publish(&self, signal: &SyncSignal) -> Result<(), AppError> {
        let listeners: Vec<(u64, EventListener)> = self
            .lock()
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();
        // 書き込みは既に永続化済みなので、リスナーのパニックは呼び出し側へ伝えない
        for (id, listener) in listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(signal))).is_err() {
                error!(
                    event = %self.event_name,
                    listener_id = id,
                    "sync event listener panicked"
                );
            }
        }
        Ok(())
    }
}
