use crate::domain::value_objects::EntityKind;
use std::collections::{BTreeMap, HashMap};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tracing::{error, trace};

pub type Listener = Arc<dyn Fn() + Send + Sync>;

type ListenerMap = HashMap<EntityKind, BTreeMap<u64, Listener>>;

#[derive(Default)]
struct RegistryInner {
    listeners: Mutex<ListenerMap>,
    next_subscription_id: AtomicU64,
}

impl RegistryInner {
    fn lock(&self) -> MutexGuard<'_, ListenerMap> {
        // リスナーはロック外で呼ぶので、毒化しても中身は整合している
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn remove(&self, kind: EntityKind, id: u64) {
        let mut listeners = self.lock();
        if let Some(entries) = listeners.get_mut(&kind) {
            entries.remove(&id);
            if entries.is_empty() {
                listeners.remove(&kind);
            }
        }
    }
}

/// エンティティ種別ごとの引数なしコールバック集合
#[derive(Clone, Default)]
pub struct SubscriptionRegistry {
    inner: Arc<RegistryInner>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, kind: EntityKind, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.inner.next_subscription_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .lock()
            .entry(kind)
            .or_default()
            .insert(id, Arc::new(callback));
        trace!(kind = %kind, subscription_id = id, "listener registered");

        Subscription {
            registry: Arc::downgrade(&self.inner),
            kind,
            id,
            active: AtomicBool::new(true),
        }
    }

    /// 登録順に同期呼び出しする。パニックしたリスナーは他のリスナーを止めない
    pub fn notify(&self, kind: EntityKind) {
        let listeners: Vec<(u64, Listener)> = match self.inner.lock().get(&kind) {
            Some(entries) => entries
                .iter()
                .map(|(id, listener)| (*id, Arc::clone(listener)))
                .collect(),
            None => return,
        };

        for (id, listener) in listeners {
            if catch_unwind(AssertUnwindSafe(|| listener())).is_err() {
                error!(kind = %kind, subscription_id = id, "listener panicked during notify");
            }
        }
    }

    pub fn listener_count(&self, kind: EntityKind) -> usize {
        self.inner.lock().get(&kind).map_or(0, BTreeMap::len)
    }
}

/// 購読解除ハンドル。2回目以降の `unsubscribe` は何もしない
pub struct Subscription {
    registry: Weak<RegistryInner>,
    kind: EntityKind,
    id: u64,
    active: AtomicBool,
}

impl Subscription {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.kind, self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        (count, move || {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn notify_reaches_only_matching_kind() {
        let registry = SubscriptionRegistry::new();
        let (patients, on_patient) = counter();
        let (leads, on_lead) = counter();
        let _a = registry.subscribe(EntityKind::Patient, on_patient);
        let _b = registry.subscribe(EntityKind::Lead, on_lead);

        registry.notify(EntityKind::Patient);
        registry.notify(EntityKind::Patient);

        assert_eq!(patients.load(Ordering::SeqCst), 2);
        assert_eq!(leads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let registry = SubscriptionRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let handles: Vec<Subscription> = (0..3)
            .map(|index| {
                let order = Arc::clone(&order);
                registry.subscribe(EntityKind::TvContent, move || {
                    order.lock().unwrap().push(index);
                })
            })
            .collect();

        registry.notify(EntityKind::TvContent);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
        drop(handles);
    }

    #[test]
    fn panicking_listener_does_not_block_others() {
        let registry = SubscriptionRegistry::new();
        let _first = registry.subscribe(EntityKind::Patient, || panic!("listener failure"));
        let (count, on_patient) = counter();
        let _second = registry.subscribe(EntityKind::Patient, on_patient);

        registry.notify(EntityKind::Patient);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let registry = SubscriptionRegistry::new();
        let (count, on_patient) = counter();
        let first = registry.subscribe(EntityKind::Patient, on_patient);
        let (other, on_other) = counter();
        let _second = registry.subscribe(EntityKind::Patient, on_other);

        first.unsubscribe();
        first.unsubscribe();
        assert!(!first.is_active());
        assert_eq!(registry.listener_count(EntityKind::Patient), 1);

        registry.notify(EntityKind::Patient);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(other.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_may_unsubscribe_during_notify() {
        let registry = SubscriptionRegistry::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let inner_slot = Arc::clone(&slot);
        let subscription = registry.subscribe(EntityKind::Lead, move || {
            if let Some(handle) = inner_slot.lock().unwrap().as_ref() {
                handle.unsubscribe();
            }
        });
        *slot.lock().unwrap() = Some(subscription);

        registry.notify(EntityKind::Lead);
        assert_eq!(registry.listener_count(EntityKind::Lead), 0);
    }
}
