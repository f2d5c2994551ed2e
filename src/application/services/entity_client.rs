use crate::application::services::document_store::DocumentStore;
use crate::application::services::subscriptions::{Subscription, SubscriptionRegistry};
use crate::application::services::sync_broadcaster::SyncBroadcaster;
use crate::domain::derived::{ChangeSet, DerivationPipeline};
use crate::domain::entities::*;
use crate::domain::value_objects::{now, EntityKind, IdGenerator, SyncScreen, SyncSource};
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// パッチ中でも書き換えられないフィールド
const PROTECTED_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub success: bool,
}

struct EntityContext {
    store: Arc<DocumentStore>,
    pipeline: DerivationPipeline,
    subscriptions: SubscriptionRegistry,
    sync: Arc<SyncBroadcaster>,
    ids: IdGenerator,
}

impl EntityContext {
    /// 導出レコードを同じリビジョンへ追記し、追記された種別を返す
    fn apply_derived(&self, document: &mut Document, change: &ChangeSet) -> Vec<EntityKind> {
        let mut touched = Vec::new();
        for record in self.pipeline.derive(change) {
            let kind = record.append_to(document, &self.ids, change.at);
            if !touched.contains(&kind) {
                touched.push(kind);
            }
        }
        touched
    }

    async fn after_mutation(&self, kind: EntityKind, derived: &[EntityKind]) {
        self.subscriptions.notify(kind);
        for derived_kind in derived {
            self.subscriptions.notify(*derived_kind);
        }
        if kind.is_display_relevant() {
            self.sync.trigger(SyncScreen::All, SyncSource::System).await;
        }
    }
}

fn snapshot<T: Serialize>(record: &Record<T>) -> Result<Map<String, Value>, AppError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::SerializationError(format!(
            "record did not serialize to an object: {other}"
        ))),
    }
}

fn timestamp(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

/// エンティティ種別ごとの CRUD + 購読
pub struct EntityClient<T: Entity> {
    context: Arc<EntityContext>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for EntityClient<T> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> EntityClient<T> {
    pub fn kind(&self) -> EntityKind {
        T::KIND
    }

    /// 保存順（挿入順）のコピーを返す
    pub async fn list(&self) -> Vec<Record<T>> {
        let document = self.context.store.load().await;
        T::collection(&document).clone()
    }

    pub async fn get(&self, id: &str) -> Option<Record<T>> {
        let document = self.context.store.load().await;
        T::collection(&document)
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    pub async fn create(&self, data: T) -> Result<Record<T>, AppError> {
        let id = self.context.ids.generate(&T::KIND.id_prefix());
        self.insert(id, data).await
    }

    /// シード・インポート用。既存IDとの重複は拒否する
    pub async fn create_with_id(
        &self,
        id: impl Into<String>,
        data: T,
    ) -> Result<Record<T>, AppError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "{} id must not be empty",
                T::KIND
            )));
        }
        self.insert(id, data).await
    }

    async fn insert(&self, id: String, data: T) -> Result<Record<T>, AppError> {
        let context = Arc::clone(&self.context);
        let (record, derived) = self
            .context
            .store
            .transact(|document| {
                let collection = T::collection_mut(document);
                if collection.iter().any(|existing| existing.id == id) {
                    return Err(AppError::InvalidInput(format!(
                        "{} {id} existe déjà",
                        T::KIND
                    )));
                }
                let at = now();
                let record = Record::new(id.clone(), at, data);
                let change = ChangeSet::created(T::KIND, id.as_str(), snapshot(&record)?, at);
                collection.push(record.clone());
                let derived = context.apply_derived(document, &change);
                Ok((record, derived))
            })
            .await?;

        debug!(kind = %T::KIND, id = %record.id, "record created");
        self.context.after_mutation(T::KIND, &derived).await;
        Ok(record)
    }

    /// `patch` は部分オブジェクト。`id`/`createdAt`/`updatedAt` は無視される
    pub async fn update(&self, id: &str, patch: Value) -> Result<Record<T>, AppError> {
        let Value::Object(patch) = patch else {
            return Err(AppError::InvalidInput(format!(
                "{} patch must be a JSON object",
                T::KIND
            )));
        };

        let context = Arc::clone(&self.context);
        let (record, derived) = self
            .context
            .store
            .transact(|document| {
                let collection = T::collection_mut(document);
                let index = collection
                    .iter()
                    .position(|record| record.id == id)
                    .ok_or_else(|| AppError::not_found(T::KIND.as_str(), id))?;

                let existing = &collection[index];
                let before = snapshot(existing)?;
                let at = now().max(existing.created_at);

                let mut merged = before.clone();
                for (key, value) in patch {
                    if !PROTECTED_FIELDS.contains(&key.as_str()) {
                        merged.insert(key, value);
                    }
                }
                merged.insert("updatedAt".to_string(), timestamp(at));

                let updated: Record<T> = serde_json::from_value(Value::Object(merged))
                    .map_err(|err| {
                        AppError::ValidationError(format!("{} {id}: {err}", T::KIND))
                    })?;
                let after = snapshot(&updated)?;
                collection[index] = updated.clone();

                let change = ChangeSet::updated(T::KIND, id, before, after, at);
                let derived = context.apply_derived(document, &change);
                Ok((updated, derived))
            })
            .await?;

        debug!(kind = %T::KIND, id, "record updated");
        self.context.after_mutation(T::KIND, &derived).await;
        Ok(record)
    }

    /// 該当IDが無くてもエラーにはせず `success: false` を返す
    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome, AppError> {
        let context = Arc::clone(&self.context);
        let (outcome, derived) = self
            .context
            .store
            .transact(|document| {
                let collection = T::collection_mut(document);
                let Some(index) = collection.iter().position(|record| record.id == id) else {
                    return Ok((DeleteOutcome { success: false }, Vec::new()));
                };
                let removed = collection.remove(index);
                let change = ChangeSet::deleted(T::KIND, id, snapshot(&removed)?, now());
                let derived = context.apply_derived(document, &change);
                Ok((DeleteOutcome { success: true }, derived))
            })
            .await?;

        debug!(kind = %T::KIND, id, removed = outcome.success, "record delete");
        self.context.after_mutation(T::KIND, &derived).await;
        Ok(outcome)
    }

    /// この種別が変更されるたびに呼ばれる。戻り値で購読解除する
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.context.subscriptions.subscribe(T::KIND, callback)
    }
}

/// ストア・導出ルール・購読・同期を束ね、種別ごとのクライアントを払い出す
#[derive(Clone)]
pub struct EntityHub {
    context: Arc<EntityContext>,
}

macro_rules! entity_accessors {
    ($( $method:ident => $ty:ty ),* $(,)?) => {
        impl EntityHub {
            $(
                pub fn $method(&self) -> EntityClient<$ty> {
                    self.client::<$ty>()
                }
            )*
        }
    };
}

impl EntityHub {
    pub fn new(store: Arc<DocumentStore>, sync: Arc<SyncBroadcaster>) -> Self {
        Self::with_pipeline(store, sync, DerivationPipeline::standard())
    }

    pub fn with_pipeline(
        store: Arc<DocumentStore>,
        sync: Arc<SyncBroadcaster>,
        pipeline: DerivationPipeline,
    ) -> Self {
        Self {
            context: Arc::new(EntityContext {
                store,
                pipeline,
                subscriptions: SubscriptionRegistry::new(),
                sync,
                ids: IdGenerator::new(),
            }),
        }
    }

    pub fn client<T: Entity>(&self) -> EntityClient<T> {
        EntityClient {
            context: Arc::clone(&self.context),
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.context.store
    }

    pub fn subscriptions(&self) -> &SubscriptionRegistry {
        &self.context.subscriptions
    }

    pub fn sync(&self) -> &Arc<SyncBroadcaster> {
        &self.context.sync
    }
}

entity_accessors! {
    patients => Patient,
    appointments => Appointment,
    social_posts => SocialPost,
    tv_contents => TvContent,
    tv_audio_tracks => TvAudioTrack,
    waiting_queue_tickets => WaitingQueueTicket,
    patient_flow_events => PatientFlowEvent,
    audit_logs => AuditLog,
    resources => Resource,
    lan_devices => LanDevice,
    health_network_links => HealthNetworkLink,
    leads => Lead,
    doctor_profiles => DoctorProfile,
    ai_reports => AiReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryDocumentStore;
    use serde_json::json;

    fn hub() -> EntityHub {
        let store = DocumentStore::new(Arc::new(MemoryDocumentStore::new()), "test.entities");
        EntityHub::new(Arc::new(store), Arc::new(SyncBroadcaster::disabled()))
    }

    fn lead(name: &str) -> Lead {
        Lead {
            full_name: name.to_string(),
            telephone: "+212600000000".into(),
            email: "lead@example.com".into(),
            message: String::new(),
            source: "landing".into(),
            requested_date: "2026-02-01".into(),
            requested_service: "Consultation".into(),
            status: LeadStatus::Nouveau,
        }
    }

    #[tokio::test]
    async fn create_assigns_prefixed_id_and_timestamps() {
        let hub = hub();
        let created = hub.leads().create(lead("Imane")).await.unwrap();

        assert!(created.id.starts_with("lead-"));
        assert_eq!(created.created_at, created.updated_at);
        let listed = hub.leads().list().await;
        assert_eq!(listed.last(), Some(&created));
    }

    #[tokio::test]
    async fn create_with_id_rejects_duplicates() {
        let hub = hub();
        hub.leads().create_with_id("lead-fixed", lead("A")).await.unwrap();
        let err = hub
            .leads()
            .create_with_id("lead-fixed", lead("B"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn update_ignores_protected_fields() {
        let hub = hub();
        let created = hub.leads().create(lead("Imane")).await.unwrap();

        let updated = hub
            .leads()
            .update(
                &created.id,
                json!({
                    "id": "hijacked",
                    "createdAt": "2000-01-01T00:00:00.000Z",
                    "status": "contacte",
                }),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= updated.created_at);
        assert_eq!(updated.data.status, LeadStatus::Contacte);
        assert_eq!(updated.data.full_name, "Imane");
    }

    #[tokio::test]
    async fn update_with_wrong_type_is_rejected_without_change() {
        let hub = hub();
        let created = hub.leads().create(lead("Imane")).await.unwrap();
        let audits = hub.audit_logs().list().await.len();

        let err = hub
            .leads()
            .update(&created.id, json!({"status": "perdu"}))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(hub.leads().get(&created.id).await, Some(created));
        assert_eq!(hub.audit_logs().list().await.len(), audits);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let hub = hub();
        let before = hub.store().load().await;
        let err = hub
            .patients()
            .update("nonexistent-id", json!({"nom": "X"}))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: Patient nonexistent-id introuvable");
        assert_eq!(hub.store().load().await, before);
    }

    #[tokio::test]
    async fn non_object_patch_is_invalid_input() {
        let hub = hub();
        let err = hub.leads().update("lead-1", json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn audit_rows_are_added_in_the_same_revision() {
        let hub = hub();
        let created = hub.leads().create(lead("Imane")).await.unwrap();

        let document = hub.store().load().await;
        let audit = document.audit_logs.last().unwrap();
        assert_eq!(audit.data.entity, "Lead");
        assert_eq!(audit.data.entity_id, created.id);
        assert_eq!(audit.data.action, AuditAction::Create);
        assert!(audit.id.starts_with("audit-"));
    }
}
