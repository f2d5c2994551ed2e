//! 一次的な変更から監査ログ・患者動線イベントを導出するルール群。
//!
//! 各ルールは変更前後のスナップショットだけを見る純粋関数で、
//! 結果は一次変更と同じドキュメントリビジョンに追記される。

mod audit_trail;
mod patient_flow;

pub use audit_trail::AuditTrailRule;
pub use patient_flow::{AppointmentFlowRule, QueueFlowRule};

use crate::domain::entities::{AuditLog, Document, PatientFlowEvent, Record};
use crate::domain::value_objects::{EntityKind, IdGenerator};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Create => "create",
            ChangeAction::Update => "update",
            ChangeAction::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次変更の記述。`before` は作成時、`after` は削除時に `None`
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet {
    pub kind: EntityKind,
    pub action: ChangeAction,
    pub entity_id: String,
    pub before: Option<Map<String, Value>>,
    pub after: Option<Map<String, Value>>,
    pub at: DateTime<Utc>,
}

impl ChangeSet {
    pub fn created(
        kind: EntityKind,
        entity_id: impl Into<String>,
        after: Map<String, Value>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            action: ChangeAction::Create,
            entity_id: entity_id.into(),
            before: None,
            after: Some(after),
            at,
        }
    }

    pub fn updated(
        kind: EntityKind,
        entity_id: impl Into<String>,
        before: Map<String, Value>,
        after: Map<String, Value>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            action: ChangeAction::Update,
            entity_id: entity_id.into(),
            before: Some(before),
            after: Some(after),
            at,
        }
    }

    pub fn deleted(
        kind: EntityKind,
        entity_id: impl Into<String>,
        before: Map<String, Value>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            action: ChangeAction::Delete,
            entity_id: entity_id.into(),
            before: Some(before),
            after: None,
            at,
        }
    }

    pub(crate) fn before_str(&self, key: &str) -> Option<&str> {
        self.before.as_ref().and_then(|map| map.get(key)).and_then(Value::as_str)
    }

    pub(crate) fn after_str(&self, key: &str) -> Option<&str> {
        self.after.as_ref().and_then(|map| map.get(key)).and_then(Value::as_str)
    }

    /// 変更後スナップショットのフィールドを型付きで読む
    pub(crate) fn after_field<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.after.as_ref()?.get(key)?.clone();
        serde_json::from_value(value).ok()
    }

    /// `statut` が実際に変化した場合のみ新しい値を返す
    pub(crate) fn changed_status(&self) -> Option<&str> {
        let next = self.after_str("statut")?;
        if self.before_str("statut") == Some(next) {
            return None;
        }
        Some(next)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DerivedRecord {
    Audit(AuditLog),
    Flow(PatientFlowEvent),
}

impl DerivedRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            DerivedRecord::Audit(_) => EntityKind::AuditLog,
            DerivedRecord::Flow(_) => EntityKind::PatientFlowEvent,
        }
    }

    fn id_prefix(&self) -> &'static str {
        match self {
            DerivedRecord::Audit(_) => "audit",
            DerivedRecord::Flow(_) => "flow",
        }
    }

    /// 新しいIDを割り当ててドキュメントへ追記し、追記先の種別を返す
    pub fn append_to(
        self,
        document: &mut Document,
        ids: &IdGenerator,
        at: DateTime<Utc>,
    ) -> EntityKind {
        let kind = self.kind();
        let id = ids.generate(self.id_prefix());
        match self {
            DerivedRecord::Audit(log) => document.audit_logs.push(Record::new(id, at, log)),
            DerivedRecord::Flow(event) => {
                document.patient_flow_events.push(Record::new(id, at, event))
            }
        }
        kind
    }
}

pub trait DerivationRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn applies_to(&self, kind: EntityKind) -> bool;

    fn derive(&self, change: &ChangeSet) -> Vec<DerivedRecord>;
}

/// 種別タグで振り分けるルールの合成
pub struct DerivationPipeline {
    rules: Vec<Box<dyn DerivationRule>>,
}

impl DerivationPipeline {
    pub fn new(rules: Vec<Box<dyn DerivationRule>>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(AuditTrailRule),
            Box::new(QueueFlowRule),
            Box::new(AppointmentFlowRule),
        ])
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn derive(&self, change: &ChangeSet) -> Vec<DerivedRecord> {
        self.rules
            .iter()
            .filter(|rule| rule.applies_to(change.kind))
            .flat_map(|rule| rule.derive(change))
            .collect()
    }
}

impl Default for DerivationPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for DerivationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationPipeline")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FlowStep;
    use crate::domain::value_objects::now;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn ticket(statut: &str) -> Map<String, Value> {
        object(json!({
            "id": "queue-9",
            "patient_id": "pat-1",
            "numeroTicket": "A-200",
            "priorite": "normale",
            "statut": statut,
        }))
    }

    #[test]
    fn ticket_create_yields_audit_and_arrival() {
        let pipeline = DerivationPipeline::standard();
        let change =
            ChangeSet::created(EntityKind::WaitingQueueTicket, "queue-9", ticket("en_attente"), now());
        let derived = pipeline.derive(&change);

        assert_eq!(derived.len(), 2);
        assert!(matches!(&derived[0], DerivedRecord::Audit(_)));
        match &derived[1] {
            DerivedRecord::Flow(event) => assert_eq!(event.step, FlowStep::Arrivee),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn audit_log_changes_derive_nothing() {
        let pipeline = DerivationPipeline::standard();
        let change = ChangeSet::created(
            EntityKind::AuditLog,
            "audit-1",
            object(json!({"entity": "Patient"})),
            now(),
        );
        assert!(pipeline.derive(&change).is_empty());
    }

    #[test]
    fn flow_event_changes_are_audited_but_never_flow() {
        let pipeline = DerivationPipeline::standard();
        let change = ChangeSet::deleted(
            EntityKind::PatientFlowEvent,
            "flow-1",
            object(json!({"step": "arrivee"})),
            now(),
        );
        let derived = pipeline.derive(&change);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].kind(), EntityKind::AuditLog);
    }

    #[test]
    fn append_assigns_prefixed_ids() {
        let pipeline = DerivationPipeline::standard();
        let mut document = Document::empty();
        let at = now();
        let change = ChangeSet::created(EntityKind::WaitingQueueTicket, "queue-9", ticket("en_attente"), at);
        let ids = IdGenerator::new();
        let kinds: Vec<EntityKind> = pipeline
            .derive(&change)
            .into_iter()
            .map(|record| record.append_to(&mut document, &ids, at))
            .collect();

        assert_eq!(kinds, vec![EntityKind::AuditLog, EntityKind::PatientFlowEvent]);
        assert!(document.audit_logs[0].id.starts_with("audit-"));
        assert!(document.patient_flow_events[0].id.starts_with("flow-"));
        assert_eq!(document.audit_logs[0].created_at, at);
    }

    #[test]
    fn unchanged_status_is_not_a_change() {
        let change = ChangeSet::updated(
            EntityKind::WaitingQueueTicket,
            "queue-9",
            ticket("appele"),
            ticket("appele"),
            now(),
        );
        assert_eq!(change.changed_status(), None);
    }
}
