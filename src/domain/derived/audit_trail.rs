use super::{ChangeAction, ChangeSet, DerivationRule, DerivedRecord};
use crate::domain::entities::{AuditAction, AuditLog, ComplianceTag};
use crate::domain::value_objects::EntityKind;

const SYSTEM_ACTOR: &str = "system";

/// AuditLog 以外のすべての変更に1行の監査ログを付ける
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditTrailRule;

impl AuditTrailRule {
    fn summary(change: &ChangeSet) -> String {
        let verb = match change.action {
            ChangeAction::Create => "Création",
            ChangeAction::Update => "Mise à jour",
            ChangeAction::Delete => "Suppression",
        };
        format!("{verb} {}", change.kind)
    }
}

impl DerivationRule for AuditTrailRule {
    fn name(&self) -> &'static str {
        "audit_trail"
    }

    fn applies_to(&self, kind: EntityKind) -> bool {
        // 監査ログ自身の変更は監査しない（再帰防止）
        kind != EntityKind::AuditLog
    }

    fn derive(&self, change: &ChangeSet) -> Vec<DerivedRecord> {
        let action = match change.action {
            ChangeAction::Create => AuditAction::Create,
            ChangeAction::Update => AuditAction::Update,
            ChangeAction::Delete => AuditAction::Delete,
        };

        vec![DerivedRecord::Audit(AuditLog {
            entity: change.kind.as_str().to_string(),
            entity_id: change.entity_id.clone(),
            action,
            actor: SYSTEM_ACTOR.to_string(),
            timestamp: change.at,
            changes_summary: Self::summary(change),
            before: change.before.clone(),
            after: change.after.clone(),
            compliance_tag: ComplianceTag::Interne,
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::now;
    use serde_json::{json, Map, Value};

    fn snapshot(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn only_audit(records: Vec<DerivedRecord>) -> AuditLog {
        assert_eq!(records.len(), 1);
        match records.into_iter().next() {
            Some(DerivedRecord::Audit(log)) => log,
            other => panic!("expected audit row, got {other:?}"),
        }
    }

    #[test]
    fn create_has_no_before_snapshot() {
        let at = now();
        let change = ChangeSet::created(
            EntityKind::Patient,
            "patient-1",
            snapshot(json!({"nom": "Amrani"})),
            at,
        );
        let log = only_audit(AuditTrailRule.derive(&change));

        assert_eq!(log.entity, "Patient");
        assert_eq!(log.entity_id, "patient-1");
        assert_eq!(log.action, AuditAction::Create);
        assert_eq!(log.actor, "system");
        assert_eq!(log.timestamp, at);
        assert_eq!(log.changes_summary, "Création Patient");
        assert!(log.before.is_none());
        assert_eq!(log.after.unwrap()["nom"], "Amrani");
        assert_eq!(log.compliance_tag, ComplianceTag::Interne);
    }

    #[test]
    fn delete_has_no_after_snapshot() {
        let change = ChangeSet::deleted(
            EntityKind::TvContent,
            "tvcontent-1",
            snapshot(json!({"titre": "Accueil"})),
            now(),
        );
        let log = only_audit(AuditTrailRule.derive(&change));

        assert_eq!(log.action, AuditAction::Delete);
        assert_eq!(log.changes_summary, "Suppression TVContent");
        assert!(log.after.is_none());
        assert!(log.before.is_some());
    }

    #[test]
    fn update_keeps_both_snapshots() {
        let change = ChangeSet::updated(
            EntityKind::Lead,
            "lead-1",
            snapshot(json!({"status": "nouveau"})),
            snapshot(json!({"status": "contacte"})),
            now(),
        );
        let log = only_audit(AuditTrailRule.derive(&change));

        assert_eq!(log.changes_summary, "Mise à jour Lead");
        assert_eq!(log.before.unwrap()["status"], "nouveau");
        assert_eq!(log.after.unwrap()["status"], "contacte");
    }

    #[test]
    fn audit_log_kind_is_exempt() {
        assert!(!AuditTrailRule.applies_to(EntityKind::AuditLog));
        assert!(AuditTrailRule.applies_to(EntityKind::PatientFlowEvent));
    }
}
