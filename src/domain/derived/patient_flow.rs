use super::{ChangeAction, ChangeSet, DerivationRule, DerivedRecord};
use crate::domain::entities::{
    AppointmentStatus, FlowStep, PatientFlowEvent, QueueTicketStatus, SyncStatus,
};
use crate::domain::value_objects::EntityKind;

#[allow(clippy::too_many_arguments)]
fn flow_event(
    change: &ChangeSet,
    step: FlowStep,
    appointment_id: String,
    queue_ticket_id: String,
    performed_by: &str,
    source_system: &str,
    external_reference: String,
    details: String,
) -> DerivedRecord {
    DerivedRecord::Flow(PatientFlowEvent {
        patient_id: change.after_str("patient_id").unwrap_or_default().to_string(),
        appointment_id,
        queue_ticket_id,
        step,
        occured_at: change.at,
        performed_by: performed_by.to_string(),
        details,
        source_system: source_system.to_string(),
        external_reference,
        // 外部連携の確認応答は持たないので常に synced
        sync_status: SyncStatus::Synced,
    })
}

/// 待合チケットの作成・ステータス遷移を患者動線に変換する
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueFlowRule;

impl QueueFlowRule {
    pub fn step_for(status: QueueTicketStatus) -> Option<FlowStep> {
        match status {
            QueueTicketStatus::Appele => Some(FlowStep::AppelSalle),
            QueueTicketStatus::EnConsultation => Some(FlowStep::ConsultationDebut),
            QueueTicketStatus::Termine => Some(FlowStep::Depart),
            QueueTicketStatus::Absent => Some(FlowStep::Absence),
            QueueTicketStatus::EnAttente => None,
        }
    }
}

impl DerivationRule for QueueFlowRule {
    fn name(&self) -> &'static str {
        "queue_flow"
    }

    fn applies_to(&self, kind: EntityKind) -> bool {
        kind == EntityKind::WaitingQueueTicket
    }

    fn derive(&self, change: &ChangeSet) -> Vec<DerivedRecord> {
        let ticket_number = change.after_str("numeroTicket").unwrap_or_default().to_string();
        let appointment_id = change.after_str("appointment_id").unwrap_or_default().to_string();

        let (step, details) = match change.action {
            ChangeAction::Create => {
                let priority = change.after_str("priorite").unwrap_or("normale");
                (
                    FlowStep::Arrivee,
                    format!("Ticket {ticket_number} enregistré ({priority})"),
                )
            }
            ChangeAction::Update => {
                if change.changed_status().is_none() {
                    return Vec::new();
                }
                let status: Option<QueueTicketStatus> = change.after_field("statut");
                match status.and_then(Self::step_for) {
                    Some(step) => {
                        let label = change.after_str("statut").unwrap_or_default();
                        (step, format!("Ticket {ticket_number} -> {label}"))
                    }
                    None => return Vec::new(),
                }
            }
            ChangeAction::Delete => return Vec::new(),
        };

        vec![flow_event(
            change,
            step,
            appointment_id,
            change.entity_id.clone(),
            "Accueil",
            "TVQueue",
            ticket_number,
            details,
        )]
    }
}

/// 予約ステータスの遷移を患者動線に変換する
#[derive(Debug, Clone, Copy, Default)]
pub struct AppointmentFlowRule;

impl AppointmentFlowRule {
    pub fn step_for(status: AppointmentStatus) -> Option<FlowStep> {
        match status {
            AppointmentStatus::EnCours => Some(FlowStep::ConsultationDebut),
            AppointmentStatus::Termine => Some(FlowStep::ConsultationFin),
            AppointmentStatus::Annule | AppointmentStatus::Absent => Some(FlowStep::Absence),
            AppointmentStatus::Planifie | AppointmentStatus::Confirme => None,
        }
    }
}

impl DerivationRule for AppointmentFlowRule {
    fn name(&self) -> &'static str {
        "appointment_flow"
    }

    fn applies_to(&self, kind: EntityKind) -> bool {
        kind == EntityKind::Appointment
    }

    fn derive(&self, change: &ChangeSet) -> Vec<DerivedRecord> {
        if change.action != ChangeAction::Update || change.changed_status().is_none() {
            return Vec::new();
        }
        let status: Option<AppointmentStatus> = change.after_field("statut");
        let Some(step) = status.and_then(Self::step_for) else {
            return Vec::new();
        };
        let label = change.after_str("statut").unwrap_or_default();

        vec![flow_event(
            change,
            step,
            change.entity_id.clone(),
            String::new(),
            "Cabinet",
            "Appointments",
            change.entity_id.clone(),
            format!("RDV {} -> {label}", change.entity_id),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::now;
    use serde_json::{json, Map, Value};

    fn ticket(statut: &str) -> Map<String, Value> {
        json!({
            "patient_id": "pat-2",
            "appointment_id": "rdv-2",
            "numeroTicket": "A-102",
            "priorite": "prioritaire",
            "statut": statut,
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    fn appointment(statut: &str) -> Map<String, Value> {
        json!({"patient_id": "pat-1", "statut": statut})
            .as_object()
            .cloned()
            .unwrap()
    }

    fn flow(records: Vec<DerivedRecord>) -> Option<PatientFlowEvent> {
        assert!(records.len() <= 1);
        records.into_iter().next().map(|record| match record {
            DerivedRecord::Flow(event) => event,
            other => panic!("expected flow row, got {other:?}"),
        })
    }

    #[test]
    fn ticket_creation_is_an_arrival() {
        let change =
            ChangeSet::created(EntityKind::WaitingQueueTicket, "queue-7", ticket("en_attente"), now());
        let event = flow(QueueFlowRule.derive(&change)).unwrap();

        assert_eq!(event.step, FlowStep::Arrivee);
        assert_eq!(event.patient_id, "pat-2");
        assert_eq!(event.appointment_id, "rdv-2");
        assert_eq!(event.queue_ticket_id, "queue-7");
        assert_eq!(event.performed_by, "Accueil");
        assert_eq!(event.source_system, "TVQueue");
        assert_eq!(event.external_reference, "A-102");
        assert_eq!(event.details, "Ticket A-102 enregistré (prioritaire)");
        assert_eq!(event.sync_status, SyncStatus::Synced);
    }

    #[test]
    fn ticket_transitions_map_to_steps() {
        let cases = [
            ("appele", Some(FlowStep::AppelSalle)),
            ("en_consultation", Some(FlowStep::ConsultationDebut)),
            ("termine", Some(FlowStep::Depart)),
            ("absent", Some(FlowStep::Absence)),
        ];
        for (target, expected) in cases {
            let change = ChangeSet::updated(
                EntityKind::WaitingQueueTicket,
                "queue-7",
                ticket("en_attente"),
                ticket(target),
                now(),
            );
            let event = flow(QueueFlowRule.derive(&change));
            assert_eq!(event.as_ref().map(|e| e.step), expected, "target {target}");
        }

        let back_to_waiting = ChangeSet::updated(
            EntityKind::WaitingQueueTicket,
            "queue-7",
            ticket("appele"),
            ticket("en_attente"),
            now(),
        );
        assert!(QueueFlowRule.derive(&back_to_waiting).is_empty());
    }

    #[test]
    fn ticket_update_details_name_new_status() {
        let change = ChangeSet::updated(
            EntityKind::WaitingQueueTicket,
            "queue-7",
            ticket("en_attente"),
            ticket("appele"),
            now(),
        );
        let event = flow(QueueFlowRule.derive(&change)).unwrap();
        assert_eq!(event.details, "Ticket A-102 -> appele");
    }

    #[test]
    fn same_status_or_other_fields_emit_nothing() {
        let mut after = ticket("appele");
        after.insert("notes".into(), json!("salle 2"));
        let change = ChangeSet::updated(
            EntityKind::WaitingQueueTicket,
            "queue-7",
            ticket("appele"),
            after,
            now(),
        );
        assert!(QueueFlowRule.derive(&change).is_empty());
    }

    #[test]
    fn ticket_delete_emits_nothing() {
        let change =
            ChangeSet::deleted(EntityKind::WaitingQueueTicket, "queue-7", ticket("termine"), now());
        assert!(QueueFlowRule.derive(&change).is_empty());
    }

    #[test]
    fn appointment_transitions_map_to_steps() {
        let cases = [
            ("en_cours", Some(FlowStep::ConsultationDebut)),
            ("termine", Some(FlowStep::ConsultationFin)),
            ("annule", Some(FlowStep::Absence)),
            ("absent", Some(FlowStep::Absence)),
            ("confirme", None),
        ];
        for (target, expected) in cases {
            let change = ChangeSet::updated(
                EntityKind::Appointment,
                "rdv-1",
                appointment("planifie"),
                appointment(target),
                now(),
            );
            let event = flow(AppointmentFlowRule.derive(&change));
            assert_eq!(event.as_ref().map(|e| e.step), expected, "target {target}");
        }
    }

    #[test]
    fn appointment_flow_fields() {
        let change = ChangeSet::updated(
            EntityKind::Appointment,
            "rdv-1",
            appointment("confirme"),
            appointment("termine"),
            now(),
        );
        let event = flow(AppointmentFlowRule.derive(&change)).unwrap();

        assert_eq!(event.patient_id, "pat-1");
        assert_eq!(event.appointment_id, "rdv-1");
        assert_eq!(event.queue_ticket_id, "");
        assert_eq!(event.performed_by, "Cabinet");
        assert_eq!(event.source_system, "Appointments");
        assert_eq!(event.external_reference, "rdv-1");
        assert_eq!(event.details, "RDV rdv-1 -> termine");
    }

    #[test]
    fn appointment_creation_emits_nothing() {
        let change =
            ChangeSet::created(EntityKind::Appointment, "rdv-1", appointment("en_cours"), now());
        assert!(AppointmentFlowRule.derive(&change).is_empty());
    }
}
