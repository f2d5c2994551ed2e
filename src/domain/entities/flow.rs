use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 患者動線のステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    Arrivee,
    AppelSalle,
    ConsultationDebut,
    ConsultationFin,
    Depart,
    Absence,
}

impl FlowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStep::Arrivee => "arrivee",
            FlowStep::AppelSalle => "appel_salle",
            FlowStep::ConsultationDebut => "consultation_debut",
            FlowStep::ConsultationFin => "consultation_fin",
            FlowStep::Depart => "depart",
            FlowStep::Absence => "absence",
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// 外部システムへの送達確認は未実装のため常に Synced で記録する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Synced,
    Pending,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFlowEvent {
    #[serde(rename = "patient_id")]
    pub patient_id: String,
    #[serde(rename = "appointment_id")]
    pub appointment_id: String,
    #[serde(rename = "queue_ticket_id")]
    pub queue_ticket_id: String,
    pub step: FlowStep,
    pub occured_at: DateTime<Utc>,
    pub performed_by: String,
    pub details: String,
    pub source_system: String,
    pub external_reference: String,
    pub sync_status: SyncStatus,
}
