use crate::domain::entities::TargetScreen;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 待合チケットのライフサイクル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueTicketStatus {
    EnAttente,
    Appele,
    EnConsultation,
    Termine,
    Absent,
}

impl QueueTicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueTicketStatus::EnAttente => "en_attente",
            QueueTicketStatus::Appele => "appele",
            QueueTicketStatus::EnConsultation => "en_consultation",
            QueueTicketStatus::Termine => "termine",
            QueueTicketStatus::Absent => "absent",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, QueueTicketStatus::Termine | QueueTicketStatus::Absent)
    }
}

impl fmt::Display for QueueTicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueTicketPriority {
    Normale,
    Prioritaire,
    Urgence,
}

impl QueueTicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueTicketPriority::Normale => "normale",
            QueueTicketPriority::Prioritaire => "prioritaire",
            QueueTicketPriority::Urgence => "urgence",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingQueueTicket {
    #[serde(rename = "patient_id")]
    pub patient_id: String,
    #[serde(
        rename = "appointment_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub appointment_id: Option<String>,
    pub numero_ticket: String,
    pub ecran_cible: TargetScreen,
    pub statut: QueueTicketStatus,
    pub priorite: QueueTicketPriority,
    pub heure_arrivee: String,
    pub heure_appel: String,
    pub heure_consultation: String,
    pub heure_sortie: String,
    pub notes: String,
}
