use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    Consultation,
    Suivi,
    Urgence,
    Controle,
    Vaccination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Planifie,
    Confirme,
    EnCours,
    Termine,
    Annule,
    Absent,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Planifie => "planifie",
            AppointmentStatus::Confirme => "confirme",
            AppointmentStatus::EnCours => "en_cours",
            AppointmentStatus::Termine => "termine",
            AppointmentStatus::Annule => "annule",
            AppointmentStatus::Absent => "absent",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub patient_id: String,
    pub date: String,
    pub heure: String,
    pub duree: u32,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub statut: AppointmentStatus,
    pub motif: String,
}
