use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Homme,
    Femme,
    Autre,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub nom: String,
    pub prenom: String,
    pub date_naissance: String,
    pub genre: Gender,
    pub telephone: String,
    pub email: String,
    pub adresse: String,
    pub groupe_sanguin: String,
    pub allergies: Vec<String>,
    pub notes: String,
    pub numero_assurance: String,
    pub contact_urgence: EmergencyContact,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }
}
