use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Nouveau,
    Contacte,
    Converti,
    Archive,
}

/// ランディングページからの予約リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub full_name: String,
    pub telephone: String,
    pub email: String,
    pub message: String,
    pub source: String,
    pub requested_date: String,
    pub requested_service: String,
    pub status: LeadStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub nom: String,
    pub specialite: String,
    pub bio: String,
    pub photo: String,
    pub telephone: String,
    pub email: String,
    pub adresse: String,
    pub horaires: String,
    pub instagram_handle: String,
    pub instagram_followers: u64,
    pub google_business_url: String,
    pub google_rating: f64,
    pub google_reviews: u64,
    pub site_web: String,
}
