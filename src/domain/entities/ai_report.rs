use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightCategory {
    #[serde(rename = "Rendez-vous")]
    RendezVous,
    #[serde(rename = "Réseaux Sociaux")]
    ReseauxSociaux,
    #[serde(rename = "Communication TV")]
    CommunicationTv,
    Gestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightPriority {
    Haute,
    Moyenne,
    Basse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationImpact {
    Eleve,
    Moyen,
    Faible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Hebdo,
    Mensuel,
}

impl ReportPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Hebdo => "Semaine courante",
            ReportPeriod::Mensuel => "Mois courant",
        }
    }
}

/// レポートに埋め込まれる所見（独自IDを持つ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsight {
    pub id: String,
    pub categorie: InsightCategory,
    pub priorite: InsightPriority,
    pub titre: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiRecommendation {
    pub id: String,
    pub titre: String,
    pub impact: RecommendationImpact,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReportMetrics {
    pub total_patients: u64,
    pub rdv_total: u64,
    pub rdv_completes: u64,
    pub rdv_annules: u64,
    pub engagement_social: u64,
    #[serde(rename = "contenusTVActifs")]
    pub contenus_tv_actifs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReport {
    pub type_periode: ReportPeriod,
    pub periode_label: String,
    pub generated_at: DateTime<Utc>,
    pub metrics: AiReportMetrics,
    pub resume: String,
    pub insights: Vec<AiInsight>,
    pub recommendations: Vec<AiRecommendation>,
}
