use crate::application::ports::insight_generator::{GeneratedInsights, InsightGenerator};
use crate::domain::entities::{
    AiInsight, AiRecommendation, InsightCategory, InsightPriority, RecommendationImpact,
};
use crate::domain::value_objects::IdGenerator;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// 固定文面を返す生成器。所見・推奨のIDは呼び出しごとに新規発行する
#[derive(Debug, Clone, Copy, Default)]
pub struct MockInsightGenerator {
    ids: IdGenerator,
}

impl MockInsightGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn insight(
        &self,
        categorie: InsightCategory,
        priorite: InsightPriority,
        titre: &str,
        description: &str,
    ) -> AiInsight {
        AiInsight {
            id: self.ids.generate("insight"),
            categorie,
            priorite,
            titre: titre.to_string(),
            description: description.to_string(),
        }
    }

    fn recommendation(
        &self,
        impact: RecommendationImpact,
        titre: &str,
        description: &str,
    ) -> AiRecommendation {
        AiRecommendation {
            id: self.ids.generate("rec"),
            titre: titre.to_string(),
            impact,
            description: description.to_string(),
        }
    }
}

#[async_trait]
impl InsightGenerator for MockInsightGenerator {
    async fn generate(&self, prompt: &str, context: &Value) -> Result<GeneratedInsights, AppError> {
        debug!(
            prompt_len = prompt.len(),
            has_metrics = context.get("metrics").is_some(),
            "mock insight generation"
        );

        Ok(GeneratedInsights {
            resume: "Les confirmations de rendez-vous progressent, mais les annulations de dernière minute restent à réduire. Les contenus TV éducatifs soutiennent la fidélisation.".into(),
            insights: vec![
                self.insight(
                    InsightCategory::RendezVous,
                    InsightPriority::Haute,
                    "Annulations tardives sur créneau 17h-19h",
                    "Un rappel H-2 personnalisé permettrait de réduire les absences de fin de journée.",
                ),
                self.insight(
                    InsightCategory::ReseauxSociaux,
                    InsightPriority::Moyenne,
                    "Posts éducatifs plus engageants",
                    "Les conseils santé courts obtiennent plus de partages que les annonces génériques.",
                ),
                self.insight(
                    InsightCategory::CommunicationTv,
                    InsightPriority::Basse,
                    "Message défilant efficace à l'accueil",
                    "Les consignes administratives affichées réduisent les questions répétitives.",
                ),
            ],
            recommendations: vec![
                self.recommendation(
                    RecommendationImpact::Eleve,
                    "Activer une relance automatique J-1",
                    "Coupler SMS et email pour les rendez-vous à forte valeur clinique.",
                ),
                self.recommendation(
                    RecommendationImpact::Moyen,
                    "Planifier 3 posts prévention par semaine",
                    "Rythme éditorial stable pour consolider la visibilité locale.",
                ),
                self.recommendation(
                    RecommendationImpact::Faible,
                    "Standardiser les slides TV d'information",
                    "Structurer les messages: accueil, préparation dossier, conseils de suivi.",
                ),
            ],
        })
    }
}
