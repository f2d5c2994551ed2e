use crate::application::ports::insight_generator::InsightGenerator;
use crate::application::services::entity_client::EntityHub;
use crate::domain::entities::{
    AiReport, AiReportMetrics, AppointmentStatus, Document, Record, ReportPeriod,
};
use crate::domain::value_objects::now;
use crate::shared::error::AppError;
use chrono::{DateTime, Datelike, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

const FALLBACK_RESUME: &str = "Analyse automatique disponible. Vérifier les tendances de rendez-vous, engagement social et communication TV.";

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

pub fn compute_metrics(document: &Document) -> AiReportMetrics {
    let count_status = |status: AppointmentStatus| {
        document
            .appointments
            .iter()
            .filter(|appointment| appointment.data.statut == status)
            .count() as u64
    };

    AiReportMetrics {
        total_patients: document.patients.len() as u64,
        rdv_total: document.appointments.len() as u64,
        rdv_completes: count_status(AppointmentStatus::Termine),
        rdv_annules: count_status(AppointmentStatus::Annule),
        engagement_social: document
            .social_posts
            .iter()
            .map(|post| post.data.metrics.total())
            .sum(),
        contenus_tv_actifs: document
            .tv_contents
            .iter()
            .filter(|content| content.data.actif)
            .count() as u64,
    }
}

pub fn period_label(period: ReportPeriod, at: DateTime<Utc>) -> String {
    match period {
        ReportPeriod::Hebdo => format!("Semaine du {}", at.format("%d/%m/%Y")),
        ReportPeriod::Mensuel => {
            let month = MONTHS_FR[at.month0() as usize];
            format!("Mois {month} {}", at.year())
        }
    }
}

fn prompt_for(period: ReportPeriod) -> &'static str {
    match period {
        ReportPeriod::Hebdo => {
            "Génère un rapport hebdomadaire IA avec insights prioritaires pour un cabinet médical."
        }
        ReportPeriod::Mensuel => {
            "Génère un rapport mensuel IA avec recommandations d'optimisation pour un cabinet médical."
        }
    }
}

/// 現在のドキュメントから指標を集計し、所見を付けたレポートを作成する
pub struct ReportService {
    hub: EntityHub,
    generator: Arc<dyn InsightGenerator>,
}

impl ReportService {
    pub fn new(hub: EntityHub, generator: Arc<dyn InsightGenerator>) -> Self {
        Self { hub, generator }
    }

    pub async fn generate(&self, period: ReportPeriod) -> Result<Record<AiReport>, AppError> {
        let document = self.hub.store().load().await;
        let metrics = compute_metrics(&document);
        let context = json!({ "metrics": metrics });

        let generated = self.generator.generate(prompt_for(period), &context).await?;
        let generated_at = now();
        let resume = if generated.resume.trim().is_empty() {
            FALLBACK_RESUME.to_string()
        } else {
            generated.resume
        };

        let report = self
            .hub
            .ai_reports()
            .create(AiReport {
                type_periode: period,
                periode_label: period_label(period, generated_at),
                generated_at,
                metrics,
                resume,
                insights: generated.insights,
                recommendations: generated.recommendations,
            })
            .await?;

        info!(report_id = %report.id, "AI report generated");
        Ok(report)
    }
}
