use crate::domain::entities::{AiInsight, AiRecommendation};
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedInsights {
    pub resume: String,
    pub insights: Vec<AiInsight>,
    pub recommendations: Vec<AiRecommendation>,
}

/// レポート所見の生成器（LLM 等の外部協調者）
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, context: &Value) -> Result<GeneratedInsights, AppError>;
}
