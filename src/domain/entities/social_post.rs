use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    Instagram,
    Google,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialStatus {
    Brouillon,
    Planifie,
    Publie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub likes: u64,
    pub commentaires: u64,
    pub partages: u64,
}

impl EngagementMetrics {
    pub fn total(&self) -> u64 {
        self.likes + self.commentaires + self.partages
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub titre: String,
    pub contenu: String,
    pub plateforme: SocialPlatform,
    pub image: String,
    pub statut: SocialStatus,
    pub hashtags: Vec<String>,
    pub date_planification: String,
    pub metrics: EngagementMetrics,
}
