use serde::{Deserialize, Serialize};
use std::fmt;

/// ドキュメントが保持するエンティティ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Patient,
    Appointment,
    SocialPost,
    #[serde(rename = "TVContent")]
    TvContent,
    #[serde(rename = "TVAudioTrack")]
    TvAudioTrack,
    WaitingQueueTicket,
    PatientFlowEvent,
    AuditLog,
    Resource,
    LanDevice,
    HealthNetworkLink,
    Lead,
    DoctorProfile,
    #[serde(rename = "AIReport")]
    AiReport,
}

impl EntityKind {
    pub const ALL: [EntityKind; 14] = [
        EntityKind::Patient,
        EntityKind::Appointment,
        EntityKind::SocialPost,
        EntityKind::TvContent,
        EntityKind::TvAudioTrack,
        EntityKind::WaitingQueueTicket,
        EntityKind::PatientFlowEvent,
        EntityKind::AuditLog,
        EntityKind::Resource,
        EntityKind::LanDevice,
        EntityKind::HealthNetworkLink,
        EntityKind::Lead,
        EntityKind::DoctorProfile,
        EntityKind::AiReport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Patient => "Patient",
            EntityKind::Appointment => "Appointment",
            EntityKind::SocialPost => "SocialPost",
            EntityKind::TvContent => "TVContent",
            EntityKind::TvAudioTrack => "TVAudioTrack",
            EntityKind::WaitingQueueTicket => "WaitingQueueTicket",
            EntityKind::PatientFlowEvent => "PatientFlowEvent",
            EntityKind::AuditLog => "AuditLog",
            EntityKind::Resource => "Resource",
            EntityKind::LanDevice => "LanDevice",
            EntityKind::HealthNetworkLink => "HealthNetworkLink",
            EntityKind::Lead => "Lead",
            EntityKind::DoctorProfile => "DoctorProfile",
            EntityKind::AiReport => "AIReport",
        }
    }

    /// 生成IDの接頭辞（種別名の小文字）
    pub fn id_prefix(&self) -> String {
        self.as_str().to_lowercase()
    }

    /// 待合室TVの再描画が必要な種別か
    pub fn is_display_relevant(&self) -> bool {
        matches!(
            self,
            EntityKind::TvContent
                | EntityKind::TvAudioTrack
                | EntityKind::WaitingQueueTicket
                | EntityKind::Patient
        )
    }

    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_document_keys() {
        for kind in EntityKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(EntityKind::parse("tvcontent"), Some(EntityKind::TvContent));
        assert_eq!(EntityKind::parse(" AIReport "), Some(EntityKind::AiReport));
        assert_eq!(EntityKind::parse("Invoice"), None);
    }

    #[test]
    fn display_relevant_kinds() {
        let relevant: Vec<_> = EntityKind::ALL
            .iter()
            .filter(|kind| kind.is_display_relevant())
            .collect();
        assert_eq!(relevant.len(), 4);
        assert!(!EntityKind::AuditLog.is_display_relevant());
    }
}
