use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// TV同期シグナルの宛先画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncScreen {
    All,
    SalleAttente,
    Accueil,
    Toutes,
}

impl SyncScreen {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncScreen::All => "all",
            SyncScreen::SalleAttente => "salle_attente",
            SyncScreen::Accueil => "accueil",
            SyncScreen::Toutes => "toutes",
        }
    }

    pub fn is_broadcast(&self) -> bool {
        matches!(self, SyncScreen::All | SyncScreen::Toutes)
    }
}

impl fmt::Display for SyncScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncSource {
    Manager,
    System,
}

/// 他コンテキストへ送る「データ変更、再取得せよ」シグナル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSignal {
    pub at: String,
    pub screen: SyncScreen,
    pub source: SyncSource,
}

/// 受信時は各フィールドの欠落を許容してから検証する
#[derive(Debug, Deserialize)]
struct PartialSyncSignal {
    at: Option<String>,
    screen: Option<SyncScreen>,
    source: Option<SyncSource>,
}

impl SyncSignal {
    pub fn new(at: DateTime<Utc>, screen: SyncScreen, source: SyncSource) -> Self {
        Self {
            at: at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            screen,
            source,
        }
    }

    /// 不正なペイロードは `None`（受信側で黙って捨てる）
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let partial: PartialSyncSignal = serde_json::from_str(trimmed).ok()?;
        let at = partial.at.filter(|value| !value.is_empty())?;
        Some(Self {
            at,
            screen: partial.screen?,
            source: partial.source?,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// 指定画面がこのシグナルで再読込すべきか
    pub fn targets(&self, current_screen: &str) -> bool {
        self.screen.is_broadcast() || self.screen.as_str() == current_screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(screen: SyncScreen) -> SyncSignal {
        SyncSignal::new(Utc::now(), screen, SyncSource::System)
    }

    #[test]
    fn waiting_room_accepts_broadcast_and_own_screen() {
        assert!(signal(SyncScreen::All).targets("salle_attente"));
        assert!(signal(SyncScreen::Toutes).targets("salle_attente"));
        assert!(signal(SyncScreen::SalleAttente).targets("salle_attente"));
        assert!(!signal(SyncScreen::Accueil).targets("salle_attente"));
    }

    #[test]
    fn parse_rejects_missing_fields() {
        assert!(SyncSignal::parse(r#"{"screen":"all","source":"system"}"#).is_none());
        assert!(SyncSignal::parse(r#"{"at":"2026-01-01T00:00:00.000Z","source":"system"}"#).is_none());
        assert!(SyncSignal::parse(r#"{"at":"2026-01-01T00:00:00.000Z","screen":"all"}"#).is_none());
        assert!(SyncSignal::parse("not json").is_none());
        assert!(SyncSignal::parse("").is_none());
    }

    #[test]
    fn parse_rejects_unknown_screen() {
        let raw = r#"{"at":"2026-01-01T00:00:00.000Z","screen":"cuisine","source":"system"}"#;
        assert!(SyncSignal::parse(raw).is_none());
    }

    #[test]
    fn parse_accepts_serialized_signal() {
        let original = SyncSignal::new(Utc::now(), SyncScreen::Accueil, SyncSource::Manager);
        let raw = original.to_json().unwrap();
        assert!(raw.contains("\"screen\":\"accueil\""));
        assert!(raw.contains("\"source\":\"manager\""));
        assert_eq!(SyncSignal::parse(&raw), Some(original));
    }
}
