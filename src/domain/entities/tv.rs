use serde::{Deserialize, Serialize};
use std::fmt;

/// コンテンツ・チケットの表示先画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetScreen {
    SalleAttente,
    Accueil,
    Toutes,
}

impl TargetScreen {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetScreen::SalleAttente => "salle_attente",
            TargetScreen::Accueil => "accueil",
            TargetScreen::Toutes => "toutes",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "salle_attente" => Some(TargetScreen::SalleAttente),
            "accueil" => Some(TargetScreen::Accueil),
            "toutes" => Some(TargetScreen::Toutes),
            _ => None,
        }
    }

    /// `toutes` は全画面に表示される
    pub fn shows_on(&self, screen: TargetScreen) -> bool {
        *self == TargetScreen::Toutes || *self == screen
    }
}

impl fmt::Display for TargetScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvContentType {
    Annonce,
    ConseilSante,
    InfoCabinet,
    Video,
    Image,
    MessageDefilant,
}

impl TvContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TvContentType::Annonce => "annonce",
            TvContentType::ConseilSante => "conseil_sante",
            TvContentType::InfoCabinet => "info_cabinet",
            TvContentType::Video => "video",
            TvContentType::Image => "image",
            TvContentType::MessageDefilant => "message_defilant",
        }
    }

    pub fn is_info_slide(&self) -> bool {
        matches!(
            self,
            TvContentType::Annonce | TvContentType::ConseilSante | TvContentType::InfoCabinet
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvAudioLoopMode {
    Playlist,
    Single,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvContent {
    pub titre: String,
    #[serde(rename = "type")]
    pub kind: TvContentType,
    pub duree_affichage: u32,
    pub ordre: i32,
    pub ecran_cible: TargetScreen,
    pub date_debut: String,
    pub date_fin: String,
    pub couleur_fond: String,
    pub media: String,
    pub message: String,
    pub actif: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvAudioTrack {
    pub titre: String,
    pub artiste: String,
    pub ecran_cible: TargetScreen,
    pub ordre: i32,
    pub url: String,
    pub actif: bool,
    pub loop_mode: TvAudioLoopMode,
    pub volume: f64,
}
