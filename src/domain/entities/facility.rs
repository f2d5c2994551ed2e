use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Personnel,
    Salle,
    Equipement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Disponible,
    Occupe,
    Maintenance,
    HorsService,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub nom: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub statut: ResourceStatus,
    pub capacite: u32,
    pub planning: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanDeviceType {
    Imprimante,
    Scanner,
    CameraIp,
    Routeur,
    Autre,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanDeviceStatus {
    Online,
    Offline,
    Alerte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanAuthMode {
    ApiKey,
    Oauth2,
    LocalToken,
}

/// LAN 上の機器（プリンタ、スキャナ、IPカメラ等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanDevice {
    pub nom: String,
    #[serde(rename = "type")]
    pub kind: LanDeviceType,
    pub ip_adresse: String,
    pub mac_adresse: String,
    pub statut: LanDeviceStatus,
    pub auth_mode: LanAuthMode,
    pub auth_secret_masked: String,
    pub capabilities: Vec<String>,
    pub stream_url: String,
    pub last_seen_at: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthNetworkStatus {
    Connecte,
    Degrade,
    Deconnecte,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthNetworkLink {
    pub nom: String,
    pub endpoint: String,
    pub protocol: String,
    pub statut: HealthNetworkStatus,
    pub last_sync_at: String,
    pub token_masked: String,
    pub scope: String,
}
