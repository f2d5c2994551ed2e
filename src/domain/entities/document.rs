use crate::domain::entities::{
    AiReport, Appointment, AuditLog, DoctorProfile, Entity, HealthNetworkLink, LanDevice, Lead,
    Patient, PatientFlowEvent, Record, Resource, SocialPost, TvAudioTrack, TvContent,
    WaitingQueueTicket,
};
use crate::domain::value_objects::EntityKind;
use serde::{Deserialize, Serialize};

macro_rules! document_collections {
    ($( $field:ident : $ty:ty => $kind:ident, $key:literal; )*) => {
        /// 全コレクションを保持する単一のルート集約。キーは常に14種すべて揃う
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct Document {
            $(
                #[serde(rename = $key)]
                pub $field: Vec<Record<$ty>>,
            )*
        }

        /// 永続化された（旧スキーマ含む）ドキュメント。欠けたキーは `None`
        #[derive(Debug, Default, Deserialize)]
        pub struct RawDocument {
            $(
                #[serde(rename = $key, default)]
                pub $field: Option<Vec<Record<$ty>>>,
            )*
        }

        impl RawDocument {
            /// 欠けたキーを空配列ではなくシード値で埋める
            pub fn normalize(self, seed: Document) -> Document {
                Document {
                    $( $field: self.$field.unwrap_or(seed.$field), )*
                }
            }

            fn into_complete(self) -> Document {
                Document {
                    $( $field: self.$field.unwrap_or_default(), )*
                }
            }

            pub fn missing_kinds(&self) -> Vec<EntityKind> {
                let mut missing = Vec::new();
                $(
                    if self.$field.is_none() {
                        missing.push(EntityKind::$kind);
                    }
                )*
                missing
            }
        }

        impl Document {
            pub fn len_of(&self, kind: EntityKind) -> usize {
                match kind {
                    $( EntityKind::$kind => self.$field.len(), )*
                }
            }
        }

        $(
            impl Entity for $ty {
                const KIND: EntityKind = EntityKind::$kind;

                fn collection(document: &Document) -> &Vec<Record<Self>> {
                    &document.$field
                }

                fn collection_mut(document: &mut Document) -> &mut Vec<Record<Self>> {
                    &mut document.$field
                }
            }
        )*
    };
}

document_collections! {
    patients: Patient => Patient, "Patient";
    appointments: Appointment => Appointment, "Appointment";
    social_posts: SocialPost => SocialPost, "SocialPost";
    tv_contents: TvContent => TvContent, "TVContent";
    tv_audio_tracks: TvAudioTrack => TvAudioTrack, "TVAudioTrack";
    waiting_queue_tickets: WaitingQueueTicket => WaitingQueueTicket, "WaitingQueueTicket";
    patient_flow_events: PatientFlowEvent => PatientFlowEvent, "PatientFlowEvent";
    audit_logs: AuditLog => AuditLog, "AuditLog";
    resources: Resource => Resource, "Resource";
    lan_devices: LanDevice => LanDevice, "LanDevice";
    health_network_links: HealthNetworkLink => HealthNetworkLink, "HealthNetworkLink";
    leads: Lead => Lead, "Lead";
    doctor_profiles: DoctorProfile => DoctorProfile, "DoctorProfile";
    ai_reports: AiReport => AiReport, "AIReport";
}

impl Document {
    /// 全コレクションが空のドキュメント（テスト・インポート用）
    pub fn empty() -> Self {
        RawDocument::default().into_complete()
    }
}
