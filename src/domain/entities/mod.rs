pub mod ai_report;
pub mod appointment;
pub mod audit;
pub mod document;
pub mod facility;
pub mod flow;
pub mod patient;
pub mod practice;
pub mod queue;
pub mod record;
pub mod social_post;
pub mod tv;

pub use ai_report::{
    AiInsight, AiRecommendation, AiReport, AiReportMetrics, InsightCategory, InsightPriority,
    RecommendationImpact, ReportPeriod,
};
pub use appointment::{Appointment, AppointmentStatus, AppointmentType};
pub use audit::{AuditAction, AuditLog, ComplianceTag};
pub use document::{Document, RawDocument};
pub use facility::{
    HealthNetworkLink, HealthNetworkStatus, LanAuthMode, LanDevice, LanDeviceStatus,
    LanDeviceType, Resource, ResourceStatus, ResourceType,
};
pub use flow::{FlowStep, PatientFlowEvent, SyncStatus};
pub use patient::{EmergencyContact, Gender, Patient};
pub use practice::{DoctorProfile, Lead, LeadStatus};
pub use queue::{QueueTicketPriority, QueueTicketStatus, WaitingQueueTicket};
pub use record::{Entity, Record};
pub use social_post::{EngagementMetrics, SocialPlatform, SocialPost, SocialStatus};
pub use tv::{TargetScreen, TvAudioLoopMode, TvAudioTrack, TvContent, TvContentType};
