//! 初回起動・破損時に投入するデモデータセット。

use crate::domain::entities::*;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::{json, Map, Value};

fn id(prefix: &str, index: u32) -> String {
    format!("{prefix}-{index}")
}

fn day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn at_time(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    date.and_hms_opt(hour, minute, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN).and_utc())
}

fn snapshot(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

pub fn demo_document(now: DateTime<Utc>) -> Document {
    let today = now.date_naive();
    let today_str = day(today);
    let tomorrow = day(today + Duration::days(1));
    let plus2 = day(today + Duration::days(2));
    let plus7 = day(today + Duration::days(7));
    let plus30 = day(today + Duration::days(30));
    let arrival = |hour: u32, minute: u32| {
        at_time(today, hour, minute).to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    };

    Document {
        patients: vec![
            Record::new(
                id("pat", 1),
                now,
                Patient {
                    nom: "El Mansouri".into(),
                    prenom: "Sara".into(),
                    date_naissance: "1989-03-17".into(),
                    genre: Gender::Femme,
                    telephone: "+212600120120".into(),
                    email: "sara.elmansouri@example.com".into(),
                    adresse: "12 Rue Atlas, Casablanca".into(),
                    groupe_sanguin: "A+".into(),
                    allergies: vec!["Pénicilline".into()],
                    notes: "Suivi thyroïde trimestriel.".into(),
                    numero_assurance: "CNSS-4589102".into(),
                    contact_urgence: EmergencyContact {
                        name: "Yassine El Mansouri".into(),
                        phone: "+212600900111".into(),
                        relation: "Conjoint".into(),
                    },
                },
            ),
            Record::new(
                id("pat", 2),
                now,
                Patient {
                    nom: "Benhaddou".into(),
                    prenom: "Omar".into(),
                    date_naissance: "1976-11-22".into(),
                    genre: Gender::Homme,
                    telephone: "+212611002233".into(),
                    email: "omar.benhaddou@example.com".into(),
                    adresse: "3 Avenue Hassan II, Rabat".into(),
                    groupe_sanguin: "O-".into(),
                    allergies: vec!["Arachide".into()],
                    notes: "Diabète type 2, contrôle glycémie.".into(),
                    numero_assurance: "CNOPS-772019".into(),
                    contact_urgence: EmergencyContact {
                        name: "Nadia Benhaddou".into(),
                        phone: "+212611009988".into(),
                        relation: "Épouse".into(),
                    },
                },
            ),
            Record::new(
                id("pat", 3),
                now,
                Patient {
                    nom: "Amrani".into(),
                    prenom: "Lina".into(),
                    date_naissance: "2001-06-05".into(),
                    genre: Gender::Femme,
                    telephone: "+212620335577".into(),
                    email: "lina.amrani@example.com".into(),
                    adresse: "45 Bd Zerktouni, Casablanca".into(),
                    groupe_sanguin: "B+".into(),
                    allergies: Vec::new(),
                    notes: "Vaccination à mettre à jour.".into(),
                    numero_assurance: "AMO-229044".into(),
                    contact_urgence: EmergencyContact {
                        name: "Khadija Amrani".into(),
                        phone: "+212620300100".into(),
                        relation: "Mère".into(),
                    },
                },
            ),
        ],
        appointments: vec![
            Record::new(
                id("rdv", 1),
                now,
                Appointment {
                    patient_id: id("pat", 1),
                    date: today_str.clone(),
                    heure: "09:00".into(),
                    duree: 30,
                    kind: AppointmentType::Suivi,
                    statut: AppointmentStatus::Confirme,
                    motif: "Suivi hormonal".into(),
                },
            ),
            Record::new(
                id("rdv", 2),
                now,
                Appointment {
                    patient_id: id("pat", 2),
                    date: today_str.clone(),
                    heure: "11:15".into(),
                    duree: 20,
                    kind: AppointmentType::Controle,
                    statut: AppointmentStatus::Planifie,
                    motif: "Contrôle glycémie".into(),
                },
            ),
            Record::new(
                id("rdv", 3),
                now,
                Appointment {
                    patient_id: id("pat", 3),
                    date: tomorrow,
                    heure: "14:00".into(),
                    duree: 25,
                    kind: AppointmentType::Vaccination,
                    statut: AppointmentStatus::Planifie,
                    motif: "Rappel vaccin".into(),
                },
            ),
            Record::new(
                id("rdv", 4),
                now,
                Appointment {
                    patient_id: id("pat", 1),
                    date: plus2.clone(),
                    heure: "16:30".into(),
                    duree: 40,
                    kind: AppointmentType::Consultation,
                    statut: AppointmentStatus::Planifie,
                    motif: "Consultation générale".into(),
                },
            ),
        ],
        social_posts: vec![
            Record::new(
                id("post", 1),
                now,
                SocialPost {
                    titre: "Hydratation en hiver".into(),
                    contenu: "Pensez à boire régulièrement même sans sensation de soif. Une bonne hydratation soutient votre immunité.".into(),
                    plateforme: SocialPlatform::Both,
                    image: "https://images.unsplash.com/photo-1505751172876-fa1923c5c528".into(),
                    statut: SocialStatus::Publie,
                    hashtags: vec!["#Santé".into(), "#CabinetMedical".into(), "#Prévention".into()],
                    date_planification: today_str.clone(),
                    metrics: EngagementMetrics { likes: 120, commentaires: 18, partages: 24 },
                },
            ),
            Record::new(
                id("post", 2),
                now,
                SocialPost {
                    titre: "Check-up annuel".into(),
                    contenu: "Un bilan annuel permet une détection précoce et un meilleur suivi de votre état de santé.".into(),
                    plateforme: SocialPlatform::Instagram,
                    image: String::new(),
                    statut: SocialStatus::Planifie,
                    hashtags: vec!["#Bilan".into(), "#SantéPréventive".into()],
                    date_planification: plus2.clone(),
                    metrics: EngagementMetrics::default(),
                },
            ),
        ],
        tv_contents: vec![
            Record::new(
                id("tv", 1),
                now,
                TvContent {
                    titre: "Bienvenue au cabinet".into(),
                    kind: TvContentType::Annonce,
                    duree_affichage: 8,
                    ordre: 1,
                    ecran_cible: TargetScreen::Toutes,
                    date_debut: today_str.clone(),
                    date_fin: plus7.clone(),
                    couleur_fond: "#0f172a".into(),
                    media: String::new(),
                    message: "Merci de préparer votre carte d'assurance avant votre passage à l'accueil.".into(),
                    actif: true,
                },
            ),
            Record::new(
                id("tv", 2),
                now,
                TvContent {
                    titre: "Conseil du jour".into(),
                    kind: TvContentType::ConseilSante,
                    duree_affichage: 12,
                    ordre: 2,
                    ecran_cible: TargetScreen::SalleAttente,
                    date_debut: today_str.clone(),
                    date_fin: plus7.clone(),
                    couleur_fond: "#1e293b".into(),
                    media: "https://images.unsplash.com/photo-1576091160550-2173dba999ef".into(),
                    message: "Lavez-vous les mains pendant 20 secondes pour limiter les infections saisonnières.".into(),
                    actif: true,
                },
            ),
            Record::new(
                id("tv", 3),
                now,
                TvContent {
                    titre: "Message défilant".into(),
                    kind: TvContentType::MessageDefilant,
                    duree_affichage: 10,
                    ordre: 3,
                    ecran_cible: TargetScreen::Toutes,
                    date_debut: today_str.clone(),
                    date_fin: plus7,
                    couleur_fond: "#f59e0b".into(),
                    media: String::new(),
                    message: "Nouveaux créneaux de vaccination disponibles chaque mercredi matin.".into(),
                    actif: true,
                },
            ),
            Record::new(
                id("tv", 4),
                now,
                TvContent {
                    titre: "Logo cabinet".into(),
                    kind: TvContentType::Image,
                    duree_affichage: 10,
                    ordre: 4,
                    ecran_cible: TargetScreen::SalleAttente,
                    date_debut: today_str.clone(),
                    date_fin: plus30,
                    couleur_fond: "#220424".into(),
                    media: "/logo-cabinet.svg".into(),
                    message: "Dr Basma Oumalloul - Gynécologue Obstétricienne".into(),
                    actif: true,
                },
            ),
        ],
        tv_audio_tracks: vec![Record::new(
            id("audio", 1),
            now,
            TvAudioTrack {
                titre: "Ambiance douce cabinet".into(),
                artiste: "Playlist attente".into(),
                ecran_cible: TargetScreen::SalleAttente,
                ordre: 1,
                url: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3".into(),
                actif: true,
                loop_mode: TvAudioLoopMode::Playlist,
                volume: 0.7,
            },
        )],
        waiting_queue_tickets: vec![
            Record::new(
                id("queue", 1),
                now,
                WaitingQueueTicket {
                    patient_id: id("pat", 1),
                    appointment_id: Some(id("rdv", 1)),
                    numero_ticket: "A-101".into(),
                    ecran_cible: TargetScreen::SalleAttente,
                    statut: QueueTicketStatus::Appele,
                    priorite: QueueTicketPriority::Normale,
                    heure_arrivee: arrival(8, 40),
                    heure_appel: arrival(9, 2),
                    heure_consultation: String::new(),
                    heure_sortie: String::new(),
                    notes: "Patiente prioritaire suivi grossesse".into(),
                },
            ),
            Record::new(
                id("queue", 2),
                now,
                WaitingQueueTicket {
                    patient_id: id("pat", 2),
                    appointment_id: Some(id("rdv", 2)),
                    numero_ticket: "A-102".into(),
                    ecran_cible: TargetScreen::SalleAttente,
                    statut: QueueTicketStatus::EnAttente,
                    priorite: QueueTicketPriority::Normale,
                    heure_arrivee: arrival(10, 56),
                    heure_appel: String::new(),
                    heure_consultation: String::new(),
                    heure_sortie: String::new(),
                    notes: String::new(),
                },
            ),
            Record::new(
                id("queue", 3),
                now,
                WaitingQueueTicket {
                    patient_id: id("pat", 3),
                    appointment_id: Some(id("rdv", 3)),
                    numero_ticket: "P-007".into(),
                    ecran_cible: TargetScreen::Accueil,
                    statut: QueueTicketStatus::EnAttente,
                    priorite: QueueTicketPriority::Prioritaire,
                    heure_arrivee: arrival(11, 10),
                    heure_appel: String::new(),
                    heure_consultation: String::new(),
                    heure_sortie: String::new(),
                    notes: "Assistance administrative dossier".into(),
                },
            ),
        ],
        patient_flow_events: vec![
            Record::new(
                id("flow", 1),
                now,
                PatientFlowEvent {
                    patient_id: id("pat", 1),
                    appointment_id: id("rdv", 1),
                    queue_ticket_id: id("queue", 1),
                    step: FlowStep::Arrivee,
                    occured_at: at_time(today, 8, 40),
                    performed_by: "Accueil".into(),
                    details: "Patient enregistré à l'accueil".into(),
                    source_system: "ReceptionDesk".into(),
                    external_reference: "ARR-10001".into(),
                    sync_status: SyncStatus::Synced,
                },
            ),
            Record::new(
                id("flow", 2),
                now,
                PatientFlowEvent {
                    patient_id: id("pat", 1),
                    appointment_id: id("rdv", 1),
                    queue_ticket_id: id("queue", 1),
                    step: FlowStep::AppelSalle,
                    occured_at: at_time(today, 9, 2),
                    performed_by: "Infirmière".into(),
                    details: "Patient appelée vers salle 2".into(),
                    source_system: "TVQueue".into(),
                    external_reference: "CALL-10001".into(),
                    sync_status: SyncStatus::Synced,
                },
            ),
        ],
        audit_logs: vec![
            Record::new(
                id("audit", 1),
                now,
                AuditLog {
                    entity: "Patient".into(),
                    entity_id: id("pat", 1),
                    action: AuditAction::Update,
                    actor: "admin@cabinet".into(),
                    timestamp: now,
                    changes_summary: "Mise à jour note patient".into(),
                    before: snapshot(json!({ "notes": "Suivi trimestriel." })),
                    after: snapshot(json!({ "notes": "Suivi thyroïde trimestriel." })),
                    compliance_tag: ComplianceTag::Cndp,
                },
            ),
            Record::new(
                id("audit", 2),
                now,
                AuditLog {
                    entity: "TVContent".into(),
                    entity_id: id("tv", 1),
                    action: AuditAction::Manual,
                    actor: "assistant".into(),
                    timestamp: now,
                    changes_summary: "Diffusion message accueil validée".into(),
                    before: None,
                    after: snapshot(json!({ "actif": true })),
                    compliance_tag: ComplianceTag::Interne,
                },
            ),
        ],
        resources: vec![
            Record::new(
                id("res", 1),
                now,
                Resource {
                    nom: "Dr Basma Oumalloul".into(),
                    kind: ResourceType::Personnel,
                    statut: ResourceStatus::Occupe,
                    capacite: 1,
                    planning: "08:30 - 17:30".into(),
                    notes: "Consultations gynécologie".into(),
                },
            ),
            Record::new(
                id("res", 2),
                now,
                Resource {
                    nom: "Salle consultation 1".into(),
                    kind: ResourceType::Salle,
                    statut: ResourceStatus::Disponible,
                    capacite: 1,
                    planning: "Disponible".into(),
                    notes: "Échographie 2D/3D/4D".into(),
                },
            ),
            Record::new(
                id("res", 3),
                now,
                Resource {
                    nom: "Salle attente principale".into(),
                    kind: ResourceType::Salle,
                    statut: ResourceStatus::Occupe,
                    capacite: 15,
                    planning: "Ouverte 08:00 - 19:00".into(),
                    notes: "TV info patients".into(),
                },
            ),
        ],
        lan_devices: vec![
            Record::new(
                id("lan", 1),
                now,
                LanDevice {
                    nom: "HP LaserJet Ordonnances".into(),
                    kind: LanDeviceType::Imprimante,
                    ip_adresse: "192.168.1.35".into(),
                    mac_adresse: "00:1A:11:2B:3C:4D".into(),
                    statut: LanDeviceStatus::Online,
                    auth_mode: LanAuthMode::LocalToken,
                    auth_secret_masked: "tok_****_print".into(),
                    capabilities: vec!["print_a4".into(), "print_ordonnance".into(), "duplex".into()],
                    stream_url: String::new(),
                    last_seen_at: now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    notes: "Impression ordonnances et reçus".into(),
                },
            ),
            Record::new(
                id("lan", 2),
                now,
                LanDevice {
                    nom: "Caméra accueil".into(),
                    kind: LanDeviceType::CameraIp,
                    ip_adresse: "192.168.1.70".into(),
                    mac_adresse: "00:1A:11:2B:3C:4F".into(),
                    statut: LanDeviceStatus::Online,
                    auth_mode: LanAuthMode::Oauth2,
                    auth_secret_masked: "oauth_****_cam".into(),
                    capabilities: vec!["rtsp_stream".into(), "motion_detection".into()],
                    stream_url: "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerJoyrides.mp4".into(),
                    last_seen_at: now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    notes: "Stream vidéo zone accueil".into(),
                },
            ),
        ],
        health_network_links: vec![
            Record::new(
                id("hnet", 1),
                now,
                HealthNetworkLink {
                    nom: "DMP régional".into(),
                    endpoint: "https://api.dmp-regional.ma/v1".into(),
                    protocol: "FHIR/REST".into(),
                    statut: HealthNetworkStatus::Connecte,
                    last_sync_at: now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    token_masked: "dmp_****_prod".into(),
                    scope: "patient.read appointment.read".into(),
                },
            ),
            Record::new(
                id("hnet", 2),
                now,
                HealthNetworkLink {
                    nom: "Assurance CNSS".into(),
                    endpoint: "https://api.cnss.example/claims".into(),
                    protocol: "REST".into(),
                    statut: HealthNetworkStatus::Degrade,
                    last_sync_at: now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    token_masked: "cnss_****_prod".into(),
                    scope: "insurance.verify".into(),
                },
            ),
        ],
        leads: vec![Record::new(
            id("lead", 1),
            now,
            Lead {
                full_name: "Imane Belhaj".into(),
                telephone: "+212661112233".into(),
                email: "imane@example.com".into(),
                message: "Besoin d'un RDV suivi grossesse.".into(),
                source: "landing".into(),
                requested_date: plus2,
                requested_service: "Suivi de grossesse".into(),
                status: LeadStatus::Nouveau,
            },
        )],
        doctor_profiles: vec![Record::new(
            id("doc", 1),
            now,
            DoctorProfile {
                nom: "Dr Basma Oumalloul".into(),
                specialite: "Gynécologue - Obstétricienne".into(),
                bio: "Suivi de grossesse, accouchement, chirurgie gynécologique et échographie 2D/3D/4D.".into(),
                photo: "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d".into(),
                telephone: "+212661686070".into(),
                email: "contact@drbasma.ma".into(),
                adresse: "Centre d'affaire Al Baraka, Bd Allal Al Fassi, Marrakech".into(),
                horaires: "Lun-Sam 09:00-19:00".into(),
                instagram_handle: "dr.basma.oumalloul".into(),
                instagram_followers: 5240,
                google_business_url: "https://maps.google.com/?q=Dr+Basma+Oumalloul".into(),
                google_rating: 4.9,
                google_reviews: 210,
                site_web: "https://cabinet-basma.example.com".into(),
            },
        )],
        ai_reports: vec![Record::new(
            id("report", 1),
            now,
            AiReport {
                type_periode: ReportPeriod::Hebdo,
                periode_label: ReportPeriod::Hebdo.label().into(),
                generated_at: now,
                metrics: AiReportMetrics {
                    total_patients: 3,
                    rdv_total: 4,
                    rdv_completes: 1,
                    rdv_annules: 0,
                    engagement_social: 162,
                    contenus_tv_actifs: 4,
                },
                resume: "Tendance positive sur l'engagement social. Optimisation possible des confirmations de rendez-vous.".into(),
                insights: vec![
                    AiInsight {
                        id: id("insight", 1),
                        categorie: InsightCategory::RendezVous,
                        priorite: InsightPriority::Haute,
                        titre: "Pic d'absences à anticiper".into(),
                        description: "Ajouter un rappel H-24 pourrait réduire les absences du créneau du matin.".into(),
                    },
                    AiInsight {
                        id: id("insight", 2),
                        categorie: InsightCategory::ReseauxSociaux,
                        priorite: InsightPriority::Moyenne,
                        titre: "Contenu prévention performant".into(),
                        description: "Les publications éducatives ont généré plus d'interactions que les annonces de service.".into(),
                    },
                ],
                recommendations: vec![AiRecommendation {
                    id: id("rec", 1),
                    titre: "Automatiser les rappels SMS".into(),
                    impact: RecommendationImpact::Eleve,
                    description: "Planifier des rappels J-1 et H-2 pour améliorer le taux de présence.".into(),
                }],
            },
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{now, EntityKind};

    #[test]
    fn seed_covers_every_entity_kind() {
        let document = demo_document(now());
        for kind in EntityKind::ALL {
            assert!(document.len_of(kind) > 0, "{kind} has no seed rows");
        }
    }

    #[test]
    fn seed_ids_are_unique_per_collection() {
        let document = demo_document(now());
        let mut ids: Vec<&str> = document.patients.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), document.patients.len());
    }

    #[test]
    fn seed_survives_json_round_trip() {
        let document = demo_document(now());
        let raw = serde_json::to_string(&document).unwrap();
        let parsed: Document = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, document);
    }
}
