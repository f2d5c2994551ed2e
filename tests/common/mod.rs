#![allow(dead_code)]

use async_trait::async_trait;
use cabinet_store_lib::application::ports::document_store::DurableDocumentStore;
use cabinet_store_lib::application::ports::sync_bus::SyncChannel;
use cabinet_store_lib::application::services::{DocumentStore, EntityHub, SyncBroadcaster};
use cabinet_store_lib::domain::entities::{
    EmergencyContact, Gender, Patient, QueueTicketPriority, QueueTicketStatus, TargetScreen,
    WaitingQueueTicket,
};
use cabinet_store_lib::infrastructure::storage::MemoryDocumentStore;
use cabinet_store_lib::{AppError, SyncSignal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_DOCUMENT_KEY: &str = "cabinet-smart.test.document";

/// 書き込み（必要なら読み込みも）が失敗するバックエンド
#[derive(Default)]
pub struct FailingDocumentStore {
    pub fail_reads: AtomicBool,
}

impl FailingDocumentStore {
    pub fn unreadable() -> Self {
        Self {
            fail_reads: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl DurableDocumentStore for FailingDocumentStore {
    async fn read(&self, _key: &str) -> Result<Option<String>, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Storage("storage disabled".into()));
        }
        Ok(None)
    }

    async fn write(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::Storage("quota exceeded".into()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// 配送されたシグナルを記録するチャネル
#[derive(Default)]
pub struct RecordingSyncChannel {
    pub signals: Mutex<Vec<SyncSignal>>,
}

impl RecordingSyncChannel {
    pub fn signals(&self) -> Vec<SyncSignal> {
        self.signals
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl SyncChannel for RecordingSyncChannel {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn publish(&self, signal: &SyncSignal) -> Result<(), AppError> {
        self.signals
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(signal.clone());
        Ok(())
    }
}

pub fn hub_with(backend: Arc<dyn DurableDocumentStore>) -> (EntityHub, Arc<RecordingSyncChannel>) {
    let recorder = Arc::new(RecordingSyncChannel::default());
    let channels: Vec<Arc<dyn SyncChannel>> = vec![recorder.clone()];
    let store = Arc::new(DocumentStore::new(backend, TEST_DOCUMENT_KEY));
    (
        EntityHub::new(store, Arc::new(SyncBroadcaster::new(channels))),
        recorder,
    )
}

pub fn memory_hub() -> (EntityHub, Arc<RecordingSyncChannel>) {
    hub_with(Arc::new(MemoryDocumentStore::new()))
}

pub fn sample_patient(nom: &str) -> Patient {
    Patient {
        nom: nom.to_string(),
        prenom: "Salma".to_string(),
        date_naissance: "1990-04-12".to_string(),
        genre: Gender::Femme,
        telephone: "+212600000000".to_string(),
        email: "salma@example.ma".to_string(),
        adresse: "Rabat".to_string(),
        groupe_sanguin: "A+".to_string(),
        allergies: vec!["pénicilline".to_string()],
        notes: String::new(),
        numero_assurance: "CNSS-0001".to_string(),
        contact_urgence: EmergencyContact {
            name: "Karim".to_string(),
            phone: "+212611111111".to_string(),
            relation: "frère".to_string(),
        },
    }
}

pub fn sample_ticket(patient_id: &str, numero: &str) -> WaitingQueueTicket {
    WaitingQueueTicket {
        patient_id: patient_id.to_string(),
        appointment_id: None,
        numero_ticket: numero.to_string(),
        ecran_cible: TargetScreen::SalleAttente,
        statut: QueueTicketStatus::EnAttente,
        priorite: QueueTicketPriority::Normale,
        heure_arrivee: "2026-10-19T08:30:00.000Z".to_string(),
        heure_appel: String::new(),
        heure_consultation: String::new(),
        heure_sortie: String::new(),
        notes: String::new(),
    }
}
