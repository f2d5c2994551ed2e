//! 待合室テレビ画面に表示する内容の算出。

use crate::domain::entities::{
    Document, QueueTicketStatus, Record, TargetScreen, TvAudioTrack, TvContent, TvContentType,
    WaitingQueueTicket,
};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySnapshot {
    pub screen: TargetScreen,
    pub date: NaiveDate,
    pub contents: Vec<Record<TvContent>>,
    pub info_slides: Vec<Record<TvContent>>,
    pub tickers: Vec<String>,
    pub tickets: Vec<Record<WaitingQueueTicket>>,
    pub called_ticket: Option<Record<WaitingQueueTicket>>,
    pub waiting: Vec<Record<WaitingQueueTicket>>,
    pub playlist: Vec<Record<TvAudioTrack>>,
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// 開始日・終了日が両方設定されている場合のみ期間で絞り込む（両端含む）
fn within_window(content: &TvContent, today: NaiveDate) -> bool {
    match (parse_day(&content.date_debut), parse_day(&content.date_fin)) {
        (Some(start), Some(end)) => start <= today && today <= end,
        _ => true,
    }
}

impl DisplaySnapshot {
    pub fn build(document: &Document, screen: TargetScreen, today: NaiveDate) -> Self {
        let mut contents: Vec<Record<TvContent>> = document
            .tv_contents
            .iter()
            .filter(|c| c.data.actif && c.data.ecran_cible.shows_on(screen))
            .filter(|c| within_window(&c.data, today))
            .cloned()
            .collect();
        contents.sort_by_key(|c| c.data.ordre);

        let info_slides = contents
            .iter()
            .filter(|c| c.data.kind.is_info_slide())
            .cloned()
            .collect();
        let tickers = contents
            .iter()
            .filter(|c| c.data.kind == TvContentType::MessageDefilant)
            .map(|c| c.data.message.clone())
            .filter(|message| !message.trim().is_empty())
            .collect();

        let mut tickets: Vec<Record<WaitingQueueTicket>> = document
            .waiting_queue_tickets
            .iter()
            .filter(|t| t.data.ecran_cible.shows_on(screen) && !t.data.statut.is_terminal())
            .cloned()
            .collect();
        tickets.sort_by(|a, b| a.data.heure_arrivee.cmp(&b.data.heure_arrivee));

        let called_ticket = tickets
            .iter()
            .find(|t| t.data.statut == QueueTicketStatus::EnConsultation)
            .or_else(|| {
                tickets
                    .iter()
                    .find(|t| t.data.statut == QueueTicketStatus::Appele)
            })
            .cloned();
        let waiting = tickets
            .iter()
            .filter(|t| t.data.statut == QueueTicketStatus::EnAttente)
            .cloned()
            .collect();

        let mut playlist: Vec<Record<TvAudioTrack>> = document
            .tv_audio_tracks
            .iter()
            .filter(|t| t.data.actif && t.data.ecran_cible.shows_on(screen))
            .cloned()
            .collect();
        playlist.sort_by_key(|t| t.data.ordre);

        Self {
            screen,
            date: today,
            contents,
            info_slides,
            tickers,
            tickets,
            called_ticket,
            waiting,
            playlist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{QueueTicketPriority, TvAudioLoopMode};
    use crate::domain::value_objects::now;

    fn content(id: &str, ordre: i32, screen: TargetScreen, kind: TvContentType) -> Record<TvContent> {
        Record::new(
            id,
            now(),
            TvContent {
                titre: id.to_string(),
                kind,
                duree_affichage: 10,
                ordre,
                ecran_cible: screen,
                date_debut: "2026-01-01".into(),
                date_fin: "2026-01-31".into(),
                couleur_fond: "#000".into(),
                media: String::new(),
                message: format!("msg {id}"),
                actif: true,
            },
        )
    }

    fn ticket(id: &str, statut: QueueTicketStatus, arrival: &str) -> Record<WaitingQueueTicket> {
        Record::new(
            id,
            now(),
            WaitingQueueTicket {
                patient_id: "pat-1".into(),
                appointment_id: None,
                numero_ticket: id.to_uppercase(),
                ecran_cible: TargetScreen::SalleAttente,
                statut,
                priorite: QueueTicketPriority::Normale,
                heure_arrivee: arrival.into(),
                heure_appel: String::new(),
                heure_consultation: String::new(),
                heure_sortie: String::new(),
                notes: String::new(),
            },
        )
    }

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn contents_are_filtered_and_ordered() {
        let mut document = Document::empty();
        let mut inactive = content("c-off", 0, TargetScreen::Toutes, TvContentType::Annonce);
        inactive.data.actif = false;
        document.tv_contents = vec![
            content("c-3", 3, TargetScreen::Toutes, TvContentType::MessageDefilant),
            content("c-1", 1, TargetScreen::SalleAttente, TvContentType::ConseilSante),
            content("c-acc", 2, TargetScreen::Accueil, TvContentType::Annonce),
            inactive,
        ];

        let snapshot = DisplaySnapshot::build(&document, TargetScreen::SalleAttente, day("2026-01-15"));
        let ids: Vec<&str> = snapshot.contents.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c-1", "c-3"]);
        assert_eq!(snapshot.info_slides.len(), 1);
        assert_eq!(snapshot.tickers, vec!["msg c-3".to_string()]);

        let outside = DisplaySnapshot::build(&document, TargetScreen::SalleAttente, day("2026-02-01"));
        assert!(outside.contents.is_empty());
    }

    #[test]
    fn consultation_takes_precedence_over_called() {
        let mut document = Document::empty();
        document.waiting_queue_tickets = vec![
            ticket("q-2", QueueTicketStatus::EnAttente, "2026-01-15T09:10:00.000Z"),
            ticket("q-1", QueueTicketStatus::Appele, "2026-01-15T09:00:00.000Z"),
            ticket("q-3", QueueTicketStatus::EnConsultation, "2026-01-15T09:20:00.000Z"),
            ticket("q-4", QueueTicketStatus::Termine, "2026-01-15T08:00:00.000Z"),
        ];

        let snapshot = DisplaySnapshot::build(&document, TargetScreen::SalleAttente, day("2026-01-15"));
        let ids: Vec<&str> = snapshot.tickets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["q-1", "q-2", "q-3"]);
        assert_eq!(snapshot.called_ticket.map(|t| t.id), Some("q-3".to_string()));
        assert_eq!(snapshot.waiting.len(), 1);
    }

    #[test]
    fn playlist_follows_screen_and_order() {
        let mut document = Document::empty();
        let track = |id: &str, ordre: i32, screen: TargetScreen| {
            Record::new(
                id,
                now(),
                TvAudioTrack {
                    titre: id.into(),
                    artiste: String::new(),
                    ecran_cible: screen,
                    ordre,
                    url: format!("https://example.com/{id}.mp3"),
                    actif: true,
                    loop_mode: TvAudioLoopMode::Playlist,
                    volume: 0.5,
                },
            )
        };
        document.tv_audio_tracks = vec![
            track("a-2", 2, TargetScreen::Toutes),
            track("a-1", 1, TargetScreen::SalleAttente),
            track("a-x", 0, TargetScreen::Accueil),
        ];

        let snapshot = DisplaySnapshot::build(&document, TargetScreen::SalleAttente, day("2026-01-15"));
        let ids: Vec<&str> = snapshot.playlist.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a-1", "a-2"]);
    }
}
