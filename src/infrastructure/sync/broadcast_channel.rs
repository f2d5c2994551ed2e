use crate::application::ports::sync_bus::SyncChannel;
use crate::application::services::sync_broadcaster::ScreenSyncFilter;
use crate::domain::value_objects::SyncSignal;
use crate::shared::error::AppError;
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::warn;

/// 名前付きブロードキャストチャネル。ペイロードは JSON 文字列のまま流す
pub struct BroadcastSyncChannel {
    channel_name: String,
    sender: broadcast::Sender<String>,
}

impl BroadcastSyncChannel {
    pub fn new(channel_name: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            channel_name: channel_name.into(),
            sender,
        }
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// 任意のペイロードを流す（他言語クライアントからの中継用）
    pub fn publish_raw(&self, payload: String) {
        // 受信者がいない場合の送信失敗は無視する
        let _ = self.sender.send(payload);
    }

    pub fn listen(&self, filter: ScreenSyncFilter) -> ScreenSyncListener {
        ScreenSyncListener {
            receiver: self.sender.subscribe(),
            filter,
        }
    }
}

#[async_trait]
impl SyncChannel for BroadcastSyncChannel {
    fn name(&self) -> &'static str {
        "broadcast"
    }

    async fn publish(&self, signal: &SyncSignal) -> Result<(), AppError> {
        self.publish_raw(signal.to_json()?);
        Ok(())
    }
}

/// 自画面宛ての正しいシグナルだけを返す受信側
pub struct ScreenSyncListener {
    receiver: broadcast::Receiver<String>,
    filter: ScreenSyncFilter,
}

impl ScreenSyncListener {
    pub fn filter(&self) -> &ScreenSyncFilter {
        &self.filter
    }

    /// チャネルが閉じられたら `None`
    pub async fn recv(&mut self) -> Option<SyncSignal> {
        loop {
            match self.receiver.recv().await {
                Ok(raw) => {
                    if let Some(signal) = self.filter.accept_raw(&raw) {
                        return Some(signal);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, screen = self.filter.screen(), "sync listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{now, SyncScreen, SyncSource};
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn listener_skips_other_screens_and_garbage() {
        let channel = BroadcastSyncChannel::new("cabinet-smart.tv.sync.channel", 16);
        let mut listener = channel.listen(ScreenSyncFilter::new("salle_attente"));

        channel
            .publish(&SyncSignal::new(now(), SyncScreen::Accueil, SyncSource::Manager))
            .await
            .unwrap();
        channel.publish_raw("{\"at\":\"2026-01-01T00:00:00.000Z\"}".into());
        let wanted = SyncSignal::new(now(), SyncScreen::Toutes, SyncSource::System);
        channel.publish(&wanted).await.unwrap();

        let received = timeout(Duration::from_secs(1), listener.recv()).await.unwrap();
        assert_eq!(received, Some(wanted));
    }

    #[tokio::test]
    async fn publish_without_listeners_is_ok() {
        let channel = BroadcastSyncChannel::new("sync", 4);
        let signal = SyncSignal::new(now(), SyncScreen::All, SyncSource::System);
        assert!(channel.publish(&signal).await.is_ok());
        assert_eq!(channel.receiver_count(), 0);
    }

    #[tokio::test]
    async fn listener_ends_when_channel_dropped() {
        let channel = BroadcastSyncChannel::new("sync", 4);
        let mut listener = channel.listen(ScreenSyncFilter::new("accueil"));
        drop(channel);
        assert_eq!(listener.recv().await, None);
    }
}
