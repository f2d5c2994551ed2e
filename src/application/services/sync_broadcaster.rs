use crate::application::ports::sync_bus::SyncChannel;
use crate::domain::value_objects::{now, SyncScreen, SyncSignal, SyncSource};
use std::sync::Arc;
use tracing::{debug, warn};

/// 表示系データの変更を全配送経路へ通知する。各経路は独立したベストエフォート
pub struct SyncBroadcaster {
    channels: Vec<Arc<dyn SyncChannel>>,
}

impl SyncBroadcaster {
    pub fn new(channels: Vec<Arc<dyn SyncChannel>>) -> Self {
        Self { channels }
    }

    pub fn disabled() -> Self {
        Self::new(Vec::new())
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|channel| channel.name()).collect()
    }

    /// 送信したシグナルと成功した経路数を返す
    pub async fn trigger(&self, screen: SyncScreen, source: SyncSource) -> (SyncSignal, usize) {
        let signal = SyncSignal::new(now(), screen, source);
        let mut delivered = 0;
        for channel in &self.channels {
            match channel.publish(&signal).await {
                Ok(()) => delivered += 1,
                Err(err) => warn!(channel = channel.name(), "sync publish failed: {err}"),
            }
        }
        debug!(
            screen = %screen,
            delivered,
            total = self.channels.len(),
            "sync signal broadcast"
        );
        (signal, delivered)
    }
}

/// 受信側の画面フィルタ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenSyncFilter {
    screen: String,
}

impl ScreenSyncFilter {
    pub fn new(screen: impl Into<String>) -> Self {
        Self {
            screen: screen.into(),
        }
    }

    pub fn screen(&self) -> &str {
        &self.screen
    }

    pub fn accepts(&self, signal: &SyncSignal) -> bool {
        signal.targets(&self.screen)
    }

    /// 生ペイロードを検証し、この画面宛てのものだけ返す
    pub fn accept_raw(&self, raw: &str) -> Option<SyncSignal> {
        SyncSignal::parse(raw).filter(|signal| self.accepts(signal))
    }
}
