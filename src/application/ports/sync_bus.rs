use crate::domain::value_objects::SyncSignal;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// 他コンテキストへ更新シグナルを届ける配送経路（ベストエフォート）
#[async_trait]
pub trait SyncChannel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn publish(&self, signal: &SyncSignal) -> Result<(), AppError>;
}
