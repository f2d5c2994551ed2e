use crate::shared::error::AppError;
use async_trait::async_trait;

/// ドキュメント全体を1つのJSON文字列として保持する永続キー・バリュー領域
#[async_trait]
pub trait DurableDocumentStore: Send + Sync {
    /// 保存済みの値。未保存なら `None`
    async fn read(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn write(&self, key: &str, value: &str) -> Result<(), AppError>;

    fn backend_name(&self) -> &'static str;
}
