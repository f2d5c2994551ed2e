use crate::application::ports::document_store::DurableDocumentStore;
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// キーごとに `<dir>/<key>.json` へ保存する。書き込みは一時ファイル経由で置き換える
pub struct FileDocumentStore {
    dir: PathBuf,
}

impl FileDocumentStore {
    pub async fn new(dir: PathBuf) -> Result<Self, AppError> {
        fs::create_dir_all(&dir)
            .await
            .map_err(|err| AppError::Storage(format!("Failed to create document dir: {err}")))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

#[async_trait]
impl DurableDocumentStore for FileDocumentStore {
    async fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::Storage(format!(
                "Failed to read document {}: {err}",
                path.display()
            ))),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)
            .await
            .map_err(|err| AppError::Storage(format!("Failed to write document: {err}")))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|err| AppError::Storage(format!("Failed to replace document: {err}")))
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
