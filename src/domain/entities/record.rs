use crate::domain::entities::Document;
use crate::domain::value_objects::EntityKind;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 全エンティティ共通のレコード（`id` / `createdAt` / `updatedAt` + 固有フィールド）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Record<T> {
    pub fn new(id: impl Into<String>, at: DateTime<Utc>, data: T) -> Self {
        Self {
            id: id.into(),
            created_at: at,
            updated_at: at,
            data,
        }
    }
}

/// ドキュメント内のコレクションに対応付けられたエンティティ
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: EntityKind;

    fn collection(document: &Document) -> &Vec<Record<Self>>;

    fn collection_mut(document: &mut Document) -> &mut Vec<Record<Self>>;
}
