use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::media::{CompressionResult, ExifData};
use crate::error::CoreError;
use crate::storage_keys;

/// The record stored for a photo attached to an audit item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditPhoto {
    pub id: Uuid,
    #[serde(rename = "auditoriaId")]
    pub audit_id: Uuid,
    #[serde(rename = "itemId")]
    pub item_id: Uuid,
    #[serde(rename = "storageKey")]
    pub storage_key: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(rename = "largura")]
    pub width: u32,
    #[serde(rename = "altura")]
    pub height: u32,
    #[serde(rename = "tamanhoBytes")]
    pub size_bytes: u64,
    #[ts(type = "Record<string, unknown> | null")]
    pub exif: Option<ExifData>,
    #[serde(rename = "createdAt")]
    pub created_at: jiff::Timestamp,
}

impl AuditPhoto {
    pub fn new(
        audit_id: Uuid,
        item_id: Uuid,
        compressed: &CompressionResult,
        exif: Option<ExifData>,
    ) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            audit_id,
            item_id,
            storage_key: storage_keys::photo(audit_id, item_id, id),
            mime_type: compressed.mime_type.clone(),
            width: compressed.width,
            height: compressed.height,
            size_bytes: compressed.buffer.len() as u64,
            exif,
            created_at: jiff::Timestamp::now(),
        }
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
