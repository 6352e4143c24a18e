//! Object storage key conventions for audit photos.
//!
//! Pure string functions. The upload layer owns the bucket; these define where
//! inside it a processed photo lands.

use uuid::Uuid;

/// Processed photos are always JPEG, whatever was uploaded.
pub fn photo(audit_id: Uuid, item_id: Uuid, photo_id: Uuid) -> String {
    format!("audits/{audit_id}/items/{item_id}/photos/{photo_id}.jpg")
}
