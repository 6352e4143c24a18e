//! auditoria-media
//!
//! Photo processing for audit uploads: bounded-size JPEG re-encoding and
//! best-effort EXIF extraction into JSON-safe documents. Both are CPU-bound;
//! async callers go through [`offload`].

pub mod compress;
pub mod error;
pub mod exif;
pub mod metadata;
pub mod offload;
