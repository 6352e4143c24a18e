//! auditoria-core
//!
//! Pure domain types shared by the scoring and media crates. No I/O — this is
//! the vocabulary the API layer and the frontend bindings agree on.

pub mod error;
pub mod models;
pub mod storage_keys;
