//! auditoria-scoring
//!
//! Checklist scoring rules. Pure functions over template items — no I/O.
//! The frontend runs the same rules for live feedback; the API re-runs them
//! when an audit is persisted or aggregated.

pub mod authoring;
pub mod error;
pub mod scoring;
pub mod summary;
pub mod validation;

pub use scoring::{max_score, score_for_answer, sequential_scores};
