//! auditoria-cli
//!
//! Operator tooling around the scoring and photo pipelines: score template
//! items, aggregate audits and run uploads through compression and EXIF
//! extraction from the command line.

pub mod cli;
pub mod commands;
pub mod config;
pub mod telemetry;
