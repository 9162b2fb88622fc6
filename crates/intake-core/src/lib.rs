//! Intake Core Library
//!
//! This crate provides the shared building blocks of the intake ingestion
//! layer: the error taxonomy, ingestion configuration, random identifier
//! generation, byte-content type sniffing, and slugification.

pub mod config;
pub mod error;
pub mod ident;
pub mod slug;
pub mod sniff;

// Re-export commonly used types
pub use config::{IngestConfig, DEFAULT_MAX_JSON_BYTES, DEFAULT_MAX_UPLOAD_BYTES};
pub use error::{IngestError, IngestResult};
