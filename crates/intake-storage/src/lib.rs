//! Intake Storage Library
//!
//! Filesystem collaborator for the ingestion layer. Defines the
//! [`FileStore`] trait (directory ensuring, existence checks, file
//! creation and opening) and the [`LocalStore`] implementation over
//! `tokio::fs`.

pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStore;
pub use traits::{FileStore, StoreError, StoreResult};
