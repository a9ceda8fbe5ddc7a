//! services/portal/src/error.rs
//!
//! Defines the primary error type for the `portal` application layer.

use crate::config::ConfigError;
use vetportal_core::ports::StoreError;

/// The primary error type for the `portal` crate.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A slot write failed. The in-memory state is already updated and stays
    /// correct for this session, but the change will not survive a reload
    /// until a write succeeds. Quota exhaustion is distinguishable so the
    /// shell can tell the user to remove old content.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// A content draft had no title left after trimming.
    #[error("Content title must not be empty")]
    EmptyTitle,

    /// An attachment's inline data exceeds the per-file limit.
    #[error("Attachment '{0}' exceeds the {1}-byte limit")]
    AttachmentTooLarge(String, usize),
}
