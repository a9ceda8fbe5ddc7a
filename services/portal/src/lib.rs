//! services/portal/src/lib.rs
//!
//! The application layer a presentation shell embeds: configuration, the
//! `Portal` context, the slot-store adapters, and the assistant adapters.

pub mod adapters;
pub mod chat;
pub mod config;
pub mod error;
pub mod state;

pub use chat::ChatHistory;
pub use config::{ConfigError, PortalConfig};
pub use error::PortalError;
pub use state::{AttachmentDraft, ContentDraft, Portal, MAX_ATTACHMENT_BYTES};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// The embedding shell calls this once at startup, before constructing the
/// [`Portal`]. Repeated calls are ignored.
pub fn init_tracing(level: tracing::Level) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
