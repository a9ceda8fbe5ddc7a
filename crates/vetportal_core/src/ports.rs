//! crates/vetportal_core/src/ports.rs
//!
//! Defines the service contracts (traits) at the boundary of the core: the
//! persistence slots the repository writes through, and the generative-AI
//! collaborator the presentation layer talks to. These traits keep the core
//! independent of specific external implementations; the adapters live in
//! the `portal` service crate.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::ChatTurn;

//=========================================================================================
// Persistence port
//=========================================================================================

/// The four persisted slots. Each holds exactly one JSON-serialized value,
/// replaced wholesale on every write; no slot ever stores partial or
/// mixed-type data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Content,
    Tokens,
    Config,
    Session,
}

impl Slot {
    /// Stable storage key for this slot.
    pub fn key(self) -> &'static str {
        match self {
            Slot::Content => "vetportal_content",
            Slot::Tokens => "vetportal_tokens",
            Slot::Config => "vetportal_config",
            Slot::Session => "vetportal_session",
        }
    }
}

/// Errors produced by a slot store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing storage is out of space. The shell warns the user to
    /// remove old content; in-memory state stays correct for the session.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// Any other I/O failure while reading or writing a slot.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// No usable data directory could be determined for the store.
    #[error("could not determine an application data directory")]
    NoDataDir,
}

/// A convenience alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable key-value persistence over the four [`Slot`]s.
///
/// Implementations are synchronous: every operation is a single in-process
/// read or whole-value replace, mirroring the storage model the portal is
/// built around. There is no partial-update API.
pub trait SlotStore: Send + Sync {
    /// Raw JSON currently held by `slot`, or `None` when the slot is empty.
    fn read(&self, slot: Slot) -> StoreResult<Option<String>>;

    /// Replace the value of `slot` with `json`.
    fn write(&self, slot: Slot, json: &str) -> StoreResult<()>;

    /// Remove the slot's value entirely.
    fn clear(&self, slot: Slot) -> StoreResult<()>;
}

/// Read and deserialize a slot, degrading to `fallback` on absence, corrupt
/// data, or any read failure.
///
/// This never fails: the condition is logged, and a corrupt value is simply
/// overwritten by the next successful write.
pub fn read_or<T: DeserializeOwned>(store: &dyn SlotStore, slot: Slot, fallback: T) -> T {
    match store.read(slot) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(slot = slot.key(), %err, "corrupt slot value, using fallback");
                fallback
            }
        },
        Ok(None) => fallback,
        Err(err) => {
            tracing::warn!(slot = slot.key(), %err, "slot read failed, using fallback");
            fallback
        }
    }
}

/// Serialize `value` and replace the slot with it.
///
/// Failures come back as an explicit [`StoreError`], with quota exhaustion
/// distinguishable so callers can warn the user instead of retrying blindly.
pub fn write_json<T: Serialize>(store: &dyn SlotStore, slot: Slot, value: &T) -> StoreResult<()> {
    let json = serde_json::to_string(value)?;
    store.write(slot, &json)
}

//=========================================================================================
// Generative-AI collaborator ports
//=========================================================================================

/// Failure modes of the external assistant, kept deliberately coarse: the
/// presentation layer only varies its retry prompt on them. Assistant
/// failures never touch access-control or content state.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// The service rejected the API key or entitlement; the shell prompts
    /// the user to reconfigure the key.
    #[error("assistant service rejected the credentials")]
    Unauthorized,

    /// Any other failure (network, service-side, malformed reply); the shell
    /// prompts a retry.
    #[error("assistant request failed: {0}")]
    Failed(String),
}

/// A convenience alias for `Result<T, AssistantError>`.
pub type AssistantResult<T> = Result<T, AssistantError>;

/// Conversational assistant for students.
///
/// Each exchange is stateless from the core's perspective: the full prior
/// history is resent every turn and the reply is a plain string.
#[async_trait]
pub trait AssistantService: Send + Sync {
    async fn reply(&self, history: &[ChatTurn], message: &str) -> AssistantResult<String>;
}

/// One-shot description generation for the administrative content form.
#[async_trait]
pub trait DescriptionService: Send + Sync {
    async fn describe(&self, title: &str) -> AssistantResult<String>;
}
