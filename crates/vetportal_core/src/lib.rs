pub mod access;
pub mod catalog;
pub mod domain;
pub mod ports;

pub use access::{authenticate, issue_token, revoke_token, AuthOutcome, MASTER_ADMIN_SECRET};
pub use domain::{
    AccessToken, AppConfig, Attachment, AttachmentKind, ChatRole, ChatTurn, ContentCategory,
    ContentItem, Role, Session, SocialLinks, TokenDuration,
};
pub use ports::{
    read_or, write_json, AssistantError, AssistantResult, AssistantService, DescriptionService,
    Slot, SlotStore, StoreError, StoreResult,
};
