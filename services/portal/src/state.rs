//! services/portal/src/state.rs
//!
//! Defines the application context the presentation shell drives.
//!
//! `Portal` is the single holder of the administrative collections and the
//! current session: hydrated from the slot store at startup, mutated only
//! through the methods below, and written back through the store wholesale
//! on every change. Construct one explicitly and hand it to the shell; there
//! is no global instance.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use vetportal_core::access::{self, AuthOutcome, MASTER_ADMIN_SECRET};
use vetportal_core::catalog;
use vetportal_core::domain::{
    AccessToken, AppConfig, Attachment, AttachmentKind, ContentCategory, ContentItem, Role,
    Session, TokenDuration,
};
use vetportal_core::ports::{read_or, write_json, Slot, SlotStore};

use crate::error::PortalError;

/// Largest inline attachment accepted by the content form. Anything bigger
/// is rejected before it reaches the store.
pub const MAX_ATTACHMENT_BYTES: usize = 2 * 1024 * 1024;

/// An attachment as submitted by the administrative surface; the id is
/// assigned on acceptance.
#[derive(Debug, Clone)]
pub struct AttachmentDraft {
    pub kind: AttachmentKind,
    pub url: String,
    pub name: String,
}

/// A content draft from the administrative surface. Ids and the creation
/// timestamp are assigned on acceptance.
#[derive(Debug, Clone)]
pub struct ContentDraft {
    pub title: String,
    pub description: String,
    pub category: ContentCategory,
    pub attachments: Vec<AttachmentDraft>,
}

/// The portal context: session boundary, token and content administration,
/// and platform settings.
pub struct Portal {
    store: Arc<dyn SlotStore>,
    content: Vec<ContentItem>,
    tokens: Vec<AccessToken>,
    config: AppConfig,
    session: Option<Session>,
}

impl Portal {
    /// Hydrate the portal from the store. Missing or unreadable slots fall
    /// back to an empty catalog, an empty token list, the default platform
    /// configuration, and no session.
    pub fn open(store: Arc<dyn SlotStore>) -> Self {
        let content = read_or(store.as_ref(), Slot::Content, Vec::new());
        let tokens = read_or(store.as_ref(), Slot::Tokens, Vec::new());
        let config = read_or(store.as_ref(), Slot::Config, AppConfig::default());
        let session = read_or(store.as_ref(), Slot::Session, None);
        info!(
            content = content.len(),
            tokens = tokens.len(),
            "portal hydrated from store"
        );
        Self {
            store,
            content,
            tokens,
            config,
            session,
        }
    }

    //=====================================================================================
    // Session boundary
    //=====================================================================================

    /// Attempt a login with a submitted code.
    ///
    /// Returns the granted role, or `None` when the code matches nothing
    /// valid; the caller learns nothing about why. A student grant consumes
    /// the matched token and persists both the token list and the session.
    pub fn login(&mut self, code: &str) -> Option<Role> {
        let outcome = access::authenticate(
            code,
            MASTER_ADMIN_SECRET,
            self.config.admin_secret.as_deref(),
            &self.tokens,
            Utc::now(),
        );
        match outcome {
            AuthOutcome::Admin => {
                self.session = Some(Session::Admin);
                self.persist_session();
                Some(Role::Admin)
            }
            AuthOutcome::Student { session, tokens } => {
                self.tokens = tokens;
                if let Err(err) = write_json(self.store.as_ref(), Slot::Tokens, &self.tokens) {
                    warn!(%err, "failed to persist consumed token");
                }
                self.session = Some(session);
                self.persist_session();
                Some(Role::Student)
            }
            AuthOutcome::Denied => None,
        }
    }

    /// Clear the current session, in memory and in the store.
    pub fn logout(&mut self) {
        self.session = None;
        if let Err(err) = self.store.clear(Slot::Session) {
            warn!(%err, "failed to clear persisted session");
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn persist_session(&self) {
        // A failed write here means the session will not survive a reload;
        // the identity decision itself stands.
        if let Err(err) = write_json(self.store.as_ref(), Slot::Session, &self.session) {
            warn!(%err, "failed to persist session");
        }
    }

    //=====================================================================================
    // Token administration
    //=====================================================================================

    /// Issue a fresh single-use token and prepend it to the collection.
    pub fn issue_token(&mut self, duration: TokenDuration) -> Result<AccessToken, PortalError> {
        let token = access::issue_token(duration, Utc::now());
        self.tokens.insert(0, token.clone());
        self.persist_tokens()?;
        Ok(token)
    }

    /// Remove the token with `code` entirely. Returns whether an entry was
    /// removed.
    pub fn revoke_token(&mut self, code: &str) -> Result<bool, PortalError> {
        let before = self.tokens.len();
        self.tokens = access::revoke_token(&self.tokens, code);
        if self.tokens.len() == before {
            return Ok(false);
        }
        self.persist_tokens()?;
        Ok(true)
    }

    pub fn tokens(&self) -> &[AccessToken] {
        &self.tokens
    }

    fn persist_tokens(&self) -> Result<(), PortalError> {
        write_json(self.store.as_ref(), Slot::Tokens, &self.tokens)?;
        Ok(())
    }

    //=====================================================================================
    // Content administration
    //=====================================================================================

    /// Accept a content draft: validate it, assign ids and the creation
    /// timestamp, prepend it to the catalog, and persist.
    pub fn add_content(&mut self, draft: ContentDraft) -> Result<ContentItem, PortalError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(PortalError::EmptyTitle);
        }
        for attachment in &draft.attachments {
            if attachment.url.len() > MAX_ATTACHMENT_BYTES {
                return Err(PortalError::AttachmentTooLarge(
                    attachment.name.clone(),
                    MAX_ATTACHMENT_BYTES,
                ));
            }
        }

        let item = ContentItem {
            id: Uuid::new_v4(),
            title,
            description: draft.description.trim().to_string(),
            category: draft.category,
            attachments: draft
                .attachments
                .into_iter()
                .map(|a| Attachment {
                    id: Uuid::new_v4(),
                    kind: a.kind,
                    url: a.url,
                    name: a.name,
                })
                .collect(),
            created_at: Utc::now(),
        };
        self.content.insert(0, item.clone());
        write_json(self.store.as_ref(), Slot::Content, &self.content)?;
        Ok(item)
    }

    /// Delete a content item by id. Returns whether an entry was removed.
    pub fn remove_content(&mut self, id: Uuid) -> Result<bool, PortalError> {
        let before = self.content.len();
        self.content.retain(|item| item.id != id);
        if self.content.len() == before {
            return Ok(false);
        }
        write_json(self.store.as_ref(), Slot::Content, &self.content)?;
        Ok(true)
    }

    pub fn content(&self) -> &[ContentItem] {
        &self.content
    }

    /// Student-facing catalog view: category filter plus case-insensitive
    /// free-text match over title and description.
    pub fn search_content(
        &self,
        category: Option<ContentCategory>,
        query: &str,
    ) -> Vec<&ContentItem> {
        catalog::search(&self.content, category, query)
    }

    //=====================================================================================
    // Platform configuration
    //=====================================================================================

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Replace the platform configuration wholesale and persist it.
    pub fn update_config(&mut self, config: AppConfig) -> Result<(), PortalError> {
        self.config = config;
        write_json(self.store.as_ref(), Slot::Config, &self.config)?;
        Ok(())
    }
}
