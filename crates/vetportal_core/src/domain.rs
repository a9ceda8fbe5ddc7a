//! crates/vetportal_core/src/domain.rs
//!
//! Defines the pure, core data structures for the portal: credentials,
//! sessions, platform configuration, and the content catalog.
//! These structs are independent of any storage backend or presentation
//! concern; timestamps serialize as epoch milliseconds to match the
//! persisted slot layout.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

//=========================================================================================
// Access tokens
//=========================================================================================

/// Subscription length of an access token, fixed at issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenDuration {
    Week,
    HalfMonth,
    Month,
}

impl TokenDuration {
    /// Redeemable lifetime of a token with this duration.
    pub fn length(self) -> Duration {
        match self {
            TokenDuration::Week => Duration::days(7),
            TokenDuration::HalfMonth => Duration::days(15),
            TokenDuration::Month => Duration::days(30),
        }
    }
}

impl std::fmt::Display for TokenDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TokenDuration::Week => "one week",
            TokenDuration::HalfMonth => "two weeks (half month)",
            TokenDuration::Month => "one full month",
        };
        f.write_str(label)
    }
}

/// A single-use, time-boxed student credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// Short opaque code, human-typeable, generated at issuance.
    pub code: String,
    /// Descriptive subscription length; the expiry below is authoritative.
    pub duration: TokenDuration,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expiry_date: DateTime<Utc>,
    /// Set true exactly once, when a login redeems the token.
    pub is_used: bool,
}

impl AccessToken {
    /// Whether this token can still be redeemed at `now`. A used token never
    /// redeems again, and neither does one at or past its expiry.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && self.expiry_date > now
    }
}

//=========================================================================================
// Sessions
//=========================================================================================

/// The authenticated role of the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

/// An authenticated identity. "Nobody logged in" is `Option::None` at the
/// embedding layer, so no illegal field combination is representable.
///
/// The student variant snapshots the redeemed token's expiry at login time
/// and never tracks the token record afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Session {
    Admin,
    Student {
        token: String,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        expiry: DateTime<Utc>,
    },
}

impl Session {
    pub fn role(&self) -> Role {
        match self {
            Session::Admin => Role::Admin,
            Session::Student { .. } => Role::Student,
        }
    }

    /// Expiry snapshot for student sessions; admin sessions never expire.
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        match self {
            Session::Admin => None,
            Session::Student { expiry, .. } => Some(*expiry),
        }
    }

    /// Whole days until the subscription ends, rounded up. Negative once the
    /// session is past its expiry.
    pub fn days_left(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expiry().map(|expiry| {
            let ms = (expiry - now).num_milliseconds();
            (ms as f64 / (24.0 * 60.0 * 60.0 * 1000.0)).ceil() as i64
        })
    }

    /// True when a student subscription has less than three days left but has
    /// not run out yet. Drives the renewal banner.
    pub fn is_expiring_soon(&self, now: DateTime<Utc>) -> bool {
        match self.expiry() {
            Some(expiry) => {
                let remaining = expiry - now;
                remaining > Duration::zero() && remaining < Duration::days(3)
            }
            None => false,
        }
    }
}

//=========================================================================================
// Platform configuration
//=========================================================================================

/// Optional outbound links rendered by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
}

/// Platform-wide settings, owned by the administrative surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub logo: String,
    pub platform_name: String,
    /// Secondary admin secret, compared only after trimming whitespace.
    /// `None` (or blank) leaves the fixed master secret as the only way in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
}

impl Default for AppConfig {
    /// The documented fallback used whenever the config slot is absent or
    /// unreadable.
    fn default() -> Self {
        Self {
            logo: "https://cdn-icons-png.flaticon.com/512/2809/2809831.png".to_string(),
            platform_name: "VetPortal".to_string(),
            admin_secret: None,
            social_links: None,
        }
    }
}

//=========================================================================================
// Content catalog
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Lesson,
    Summary,
    Exam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Pdf,
}

/// A file shown alongside a content item. `url` is either a remote location
/// or an inline data reference produced by the upload path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    pub name: String,
}

/// One unit of educational material. Owned by the administrative surface,
/// read-only to students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ContentCategory,
    pub attachments: Vec<Attachment>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

//=========================================================================================
// Assistant conversation
//=========================================================================================

/// Author of one chat exchange turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One role-tagged message in an assistant conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}
