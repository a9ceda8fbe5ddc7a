//! crates/vetportal_core/src/access.rs
//!
//! The access-control core: given a submitted credential, decide who is let
//! in, what role they get, and which token gets consumed. Every function
//! here is pure; the caller commits the resulting session and persists any
//! proposed token collection.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::domain::{AccessToken, Session, TokenDuration};

/// Fixed master admin secret, non-configurable. The secondary secret from
/// platform settings is checked after this one.
pub const MASTER_ADMIN_SECRET: &str = "ADMIN123";

/// Alphabet for generated token codes (uppercase base 36).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LEN: usize = 6;

/// Outcome of an authentication attempt.
///
/// The student variant carries the proposed replacement token collection
/// with the redeemed entry marked used. Nothing is persisted here.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Admin,
    Student {
        session: Session,
        tokens: Vec<AccessToken>,
    },
    /// The code matched nothing valid. Expired, already-used, and unknown
    /// codes are indistinguishable to the caller.
    Denied,
}

/// Decide the identity for a submitted code.
///
/// The submitted code is trimmed of surrounding whitespace, then matched in
/// order, first match wins:
///
/// 1. the fixed master secret, exact and case-sensitive;
/// 2. the configurable secret from platform settings, when present and
///    non-empty after trimming;
/// 3. the first token in collection order whose code matches exactly and
///    which is unexpired and unused.
///
/// Duplicate token codes resolve by literal first-match-wins over the
/// collection order.
pub fn authenticate(
    submitted: &str,
    master_secret: &str,
    config_secret: Option<&str>,
    tokens: &[AccessToken],
    now: DateTime<Utc>,
) -> AuthOutcome {
    let code = submitted.trim();

    if code == master_secret {
        return AuthOutcome::Admin;
    }

    if let Some(secret) = config_secret {
        let secret = secret.trim();
        if !secret.is_empty() && code == secret {
            return AuthOutcome::Admin;
        }
    }

    let Some(index) = tokens
        .iter()
        .position(|t| t.code == code && t.is_redeemable(now))
    else {
        return AuthOutcome::Denied;
    };

    let mut updated = tokens.to_vec();
    updated[index].is_used = true;
    let session = Session::Student {
        token: updated[index].code.clone(),
        expiry: updated[index].expiry_date,
    };
    AuthOutcome::Student {
        session,
        tokens: updated,
    }
}

/// Issue a fresh single-use token.
///
/// The code is short, human-typeable and random; collisions are improbable
/// rather than impossible, and the collection resolves duplicates by first
/// match in order. The caller prepends the token and persists.
pub fn issue_token(duration: TokenDuration, now: DateTime<Utc>) -> AccessToken {
    AccessToken {
        code: generate_code(),
        duration,
        created_at: now,
        expiry_date: now + duration.length(),
        is_used: false,
    }
}

/// Remove the token with `code`, leaving every other entry, including their
/// order, unchanged. A hard delete, not a tombstone.
pub fn revoke_token(tokens: &[AccessToken], code: &str) -> Vec<AccessToken> {
    tokens.iter().filter(|t| t.code != code).cloned().collect()
}

fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    fn token(code: &str, expiry: DateTime<Utc>, is_used: bool) -> AccessToken {
        AccessToken {
            code: code.to_string(),
            duration: TokenDuration::Week,
            created_at: expiry - Duration::days(7),
            expiry_date: expiry,
            is_used,
        }
    }

    #[test]
    fn master_secret_grants_admin_without_touching_tokens() {
        let now = at(1_000_000);
        // A token sharing the master secret's code must not be consumed.
        let tokens = vec![token("ADMIN123", now + Duration::days(1), false)];
        let outcome = authenticate("ADMIN123", MASTER_ADMIN_SECRET, None, &tokens, now);
        assert_eq!(outcome, AuthOutcome::Admin);
        assert!(!tokens[0].is_used);
    }

    #[test]
    fn master_secret_is_trimmed_but_case_sensitive() {
        let now = at(0);
        assert_eq!(
            authenticate("  ADMIN123  ", MASTER_ADMIN_SECRET, None, &[], now),
            AuthOutcome::Admin
        );
        assert_eq!(
            authenticate("admin123", MASTER_ADMIN_SECRET, None, &[], now),
            AuthOutcome::Denied
        );
    }

    #[test]
    fn config_secret_grants_admin_when_present() {
        let now = at(0);
        let outcome = authenticate("VETS2024", MASTER_ADMIN_SECRET, Some("  VETS2024  "), &[], now);
        assert_eq!(outcome, AuthOutcome::Admin);
    }

    #[test]
    fn blank_config_secret_never_matches() {
        let now = at(0);
        for secret in [Some(""), Some("   "), None] {
            assert_eq!(
                authenticate("", MASTER_ADMIN_SECRET, secret, &[], now),
                AuthOutcome::Denied
            );
        }
    }

    #[test]
    fn config_secret_equal_to_master_still_grants_admin() {
        let now = at(0);
        let outcome = authenticate("ADMIN123", MASTER_ADMIN_SECRET, Some("ADMIN123"), &[], now);
        assert_eq!(outcome, AuthOutcome::Admin);
    }

    #[test]
    fn valid_token_grants_student_and_consumes_it() {
        let now = at(1_000);
        let expiry = now + Duration::milliseconds(1_000);
        let tokens = vec![
            token("OTHER1", now + Duration::days(2), false),
            token("ABC123", expiry, false),
        ];

        let outcome = authenticate("ABC123", MASTER_ADMIN_SECRET, None, &tokens, now);
        let AuthOutcome::Student { session, tokens: updated } = outcome else {
            panic!("expected a student grant");
        };
        assert_eq!(
            session,
            Session::Student {
                token: "ABC123".to_string(),
                expiry,
            }
        );
        assert!(updated[1].is_used);
        // Everything else in the collection is untouched.
        assert_eq!(updated[0], tokens[0]);
        assert_eq!(updated[1].code, tokens[1].code);
        assert_eq!(updated[1].expiry_date, tokens[1].expiry_date);
    }

    #[test]
    fn token_codes_are_case_sensitive() {
        let now = at(0);
        let tokens = vec![token("ABC123", now + Duration::milliseconds(1_000), false)];
        assert_eq!(
            authenticate("abc123", MASTER_ADMIN_SECRET, None, &tokens, now),
            AuthOutcome::Denied
        );
    }

    #[test]
    fn submitted_token_code_is_trimmed() {
        let now = at(0);
        let tokens = vec![token("ABC123", now + Duration::days(1), false)];
        assert!(matches!(
            authenticate(" ABC123 ", MASTER_ADMIN_SECRET, None, &tokens, now),
            AuthOutcome::Student { .. }
        ));
    }

    #[test]
    fn used_token_never_authenticates_even_before_expiry() {
        let now = at(0);
        let tokens = vec![token("USED42", now + Duration::days(30), true)];
        assert_eq!(
            authenticate("USED42", MASTER_ADMIN_SECRET, None, &tokens, now),
            AuthOutcome::Denied
        );
    }

    #[test]
    fn redeemed_token_cannot_be_redeemed_again() {
        let now = at(0);
        let tokens = vec![token("ONCE11", now + Duration::days(7), false)];

        let AuthOutcome::Student { tokens: updated, .. } =
            authenticate("ONCE11", MASTER_ADMIN_SECRET, None, &tokens, now)
        else {
            panic!("first redemption should succeed");
        };
        assert_eq!(
            authenticate("ONCE11", MASTER_ADMIN_SECRET, None, &updated, now),
            AuthOutcome::Denied
        );
    }

    #[test]
    fn expired_token_never_authenticates_even_if_unused() {
        let now = at(10_000);
        let expired = vec![token("OLD999", now - Duration::days(1), false)];
        assert_eq!(
            authenticate("OLD999", MASTER_ADMIN_SECRET, None, &expired, now),
            AuthOutcome::Denied
        );

        // Expiry exactly at `now` is already too late.
        let boundary = vec![token("EDGE00", now, false)];
        assert_eq!(
            authenticate("EDGE00", MASTER_ADMIN_SECRET, None, &boundary, now),
            AuthOutcome::Denied
        );
    }

    #[test]
    fn duplicate_codes_resolve_by_first_match_in_order() {
        let now = at(0);
        // The used copy comes first, so the scan stops there and the attempt
        // fails even though a redeemable copy exists later.
        let used_first = vec![
            token("DUP1", now + Duration::days(1), true),
            token("DUP1", now + Duration::days(1), false),
        ];
        assert_eq!(
            authenticate("DUP1", MASTER_ADMIN_SECRET, None, &used_first, now),
            AuthOutcome::Denied
        );

        // Reversed order redeems the first (valid) copy and leaves the used
        // one alone.
        let valid_first = vec![
            token("DUP1", now + Duration::days(1), false),
            token("DUP1", now + Duration::days(2), true),
        ];
        let AuthOutcome::Student { tokens: updated, .. } =
            authenticate("DUP1", MASTER_ADMIN_SECRET, None, &valid_first, now)
        else {
            panic!("expected a student grant");
        };
        assert!(updated[0].is_used);
        assert_eq!(updated[1], valid_first[1]);
    }

    #[test]
    fn issued_tokens_have_exact_duration_lengths() {
        let now = at(1_700_000_000_000);
        let cases = [
            (TokenDuration::Week, 7 * 24 * 60 * 60 * 1000i64),
            (TokenDuration::HalfMonth, 15 * 24 * 60 * 60 * 1000),
            (TokenDuration::Month, 30 * 24 * 60 * 60 * 1000),
        ];
        for (duration, expected_ms) in cases {
            let issued = issue_token(duration, now);
            assert_eq!(issued.created_at, now);
            assert_eq!(
                (issued.expiry_date - issued.created_at).num_milliseconds(),
                expected_ms
            );
            assert!(!issued.is_used);
            assert_eq!(issued.duration, duration);
        }
    }

    #[test]
    fn generated_codes_are_short_uppercase_base36() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LEN);
            assert!(code
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn revoke_removes_only_the_matching_code_and_keeps_order() {
        let now = at(0);
        let tokens = vec![
            token("AAA111", now + Duration::days(1), false),
            token("BBB222", now + Duration::days(2), true),
            token("CCC333", now + Duration::days(3), false),
        ];
        let remaining = revoke_token(&tokens, "BBB222");
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0], tokens[0]);
        assert_eq!(remaining[1], tokens[2]);

        // Unknown codes leave the collection as it was.
        assert_eq!(revoke_token(&tokens, "NOPE"), tokens);
    }
}
