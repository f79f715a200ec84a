//! Session management.

use crate::AuthError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use trtech_commerce::ids::UserId;

/// Opaque session token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a new random token (24 random bytes, URL-safe base64).
    pub fn generate() -> Self {
        let bytes: [u8; 24] = rand::thread_rng().gen();
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed-in session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSession {
    pub token: SessionToken,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Default session duration: 7 days.
    pub const DEFAULT_DURATION_SECS: i64 = 7 * 24 * 60 * 60;

    /// Start a session for a user.
    pub fn start(user_id: UserId) -> Self {
        Self::start_at(user_id, Utc::now(), Self::DEFAULT_DURATION_SECS)
    }

    /// Start a session at a given instant with a custom duration.
    pub fn start_at(user_id: UserId, now: DateTime<Utc>, duration_secs: i64) -> Self {
        Self {
            token: SessionToken::generate(),
            user_id,
            created_at: now,
            expires_at: now + Duration::seconds(duration_secs),
        }
    }

    /// Check if session is expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check if session is expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Validate the session, returning error if invalid.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.is_expired() {
            Err(AuthError::SessionExpired)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = AuthSession::start(UserId::new("user_1"));
        assert!(!session.is_expired());
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_session_expiry() {
        let start = Utc::now() - Duration::seconds(120);
        let session = AuthSession::start_at(UserId::new("user_1"), start, 60);
        assert!(session.is_expired());
        assert_eq!(session.validate(), Err(AuthError::SessionExpired));
        assert!(!session.is_expired_at(start + Duration::seconds(30)));
    }

    #[test]
    fn test_token_generation() {
        let t1 = SessionToken::generate();
        let t2 = SessionToken::generate();
        assert_ne!(t1, t2);
        assert_eq!(t1.as_str().len(), 32);
        assert!(t1
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
