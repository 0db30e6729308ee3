//! Identity and sessions
//!
//! Sessions are plain values handed back to the caller and passed into every
//! storefront call; there is no ambient "current user".

use crate::error::AuthError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use reel_store::UserId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Shortest accepted password
pub const MIN_PASSWORD_LEN: usize = 6;

/// Default session lifetime for [`LocalIdentityProvider`]
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 7;

/// Authenticated account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
}

/// Opaque session issued at sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
}

impl Session {
    #[inline]
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}

/// Email/password identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register an account and open a session for it
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Open a session for an existing account
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Close a session; closing an unknown session is a no-op
    async fn sign_out(&self, session: &Session) -> Result<(), AuthError>;

    /// Account behind a live session
    async fn current_user(&self, session: &Session) -> Result<AuthUser, AuthError>;
}

/// Normalised account key
fn email_key(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Reject malformed emails and short passwords
///
/// # Errors
/// `AuthError::InvalidEmail` or `AuthError::WeakPassword`
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    let email = email.trim();
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !well_formed {
        return Err(AuthError::InvalidEmail(email.to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    salt: String,
    digest: String,
}

fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
struct SessionEntry {
    user: AuthUser,
    expires_at: DateTime<Utc>,
}

/// In-process identity provider for local runs and tests
///
/// Stores salted SHA-256 digests, never the password itself. Accounts live
/// only as long as the process. Sessions expire after the configured TTL;
/// expired entries are dropped on lookup and whenever a new session opens.
#[derive(Debug)]
pub struct LocalIdentityProvider {
    accounts: DashMap<String, Account>,
    sessions: DashMap<String, SessionEntry>,
    session_ttl: Duration,
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self {
            accounts: DashMap::new(),
            sessions: DashMap::new(),
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        }
    }
}

impl LocalIdentityProvider {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different session lifetime
    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Number of stored sessions, expired ones included until purged
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Drop expired sessions; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut removed = 0;
        self.sessions.retain(|_, entry| {
            let live = entry.expires_at > now;
            if !live {
                removed += 1;
            }
            live
        });
        if removed > 0 {
            tracing::debug!(removed, "Purged expired sessions");
        }
        removed
    }

    fn open_session(&self, user: AuthUser) -> Session {
        self.purge_expired();
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            token.clone(),
            SessionEntry {
                user: user.clone(),
                expires_at: Utc::now() + self.session_ttl,
            },
        );
        Session { token, user }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        validate_credentials(email, password)?;

        let key = email_key(email);
        let user = match self.accounts.entry(key) {
            Entry::Occupied(_) => return Err(AuthError::EmailTaken(email.trim().to_string())),
            Entry::Vacant(slot) => {
                let salt = Uuid::new_v4().simple().to_string();
                let user = AuthUser {
                    id: UserId::new(),
                    email: email.trim().to_string(),
                };
                slot.insert(Account {
                    user: user.clone(),
                    digest: password_digest(&salt, password),
                    salt,
                });
                user
            }
        };

        tracing::info!(user_id = %user.id, "Account registered");
        Ok(self.open_session(user))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let user = {
            let account = self
                .accounts
                .get(&email_key(email))
                .ok_or(AuthError::InvalidCredentials)?;
            if password_digest(&account.salt, password) != account.digest {
                return Err(AuthError::InvalidCredentials);
            }
            account.user.clone()
        };

        tracing::debug!(user_id = %user.id, "Signed in");
        Ok(self.open_session(user))
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        if self.sessions.remove(&session.token).is_some() {
            tracing::debug!(user_id = %session.user.id, "Signed out");
        }
        Ok(())
    }

    async fn current_user(&self, session: &Session) -> Result<AuthUser, AuthError> {
        let now = Utc::now();
        if self
            .sessions
            .remove_if(&session.token, |_, entry| entry.expires_at <= now)
            .is_some()
        {
            tracing::debug!(user_id = %session.user.id, "Session expired");
        }
        self.sessions
            .get(&session.token)
            .map(|entry| entry.user.clone())
            .ok_or(AuthError::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_rules() {
        assert!(validate_credentials("viewer@reel.example", "secret").is_ok());
        assert!(matches!(
            validate_credentials("viewer.reel.example", "secret"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            validate_credentials("@reel.example", "secret"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            validate_credentials("viewer@reel.example", "12345"),
            Err(AuthError::WeakPassword { min: 6 })
        ));
    }

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let idp = LocalIdentityProvider::new();
        let first = idp.sign_up("Viewer@Reel.example", "secret1").await.unwrap();

        let second = idp.sign_in("viewer@reel.example", "secret1").await.unwrap();
        assert_eq!(first.user.id, second.user.id);
        assert_ne!(first.token, second.token);
        assert_eq!(idp.active_sessions(), 2);
    }

    #[tokio::test]
    async fn duplicate_email_rejected_case_insensitively() {
        let idp = LocalIdentityProvider::new();
        idp.sign_up("viewer@reel.example", "secret1").await.unwrap();

        let err = idp.sign_up("VIEWER@reel.example", "other12").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken(_)));
    }

    #[tokio::test]
    async fn wrong_password_rejected() {
        let idp = LocalIdentityProvider::new();
        idp.sign_up("viewer@reel.example", "secret1").await.unwrap();

        let err = idp.sign_in("viewer@reel.example", "secret2").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        let err = idp.sign_in("nobody@reel.example", "secret1").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn signed_out_session_expires() {
        let idp = LocalIdentityProvider::new();
        let session = idp.sign_up("viewer@reel.example", "secret1").await.unwrap();
        assert_eq!(idp.current_user(&session).await.unwrap(), session.user);

        idp.sign_out(&session).await.unwrap();
        assert!(matches!(
            idp.current_user(&session).await,
            Err(AuthError::SessionExpired)
        ));
        // second sign-out is a no-op
        idp.sign_out(&session).await.unwrap();
    }

    #[tokio::test]
    async fn sessions_lapse_after_ttl() {
        let idp = LocalIdentityProvider::new().with_session_ttl(Duration::zero());
        let session = idp.sign_up("viewer@reel.example", "secret1").await.unwrap();
        assert_eq!(idp.active_sessions(), 1);

        assert!(matches!(
            idp.current_user(&session).await,
            Err(AuthError::SessionExpired)
        ));
        assert_eq!(idp.active_sessions(), 0);

        // account survives; a fresh sign-in still works
        idp.sign_in("viewer@reel.example", "secret1").await.unwrap();
    }

    #[tokio::test]
    async fn expired_sessions_are_purged() {
        let idp = LocalIdentityProvider::new().with_session_ttl(Duration::zero());
        idp.sign_up("a@reel.example", "secret1").await.unwrap();
        idp.sign_up("b@reel.example", "secret1").await.unwrap();
        // opening the second session dropped the first
        assert_eq!(idp.active_sessions(), 1);
        assert_eq!(idp.purge_expired(), 1);
        assert_eq!(idp.active_sessions(), 0);

        let lasting = LocalIdentityProvider::new();
        let session = lasting.sign_up("c@reel.example", "secret1").await.unwrap();
        assert_eq!(lasting.purge_expired(), 0);
        assert_eq!(lasting.current_user(&session).await.unwrap(), session.user);
    }

    #[test]
    fn digests_are_salted() {
        assert_ne!(password_digest("a", "secret"), password_digest("b", "secret"));
        assert_eq!(password_digest("a", "secret").len(), 64);
    }
}
