//! Error types for the storefront services
//!
//! Provides error handling for:
//! - Backend/store failures
//! - Sign-in and session failures
//! - Configuration loading

use reel_store::StoreError;
use std::path::PathBuf;

/// Main storefront error type
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    /// Store or backend failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication failure
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StorefrontError {
    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.is_retryable(),
            Self::Auth(e) => e.is_retryable(),
            Self::Config(_) => false,
        }
    }
}

/// Storefront result alias
pub type StorefrontResult<T> = Result<T, StorefrontError>;

/// Identity provider errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Email address is malformed
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// Password too short
    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    /// Email already registered
    #[error("email already registered: {0}")]
    EmailTaken(String),

    /// Email/password mismatch
    #[error("invalid login credentials")]
    InvalidCredentials,

    /// Session token unknown or signed out
    #[error("session expired")]
    SessionExpired,

    /// Identity service unreachable
    #[error("identity provider error: {0}")]
    Backend(String),
}

impl AuthError {
    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the schema
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Backend URL or anon key missing outside production
    #[error("backend url or anon key is missing; set REEL_BACKEND_URL and REEL_BACKEND_ANON_KEY")]
    MissingBackendKeys,

    /// A value is out of range
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create invalid-value error
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}
