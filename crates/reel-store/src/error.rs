//! Error types for the store
//!
//! Covers:
//! - Boundary validation of catalog records
//! - Missing rows
//! - Constraint violations (duplicate bookmarks, duplicate episode numbers)
//! - Backend/transport failures

use crate::types::{SeriesId, UserId};

/// Main store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Row not found
    #[error("{table} row not found: {id}")]
    NotFound { table: &'static str, id: String },

    /// Episode number below 1
    #[error("invalid episode number {0}: episode numbers start at 1")]
    InvalidEpisodeNumber(i32),

    /// Episode number already used within the series
    #[error("episode {number} already exists in series {series_id}")]
    DuplicateEpisodeNumber { series_id: SeriesId, number: i32 },

    /// Series already in the user's list
    #[error("series {series_id} is already in the list of {user_id}")]
    DuplicateBookmark { user_id: UserId, series_id: SeriesId },

    /// Profile row already exists
    #[error("profile already exists: {0}")]
    DuplicateProfile(UserId),

    /// Record failed field validation
    #[error("validation failed: {0}")]
    Validation(String),

    /// Seed or payload could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Backend unreachable or returned an unexpected response
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create not-found error
    #[inline]
    pub fn not_found(table: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            table,
            id: id.to_string(),
        }
    }

    /// Check if error is a missing row
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

/// Store result alias
pub type StoreResult<T> = Result<T, StoreError>;
