//! Viewer input to the gate

use chrono::{DateTime, Utc};
use reel_store::UserId;
use serde::{Deserialize, Serialize};

/// The viewer as seen by the gate for the duration of one decision
///
/// `vip` is `None` while the profile has not been loaded (or failed to load);
/// an unresolved flag never grants access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: Option<UserId>,
    #[serde(rename = "vipActive")]
    pub vip: Option<bool>,
    #[serde(rename = "vipExpiry")]
    pub vip_expiry: Option<DateTime<Utc>>,
}

impl Viewer {
    /// Resolved viewer
    #[inline]
    #[must_use]
    pub fn new(id: UserId, vip_active: bool, vip_expiry: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Some(id),
            vip: Some(vip_active),
            vip_expiry,
        }
    }

    /// Viewer whose subscription state is not known yet
    #[inline]
    #[must_use]
    pub const fn unresolved() -> Self {
        Self {
            id: None,
            vip: None,
            vip_expiry: None,
        }
    }

    /// Anonymous viewer known to be non-VIP
    #[inline]
    #[must_use]
    pub const fn free() -> Self {
        Self {
            id: None,
            vip: Some(false),
            vip_expiry: None,
        }
    }

    /// Anonymous viewer known to be VIP
    #[inline]
    #[must_use]
    pub const fn vip() -> Self {
        Self {
            id: None,
            vip: Some(true),
            vip_expiry: None,
        }
    }

    /// With identity
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Effective VIP flag; unresolved reads as `false`
    #[inline]
    #[must_use]
    pub fn vip_active(&self) -> bool {
        self.vip.unwrap_or(false)
    }

    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.vip.is_some()
    }
}
