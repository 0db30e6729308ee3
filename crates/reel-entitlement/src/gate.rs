//! The entitlement gate
//!
//! Answers "may this viewer watch this episode right now?". The gate is a
//! pure function of its arguments: no I/O, no mutation, no logging, no
//! state carried between calls.
//!
//! It is a monetisation policy, not a security boundary. Locked episodes
//! still have fetchable video URLs; the gate only decides which surface the
//! presentation layer renders.

use crate::viewer::Viewer;
use reel_store::Episode;
use serde::{Deserialize, Serialize};

/// First gated episode number: episodes `1..LOCK_THRESHOLD` are free
pub const LOCK_THRESHOLD: i32 = 5;

/// Why a decision came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionReason {
    /// Episode is below the lock threshold
    Free,
    /// Episode is gated but the viewer has VIP
    VipActive,
    /// Episode is gated and the viewer lacks VIP
    VipRequired,
}

impl DecisionReason {
    /// Wire name of the reason
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::VipActive => "vip-active",
            Self::VipRequired => "vip-required",
        }
    }
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one gate evaluation; derived, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitlementDecision {
    pub allowed: bool,
    pub reason: DecisionReason,
}

impl EntitlementDecision {
    #[inline]
    #[must_use]
    pub const fn free() -> Self {
        Self {
            allowed: true,
            reason: DecisionReason::Free,
        }
    }

    #[inline]
    #[must_use]
    pub const fn vip_active() -> Self {
        Self {
            allowed: true,
            reason: DecisionReason::VipActive,
        }
    }

    #[inline]
    #[must_use]
    pub const fn vip_required() -> Self {
        Self {
            allowed: false,
            reason: DecisionReason::VipRequired,
        }
    }

    /// Whether the presentation layer should render the upsell surface
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.allowed
    }
}

/// Gate configuration
///
/// The threshold lives here and in [`LOCK_THRESHOLD`] only; call sites must
/// not carry their own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitlementPolicy {
    /// First episode number that requires VIP
    pub lock_threshold: i32,
}

impl EntitlementPolicy {
    /// Policy with the standard threshold
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lock_threshold: LOCK_THRESHOLD,
        }
    }

    /// With a different threshold
    #[inline]
    #[must_use]
    pub const fn with_lock_threshold(mut self, lock_threshold: i32) -> Self {
        self.lock_threshold = lock_threshold;
        self
    }

    /// Whether an episode number is below the threshold
    ///
    /// Zero and negative numbers compare as free; callers are expected to
    /// have rejected them at the catalog boundary.
    #[inline]
    #[must_use]
    pub const fn is_free(&self, episode_number: i32) -> bool {
        episode_number < self.lock_threshold
    }

    /// Evaluate an episode number for a viewer
    #[inline]
    #[must_use]
    pub fn evaluate_number(&self, viewer: &Viewer, episode_number: i32) -> EntitlementDecision {
        if self.is_free(episode_number) {
            EntitlementDecision::free()
        } else if viewer.vip_active() {
            EntitlementDecision::vip_active()
        } else {
            EntitlementDecision::vip_required()
        }
    }

    /// Evaluate an episode for a viewer
    #[inline]
    #[must_use]
    pub fn evaluate(&self, viewer: &Viewer, episode: &Episode) -> EntitlementDecision {
        self.evaluate_number(viewer, episode.episode_number)
    }
}

impl Default for EntitlementPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate with the standard policy
#[inline]
#[must_use]
pub fn evaluate(viewer: &Viewer, episode: &Episode) -> EntitlementDecision {
    EntitlementPolicy::new().evaluate(viewer, episode)
}
