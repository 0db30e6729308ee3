//! Reel Entitlement - per-episode access decisions
//!
//! Episodes below [`LOCK_THRESHOLD`] are free; everything from the threshold
//! on requires an active VIP subscription. The decision is recomputed every
//! time an episode is about to be presented and is never stored, so a viewer
//! who upgrades sees their episodes unlock on the next evaluation.
//!
//! # Example
//!
//! ```rust,ignore
//! use reel_entitlement::{evaluate, DecisionReason, Viewer};
//!
//! let decision = evaluate(&Viewer::free(), &episode_five);
//! assert!(!decision.allowed);
//! assert_eq!(decision.reason, DecisionReason::VipRequired);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod gate;
pub mod viewer;

pub use gate::{evaluate, DecisionReason, EntitlementDecision, EntitlementPolicy, LOCK_THRESHOLD};
pub use viewer::Viewer;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
