//! Reel Core - storefront services
//!
//! The screens of the storefront built over the backend contracts:
//! - Sessions with post-login routing
//! - Home feed with category chips and a trending strip
//! - Player, where every episode passes through the entitlement gate
//! - My list, VIP plans and the profile screen
//! - Admin console with refresh-after-mutation
//!
//! # Example
//!
//! ```rust,ignore
//! use reel_core::prelude::*;
//!
//! # async fn example(series_id: SeriesId) -> StorefrontResult<()> {
//! let store = Storefront::in_memory(StorefrontConfig::default());
//! let signed = store.sign_up("viewer@reel.example", "secret1").await?;
//!
//! if let Outcome::Render(view) = store.player(Some(&signed.session), series_id).await? {
//!     println!("{} of {} episodes locked", view.locked_count(), view.slots.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod account;
pub mod admin;
pub mod config;
pub mod error;
pub mod home;
pub mod identity;
pub mod my_list;
pub mod navigation;
pub mod player;
pub mod profile;
pub mod storefront;
pub mod vip;

// Re-exports for convenience
pub use account::ProfileView;
pub use admin::{AdminAccess, AdminConsole, AdminSnapshot, AdminStats};
pub use config::{
    AdminConfig, BackendConfig, BackendEndpoint, Environment, HomeConfig, PlayerConfig,
    StorefrontConfig,
};
pub use error::{AuthError, ConfigError, StorefrontError, StorefrontResult};
pub use home::{CategoryFilter, HomeFeed};
pub use identity::{AuthUser, IdentityProvider, LocalIdentityProvider, Session};
pub use navigation::{Outcome, Route};
pub use player::{embed_url, EpisodeSlot, PlayerView, Surface};
pub use profile::{load_viewer, resolve_viewer, vip_active_at};
pub use storefront::{Backends, SignedIn, Storefront};
pub use vip::VipPage;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the storefront
    pub use crate::{
        CategoryFilter, Outcome, PlayerView, Route, Session, Storefront, StorefrontConfig,
        StorefrontError, StorefrontResult, Surface,
    };
    pub use reel_entitlement::{DecisionReason, EntitlementDecision, EntitlementPolicy, Viewer};
    pub use reel_store::{Episode, Series, SeriesId, UserId};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
