//! Reel Store - backend records and provider contracts
//!
//! The storefront never talks to the hosted backend directly; it goes
//! through the traits in [`provider`]:
//! - [`CatalogProvider`] for series, episodes, plans and categories
//! - [`ProfileStore`] for viewer profiles and subscription state
//! - [`ListStore`] for per-user bookmarks
//!
//! Catalog writes are validated at this boundary ([`validation`]), so
//! episode numbers reaching downstream consumers are 1-based and unique per
//! series.
//!
//! # Example
//!
//! ```rust,ignore
//! use reel_store::{CatalogProvider, MemoryBackend, NewEpisode, NewSeries};
//!
//! # async fn example() -> Result<(), reel_store::StoreError> {
//! let backend = MemoryBackend::with_default_plans();
//! let series = backend.insert_series(NewSeries::new("Crown of Ashes", "Drama")).await?;
//! backend
//!     .insert_episode(NewEpisode::new(series.id, 1, "", "https://player.example/1"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod memory;
pub mod provider;
pub mod seed;
pub mod types;
pub mod validation;

pub use error::{StoreError, StoreResult};
pub use memory::{default_vip_plans, MemoryBackend};
pub use provider::{CatalogCounts, CatalogProvider, ListStore, ProfileStore, SeriesQuery};
pub use seed::CatalogSeed;
pub use types::{
    Bookmark, Category, Episode, EpisodeId, EpisodeUpdate, NewEpisode, NewSeries, NewVipPlan,
    PlanId, Series, SeriesId, UserId, UserProfile, UserRole, VipPlan,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
