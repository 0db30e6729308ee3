//! Backend provider contracts
//!
//! The hosted backend owns the query engine; these traits are the narrow
//! request/response surface the storefront consumes.

use crate::error::StoreResult;
use crate::types::{
    Bookmark, Category, Episode, EpisodeId, EpisodeUpdate, NewEpisode, NewSeries, NewVipPlan,
    Series, SeriesId, UserId, UserProfile, VipPlan,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Series listing filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesQuery {
    /// Only series in this category
    pub category: Option<String>,
    /// Only trending series
    pub trending_only: bool,
}

impl SeriesQuery {
    /// All series
    #[inline]
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// With category filter
    #[inline]
    #[must_use]
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Trending only
    #[inline]
    #[must_use]
    pub fn trending(mut self) -> Self {
        self.trending_only = true;
        self
    }

    /// Check whether a series passes the filter
    #[inline]
    #[must_use]
    pub fn matches(&self, series: &Series) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| series.category == c);
        category_ok && (!self.trending_only || series.is_trending)
    }
}

/// Row counts for the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCounts {
    pub series: usize,
    pub episodes: usize,
}

/// Catalog Provider: series, episodes, plans and categories
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Series matching `query`, newest first
    async fn list_series(&self, query: &SeriesQuery) -> StoreResult<Vec<Series>>;

    /// Single series
    async fn series(&self, id: SeriesId) -> StoreResult<Option<Series>>;

    /// Series for the given ids, in argument order; unknown ids are skipped
    async fn series_by_ids(&self, ids: &[SeriesId]) -> StoreResult<Vec<Series>>;

    /// Episodes of a series, ascending by episode number
    async fn episodes(&self, series_id: SeriesId) -> StoreResult<Vec<Episode>>;

    /// Single episode
    async fn episode(&self, id: EpisodeId) -> StoreResult<Option<Episode>>;

    /// VIP plans, cheapest first
    async fn vip_plans(&self) -> StoreResult<Vec<VipPlan>>;

    /// Browsing categories
    async fn categories(&self) -> StoreResult<Vec<Category>>;

    /// Insert series
    async fn insert_series(&self, series: NewSeries) -> StoreResult<Series>;

    /// Delete series together with its episodes and bookmarks
    async fn delete_series(&self, id: SeriesId) -> StoreResult<()>;

    /// Insert episode
    async fn insert_episode(&self, episode: NewEpisode) -> StoreResult<Episode>;

    /// Update episode fields
    async fn update_episode(&self, id: EpisodeId, update: EpisodeUpdate) -> StoreResult<Episode>;

    /// Delete episode
    async fn delete_episode(&self, id: EpisodeId) -> StoreResult<()>;

    /// Insert VIP plan
    async fn insert_vip_plan(&self, plan: NewVipPlan) -> StoreResult<VipPlan>;

    /// Row counts
    async fn counts(&self) -> StoreResult<CatalogCounts>;
}

/// Profile Provider: viewer identity rows and subscription state
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profile row for a user
    async fn profile(&self, id: UserId) -> StoreResult<Option<UserProfile>>;

    /// Insert profile row
    async fn insert_profile(&self, profile: UserProfile) -> StoreResult<()>;

    /// Set subscription state
    async fn set_vip(
        &self,
        id: UserId,
        is_vip: bool,
        expiry: Option<DateTime<Utc>>,
    ) -> StoreResult<UserProfile>;

    /// Number of profiles flagged VIP
    async fn count_vip(&self) -> StoreResult<usize>;
}

/// My-list bookmarks
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Add series to the user's list
    async fn add_bookmark(&self, user_id: UserId, series_id: SeriesId) -> StoreResult<Bookmark>;

    /// Remove series from the user's list; returns whether a row was removed
    async fn remove_bookmark(&self, user_id: UserId, series_id: SeriesId) -> StoreResult<bool>;

    /// Check membership
    async fn is_bookmarked(&self, user_id: UserId, series_id: SeriesId) -> StoreResult<bool>;

    /// User's bookmarks in insertion order
    async fn bookmarks(&self, user_id: UserId) -> StoreResult<Vec<Bookmark>>;
}
