//! In-memory backend
//!
//! Implements every provider contract over plain tables guarded by
//! `parking_lot` locks. Locks are never held across an `.await`.

use crate::error::{StoreError, StoreResult};
use crate::provider::{CatalogCounts, CatalogProvider, ListStore, ProfileStore, SeriesQuery};
use crate::seed::CatalogSeed;
use crate::types::{
    Bookmark, Category, Episode, EpisodeId, EpisodeUpdate, NewEpisode, NewSeries, NewVipPlan,
    PlanId, Series, SeriesId, UserId, UserProfile, VipPlan,
};
use crate::validation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// Backing tables, rows kept in insertion order
#[derive(Debug, Default)]
struct Tables {
    series: Vec<Series>,
    episodes: Vec<Episode>,
    plans: Vec<VipPlan>,
    categories: Vec<Category>,
    profiles: Vec<UserProfile>,
    bookmarks: Vec<Bookmark>,
}

/// In-memory implementation of the backend contracts
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<Tables>,
}

impl MemoryBackend {
    /// Create empty backend
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create backend seeded with the standard VIP plans
    #[must_use]
    pub fn with_default_plans() -> Self {
        let backend = Self::new();
        {
            let mut tables = backend.tables.write();
            tables.plans = default_vip_plans();
        }
        backend
    }

    /// Create backend from a seed, validating every series and episode
    ///
    /// # Errors
    /// - `StoreError::Validation` for blank series fields or repeated series ids
    /// - `StoreError::DuplicateProfile` for repeated profile ids
    /// - `StoreError::InvalidEpisodeNumber` for episode numbers below 1
    /// - `StoreError::DuplicateEpisodeNumber` for repeated numbers in a series
    /// - `StoreError::NotFound` for episodes whose series is not in the seed
    pub fn from_seed(seed: CatalogSeed) -> StoreResult<Self> {
        let mut tables = Tables {
            plans: if seed.plans.is_empty() {
                default_vip_plans()
            } else {
                seed.plans
            },
            categories: seed.categories,
            ..Tables::default()
        };

        for series in seed.series {
            validation::validate_series(&series)?;
            if tables.series.iter().any(|s| s.id == series.id) {
                return Err(StoreError::Validation(format!(
                    "series {} appears twice in seed",
                    series.id
                )));
            }
            tables.series.push(series);
        }

        for profile in seed.profiles {
            if tables.profiles.iter().any(|p| p.id == profile.id) {
                return Err(StoreError::DuplicateProfile(profile.id));
            }
            tables.profiles.push(profile);
        }

        for episode in seed.episodes {
            validation::validate_episode_number(episode.episode_number)?;
            validation::validate_video_url(&episode.video_url)?;
            if !tables.series.iter().any(|s| s.id == episode.series_id) {
                return Err(StoreError::not_found("series", episode.series_id));
            }
            validation::ensure_unique_number(
                episode.series_id,
                episode.episode_number,
                None,
                &tables.episodes,
            )?;
            tables.episodes.push(episode);
        }

        tracing::debug!(
            series = tables.series.len(),
            episodes = tables.episodes.len(),
            profiles = tables.profiles.len(),
            "Loaded catalog seed"
        );

        Ok(Self {
            tables: RwLock::new(tables),
        })
    }
}

/// Plans offered on the VIP page when the backend has none configured
#[must_use]
pub fn default_vip_plans() -> Vec<VipPlan> {
    let now = Utc::now();
    let plan = |name: &str, duration_days: u32, price: u32, is_popular: bool| VipPlan {
        id: PlanId::new(),
        name: name.to_string(),
        duration_days,
        price,
        features: vec!["Unlimited episodes".to_string(), "No locks".to_string()],
        is_popular,
        created_at: now,
    };

    vec![
        plan("Weekly Access", 7, 99, false),
        plan("Monthly Access", 30, 299, true),
        plan("Annual Access", 365, 999, false),
    ]
}

/// Newest first; rows with equal timestamps keep newest-inserted first
fn newest_first(rows: impl DoubleEndedIterator<Item = Series>) -> Vec<Series> {
    let mut out: Vec<Series> = rows.rev().collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

#[async_trait]
impl CatalogProvider for MemoryBackend {
    async fn list_series(&self, query: &SeriesQuery) -> StoreResult<Vec<Series>> {
        let tables = self.tables.read();
        Ok(newest_first(
            tables.series.iter().filter(|s| query.matches(s)).cloned(),
        ))
    }

    async fn series(&self, id: SeriesId) -> StoreResult<Option<Series>> {
        Ok(self.tables.read().series.iter().find(|s| s.id == id).cloned())
    }

    async fn series_by_ids(&self, ids: &[SeriesId]) -> StoreResult<Vec<Series>> {
        let tables = self.tables.read();
        Ok(ids
            .iter()
            .filter_map(|id| tables.series.iter().find(|s| s.id == *id).cloned())
            .collect())
    }

    async fn episodes(&self, series_id: SeriesId) -> StoreResult<Vec<Episode>> {
        let tables = self.tables.read();
        let mut out: Vec<Episode> = tables
            .episodes
            .iter()
            .filter(|e| e.series_id == series_id)
            .cloned()
            .collect();
        out.sort_by_key(|e| e.episode_number);
        Ok(out)
    }

    async fn episode(&self, id: EpisodeId) -> StoreResult<Option<Episode>> {
        Ok(self.tables.read().episodes.iter().find(|e| e.id == id).cloned())
    }

    async fn vip_plans(&self) -> StoreResult<Vec<VipPlan>> {
        let mut plans = self.tables.read().plans.clone();
        plans.sort_by_key(|p| p.price);
        Ok(plans)
    }

    async fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.read().categories.clone())
    }

    async fn insert_series(&self, series: NewSeries) -> StoreResult<Series> {
        validation::validate_new_series(&series)?;

        let row = Series {
            id: SeriesId::new(),
            title: series.title,
            description: series.description,
            thumbnail: series.thumbnail,
            category: series.category,
            is_trending: series.is_trending,
            is_premium: series.is_premium,
            dubbed: series.dubbed,
            created_at: Utc::now(),
        };
        self.tables.write().series.push(row.clone());
        tracing::debug!(series_id = %row.id, "Inserted series");
        Ok(row)
    }

    async fn delete_series(&self, id: SeriesId) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let before = tables.series.len();
        tables.series.retain(|s| s.id != id);
        if tables.series.len() == before {
            return Err(StoreError::not_found("series", id));
        }
        tables.episodes.retain(|e| e.series_id != id);
        tables.bookmarks.retain(|b| b.series_id != id);
        tracing::debug!(series_id = %id, "Deleted series");
        Ok(())
    }

    async fn insert_episode(&self, episode: NewEpisode) -> StoreResult<Episode> {
        let mut tables = self.tables.write();
        if !tables.series.iter().any(|s| s.id == episode.series_id) {
            return Err(StoreError::not_found("series", episode.series_id));
        }
        validation::validate_new_episode(&episode, &tables.episodes)?;

        let title = if episode.title.trim().is_empty() {
            format!("Episode {}", episode.episode_number)
        } else {
            episode.title
        };

        let row = Episode {
            id: EpisodeId::new(),
            series_id: episode.series_id,
            episode_number: episode.episode_number,
            title,
            video_url: episode.video_url,
            thumbnail: episode.thumbnail,
            duration_secs: episode.duration_secs,
            created_at: Utc::now(),
        };
        tables.episodes.push(row.clone());
        tracing::debug!(episode_id = %row.id, number = row.episode_number, "Inserted episode");
        Ok(row)
    }

    async fn update_episode(&self, id: EpisodeId, update: EpisodeUpdate) -> StoreResult<Episode> {
        let mut tables = self.tables.write();
        let current = tables
            .episodes
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("episodes", id))?;

        if let Some(number) = update.episode_number {
            validation::validate_episode_number(number)?;
            validation::ensure_unique_number(current.series_id, number, Some(id), &tables.episodes)?;
        }
        if let Some(url) = update.video_url.as_deref() {
            validation::validate_video_url(url)?;
        }

        let row = tables
            .episodes
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::not_found("episodes", id))?;
        if let Some(number) = update.episode_number {
            row.episode_number = number;
        }
        if let Some(title) = update.title {
            row.title = title;
        }
        if let Some(url) = update.video_url {
            row.video_url = url;
        }
        Ok(row.clone())
    }

    async fn delete_episode(&self, id: EpisodeId) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let before = tables.episodes.len();
        tables.episodes.retain(|e| e.id != id);
        if tables.episodes.len() == before {
            return Err(StoreError::not_found("episodes", id));
        }
        Ok(())
    }

    async fn insert_vip_plan(&self, plan: NewVipPlan) -> StoreResult<VipPlan> {
        validation::validate_new_plan(&plan)?;
        let row = VipPlan {
            id: PlanId::new(),
            name: plan.name,
            duration_days: plan.duration_days,
            price: plan.price,
            features: plan.features,
            is_popular: plan.is_popular,
            created_at: Utc::now(),
        };
        self.tables.write().plans.push(row.clone());
        Ok(row)
    }

    async fn counts(&self) -> StoreResult<CatalogCounts> {
        let tables = self.tables.read();
        Ok(CatalogCounts {
            series: tables.series.len(),
            episodes: tables.episodes.len(),
        })
    }
}

#[async_trait]
impl ProfileStore for MemoryBackend {
    async fn profile(&self, id: UserId) -> StoreResult<Option<UserProfile>> {
        Ok(self.tables.read().profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_profile(&self, profile: UserProfile) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if tables.profiles.iter().any(|p| p.id == profile.id) {
            return Err(StoreError::DuplicateProfile(profile.id));
        }
        tables.profiles.push(profile);
        Ok(())
    }

    async fn set_vip(
        &self,
        id: UserId,
        is_vip: bool,
        expiry: Option<DateTime<Utc>>,
    ) -> StoreResult<UserProfile> {
        let mut tables = self.tables.write();
        let profile = tables
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("users", id))?;
        profile.is_vip = is_vip;
        profile.vip_expiry = expiry;
        Ok(profile.clone())
    }

    async fn count_vip(&self) -> StoreResult<usize> {
        Ok(self.tables.read().profiles.iter().filter(|p| p.is_vip).count())
    }
}

#[async_trait]
impl ListStore for MemoryBackend {
    async fn add_bookmark(&self, user_id: UserId, series_id: SeriesId) -> StoreResult<Bookmark> {
        let mut tables = self.tables.write();
        if !tables.series.iter().any(|s| s.id == series_id) {
            return Err(StoreError::not_found("series", series_id));
        }
        if tables
            .bookmarks
            .iter()
            .any(|b| b.user_id == user_id && b.series_id == series_id)
        {
            return Err(StoreError::DuplicateBookmark { user_id, series_id });
        }
        let row = Bookmark {
            user_id,
            series_id,
            created_at: Utc::now(),
        };
        tables.bookmarks.push(row.clone());
        Ok(row)
    }

    async fn remove_bookmark(&self, user_id: UserId, series_id: SeriesId) -> StoreResult<bool> {
        let mut tables = self.tables.write();
        let before = tables.bookmarks.len();
        tables
            .bookmarks
            .retain(|b| !(b.user_id == user_id && b.series_id == series_id));
        Ok(tables.bookmarks.len() != before)
    }

    async fn is_bookmarked(&self, user_id: UserId, series_id: SeriesId) -> StoreResult<bool> {
        Ok(self
            .tables
            .read()
            .bookmarks
            .iter()
            .any(|b| b.user_id == user_id && b.series_id == series_id))
    }

    async fn bookmarks(&self, user_id: UserId) -> StoreResult<Vec<Bookmark>> {
        Ok(self
            .tables
            .read()
            .bookmarks
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }
}
