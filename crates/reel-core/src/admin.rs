//! Admin console
//!
//! Access is granted to allow-listed emails and to profiles with the
//! `admin` role. Every mutation is followed by a refetch, and the fresh data
//! is what the caller gets back.

use crate::config::AdminConfig;
use crate::error::StorefrontResult;
use crate::identity::AuthUser;
use crate::vip::plan_expiry;
use chrono::{DateTime, Utc};
use reel_store::{
    CatalogProvider, Episode, EpisodeId, EpisodeUpdate, NewEpisode, NewSeries, PlanId,
    ProfileStore, Series, SeriesId, StoreError, UserId, UserProfile,
};
use serde::Serialize;

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub series: usize,
    pub episodes: usize,
    pub vips: usize,
}

/// Dashboard contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSnapshot {
    /// Newest first
    pub series: Vec<Series>,
    pub stats: AdminStats,
}

/// Result of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAccess {
    Granted,
    Denied,
}

/// Decide console access for an authenticated user
///
/// Profile fetch failures deny access.
pub async fn check_access(
    config: &AdminConfig,
    profiles: &dyn ProfileStore,
    user: &AuthUser,
) -> AdminAccess {
    if config.is_allowlisted(&user.email) {
        return AdminAccess::Granted;
    }
    match profiles.profile(user.id).await {
        Ok(Some(profile)) if profile.is_admin() => AdminAccess::Granted,
        Ok(_) => AdminAccess::Denied,
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "Profile fetch failed during admin check");
            AdminAccess::Denied
        }
    }
}

/// Authorised console handle
pub struct AdminConsole<'a> {
    catalog: &'a dyn CatalogProvider,
    profiles: &'a dyn ProfileStore,
    admin: AuthUser,
}

impl std::fmt::Debug for AdminConsole<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConsole")
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}

impl<'a> AdminConsole<'a> {
    /// Console for a user whose access has already been checked
    #[must_use]
    pub fn new(
        catalog: &'a dyn CatalogProvider,
        profiles: &'a dyn ProfileStore,
        admin: AuthUser,
    ) -> Self {
        Self {
            catalog,
            profiles,
            admin,
        }
    }

    #[inline]
    #[must_use]
    pub fn admin(&self) -> &AuthUser {
        &self.admin
    }

    /// Series list and counters
    ///
    /// # Errors
    /// Store failures
    pub async fn snapshot(&self) -> StorefrontResult<AdminSnapshot> {
        let series = self.catalog.list_series(&reel_store::SeriesQuery::all()).await?;
        let counts = self.catalog.counts().await?;
        let vips = self.profiles.count_vip().await?;
        Ok(AdminSnapshot {
            series,
            stats: AdminStats {
                series: counts.series,
                episodes: counts.episodes,
                vips,
            },
        })
    }

    /// Episodes of a series, ascending by number
    ///
    /// # Errors
    /// Store failures
    pub async fn episodes(&self, series_id: SeriesId) -> StorefrontResult<Vec<Episode>> {
        Ok(self.catalog.episodes(series_id).await?)
    }

    /// Create a series and return the refreshed dashboard
    ///
    /// # Errors
    /// Validation or store failures
    pub async fn add_series(&self, series: NewSeries) -> StorefrontResult<AdminSnapshot> {
        let row = self.catalog.insert_series(series).await?;
        tracing::info!(admin = %self.admin.email, series_id = %row.id, title = %row.title, "Series created");
        self.snapshot().await
    }

    /// Delete a series with its episodes and return the refreshed dashboard
    ///
    /// # Errors
    /// `NotFound` for an unknown series, or store failures
    pub async fn delete_series(&self, series_id: SeriesId) -> StorefrontResult<AdminSnapshot> {
        self.catalog.delete_series(series_id).await?;
        tracing::info!(admin = %self.admin.email, %series_id, "Series deleted");
        self.snapshot().await
    }

    /// Add an episode and return the refreshed dashboard
    ///
    /// An empty title is stored as `Episode {n}`.
    ///
    /// # Errors
    /// Invalid or duplicate episode number, unknown series, or store failures
    pub async fn add_episode(&self, episode: NewEpisode) -> StorefrontResult<AdminSnapshot> {
        let row = self.catalog.insert_episode(episode).await?;
        tracing::info!(
            admin = %self.admin.email,
            series_id = %row.series_id,
            number = row.episode_number,
            "Episode created"
        );
        self.snapshot().await
    }

    /// Edit an episode and return its series' refreshed episode list
    ///
    /// # Errors
    /// Invalid or duplicate episode number, unknown episode, or store failures
    pub async fn update_episode(
        &self,
        episode_id: EpisodeId,
        update: EpisodeUpdate,
    ) -> StorefrontResult<Vec<Episode>> {
        let row = self.catalog.update_episode(episode_id, update).await?;
        tracing::info!(admin = %self.admin.email, %episode_id, "Episode updated");
        self.episodes(row.series_id).await
    }

    /// Delete an episode and return its series' refreshed episode list
    ///
    /// # Errors
    /// `NotFound` for an unknown episode, or store failures
    pub async fn delete_episode(&self, episode_id: EpisodeId) -> StorefrontResult<Vec<Episode>> {
        let row = self
            .catalog
            .episode(episode_id)
            .await?
            .ok_or_else(|| StoreError::not_found("episodes", episode_id))?;
        self.catalog.delete_episode(episode_id).await?;
        tracing::info!(admin = %self.admin.email, %episode_id, "Episode deleted");
        self.episodes(row.series_id).await
    }

    /// Grant VIP for a plan's duration starting at `now`
    ///
    /// # Errors
    /// `NotFound` for an unknown plan or user, or store failures
    pub async fn grant_vip(
        &self,
        user_id: UserId,
        plan_id: PlanId,
        now: DateTime<Utc>,
    ) -> StorefrontResult<UserProfile> {
        let plan = self
            .catalog
            .vip_plans()
            .await?
            .into_iter()
            .find(|p| p.id == plan_id)
            .ok_or_else(|| StoreError::not_found("vip_plans", plan_id))?;
        let expiry = plan_expiry(&plan, now);
        let profile = self.profiles.set_vip(user_id, true, Some(expiry)).await?;
        tracing::info!(admin = %self.admin.email, %user_id, plan = %plan.name, %expiry, "VIP granted");
        Ok(profile)
    }

    /// Remove VIP
    ///
    /// # Errors
    /// `NotFound` for an unknown user, or store failures
    pub async fn revoke_vip(&self, user_id: UserId) -> StorefrontResult<UserProfile> {
        let profile = self.profiles.set_vip(user_id, false, None).await?;
        tracing::info!(admin = %self.admin.email, %user_id, "VIP revoked");
        Ok(profile)
    }
}
