//! Player screen
//!
//! Every load re-reads the viewer's profile and re-runs the gate for each
//! episode, so an upgrade shows up on the next load without any cached
//! lock state.

use crate::config::PlayerConfig;
use crate::error::StorefrontResult;
use crate::navigation::Route;
use crate::profile::load_viewer;
use chrono::{DateTime, Utc};
use reel_entitlement::{EntitlementDecision, EntitlementPolicy, Viewer};
use reel_store::{CatalogProvider, Episode, ListStore, ProfileStore, Series, SeriesId, UserId};
use serde::Serialize;

/// Append autoplay parameters to an embed URL
#[must_use]
pub fn embed_url(video_url: &str, params: &str) -> String {
    if params.is_empty() {
        return video_url.to_string();
    }
    let separator = if video_url.contains('?') { '&' } else { '?' };
    format!("{video_url}{separator}{params}")
}

/// What the slot for one episode shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Surface {
    /// Embedded player
    Playable { embed_url: String },
    /// Upsell card; `upgrade` is where the call to action leads
    Locked { upgrade: Route },
}

impl Surface {
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }
}

/// One episode with its decision and surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeSlot {
    pub episode: Episode,
    pub decision: EntitlementDecision,
    pub surface: Surface,
}

impl EpisodeSlot {
    /// Map a gate decision to a surface
    #[must_use]
    pub fn new(episode: Episode, decision: EntitlementDecision, config: &PlayerConfig) -> Self {
        let surface = if decision.allowed {
            Surface::Playable {
                embed_url: embed_url(&episode.video_url, &config.autoplay_params),
            }
        } else {
            Surface::Locked {
                upgrade: Route::Vip,
            }
        };
        Self {
            episode,
            decision,
            surface,
        }
    }
}

/// Player screen contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    /// `None` when the series does not exist
    pub series: Option<Series>,
    pub viewer: Viewer,
    /// One slot per episode, ascending by number
    pub slots: Vec<EpisodeSlot>,
    pub bookmarked: bool,
}

impl PlayerView {
    /// Whether the VIP badge is shown
    #[inline]
    #[must_use]
    pub fn vip_badge(&self) -> bool {
        self.viewer.vip_active()
    }

    /// Count of locked slots
    #[must_use]
    pub fn locked_count(&self) -> usize {
        self.slots.iter().filter(|s| s.surface.is_locked()).count()
    }
}

/// Build slots for already-loaded episodes
#[must_use]
pub fn build_slots(
    policy: &EntitlementPolicy,
    config: &PlayerConfig,
    viewer: &Viewer,
    episodes: Vec<Episode>,
) -> Vec<EpisodeSlot> {
    episodes
        .into_iter()
        .map(|episode| {
            let decision = policy.evaluate(viewer, &episode);
            EpisodeSlot::new(episode, decision, config)
        })
        .collect()
}

/// Player service over the backend contracts
pub struct PlayerService<'a> {
    pub catalog: &'a dyn CatalogProvider,
    pub profiles: &'a dyn ProfileStore,
    pub lists: &'a dyn ListStore,
    pub policy: EntitlementPolicy,
    pub config: &'a PlayerConfig,
}

impl PlayerService<'_> {
    /// Load the player for a series
    ///
    /// # Errors
    /// Store failures reading the series or its episodes. Profile and
    /// bookmark failures do not error: they fail closed.
    pub async fn open(
        &self,
        user_id: UserId,
        series_id: SeriesId,
        now: DateTime<Utc>,
    ) -> StorefrontResult<PlayerView> {
        let (viewer, _) = load_viewer(self.profiles, user_id, now).await;
        let series = self.catalog.series(series_id).await?;
        let episodes = self.catalog.episodes(series_id).await?;

        let bookmarked = match self.lists.is_bookmarked(user_id, series_id).await {
            Ok(flag) => flag,
            Err(e) => {
                tracing::warn!(%user_id, %series_id, error = %e, "Bookmark lookup failed");
                false
            }
        };

        let slots = build_slots(&self.policy, self.config, &viewer, episodes);
        tracing::debug!(
            %series_id,
            episodes = slots.len(),
            locked = slots.iter().filter(|s| s.surface.is_locked()).count(),
            vip = viewer.vip_active(),
            "Opened player"
        );

        Ok(PlayerView {
            series,
            viewer,
            slots,
            bookmarked,
        })
    }

    /// Add or remove the series from my list; returns the new state
    ///
    /// # Errors
    /// Store failures, including `NotFound` for an unknown series
    pub async fn toggle_bookmark(
        &self,
        user_id: UserId,
        series_id: SeriesId,
    ) -> StorefrontResult<bool> {
        if self.lists.is_bookmarked(user_id, series_id).await? {
            self.lists.remove_bookmark(user_id, series_id).await?;
            tracing::debug!(%user_id, %series_id, "Removed from my list");
            Ok(false)
        } else {
            self.lists.add_bookmark(user_id, series_id).await?;
            tracing::debug!(%user_id, %series_id, "Added to my list");
            Ok(true)
        }
    }
}
