//! Core records for the storefront backend
//!
//! Mirrors the hosted tables:
//! - `users` (viewer profiles and roles)
//! - `series` and `episodes` (the catalog)
//! - `vip_plans` and `categories`
//! - `my_list` (per-user bookmarks)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique user identifier (assigned by the identity provider)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate new user ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique series identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(pub Uuid);

impl SeriesId {
    /// Generate new series ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SeriesId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SeriesId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Unique episode identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(pub Uuid);

impl EpisodeId {
    /// Generate new episode ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EpisodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique VIP plan identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub Uuid);

impl PlanId {
    /// Generate new plan ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role stored on the profile row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular viewer
    #[default]
    User,
    /// Content administrator
    Admin,
}

/// Viewer profile (`users` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    #[serde(rename = "user_role", default)]
    pub role: UserRole,
    #[serde(default)]
    pub is_vip: bool,
    #[serde(default)]
    pub vip_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh non-VIP viewer profile
    #[inline]
    #[must_use]
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role: UserRole::User,
            is_vip: false,
            vip_expiry: None,
            created_at: Utc::now(),
        }
    }

    /// With role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// With VIP flag and optional expiry
    #[inline]
    #[must_use]
    pub fn with_vip(mut self, is_vip: bool, expiry: Option<DateTime<Utc>>) -> Self {
        self.is_vip = is_vip;
        self.vip_expiry = expiry;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Series record (`series` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    pub category: String,
    #[serde(default)]
    pub is_trending: bool,
    /// Series-level premium flag, authored by administrators
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub dubbed: bool,
    pub created_at: DateTime<Utc>,
}

/// Episode record (`episodes` table)
///
/// `episode_number` is 1-based and unique within a series once it has passed
/// catalog validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub series_id: SeriesId,
    pub episode_number: i32,
    pub title: String,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default, rename = "duration")]
    pub duration_secs: u32,
    pub created_at: DateTime<Utc>,
}

/// VIP subscription plan (`vip_plans` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VipPlan {
    pub id: PlanId,
    pub name: String,
    pub duration_days: u32,
    /// Price in the smallest display unit (whole rupees)
    pub price: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
    pub created_at: DateTime<Utc>,
}

/// Browsing category (`categories` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// My-list entry (`my_list` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub user_id: UserId,
    pub series_id: SeriesId,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSeries {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    pub category: String,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub dubbed: bool,
}

impl NewSeries {
    /// Create insert payload with required fields
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            thumbnail: String::new(),
            category: category.into(),
            is_trending: false,
            is_premium: false,
            dubbed: false,
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With poster thumbnail
    #[inline]
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    /// Mark as trending
    #[inline]
    #[must_use]
    pub fn trending(mut self) -> Self {
        self.is_trending = true;
        self
    }

    /// Mark as premium
    #[inline]
    #[must_use]
    pub fn premium(mut self) -> Self {
        self.is_premium = true;
        self
    }
}

/// Insert payload for an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEpisode {
    pub series_id: SeriesId,
    pub episode_number: i32,
    pub title: String,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default, rename = "duration")]
    pub duration_secs: u32,
}

impl NewEpisode {
    /// Create insert payload; an empty title is filled in as `Episode {n}`
    #[inline]
    #[must_use]
    pub fn new(
        series_id: SeriesId,
        episode_number: i32,
        title: impl Into<String>,
        video_url: impl Into<String>,
    ) -> Self {
        Self {
            series_id,
            episode_number,
            title: title.into(),
            video_url: video_url.into(),
            thumbnail: String::new(),
            duration_secs: 0,
        }
    }
}

/// Partial update for an episode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeUpdate {
    pub episode_number: Option<i32>,
    pub title: Option<String>,
    pub video_url: Option<String>,
}

/// Insert payload for a VIP plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVipPlan {
    pub name: String,
    pub duration_days: u32,
    pub price: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
}
