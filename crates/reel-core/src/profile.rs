//! Viewer resolution from profile rows

use chrono::{DateTime, Utc};
use reel_entitlement::Viewer;
use reel_store::{ProfileStore, UserId, UserProfile};

/// Whether a profile's subscription is live at `now`
///
/// A VIP flag with an expiry in the past is treated as lapsed.
#[inline]
#[must_use]
pub fn vip_active_at(profile: &UserProfile, now: DateTime<Utc>) -> bool {
    profile.is_vip && profile.vip_expiry.map_or(true, |expiry| expiry > now)
}

/// Build the gate's viewer from a (possibly missing) profile
#[must_use]
pub fn resolve_viewer(profile: Option<&UserProfile>, now: DateTime<Utc>) -> Viewer {
    match profile {
        Some(profile) => Viewer::new(profile.id, vip_active_at(profile, now), profile.vip_expiry),
        None => Viewer::unresolved(),
    }
}

/// Fetch a profile and resolve the viewer, failing closed
///
/// A missing row or a failed fetch yields an unresolved viewer carrying only
/// the id; the gate then treats the viewer as non-VIP.
pub async fn load_viewer(
    profiles: &dyn ProfileStore,
    user_id: UserId,
    now: DateTime<Utc>,
) -> (Viewer, Option<UserProfile>) {
    match profiles.profile(user_id).await {
        Ok(Some(profile)) => (resolve_viewer(Some(&profile), now), Some(profile)),
        Ok(None) => {
            tracing::warn!(%user_id, "No profile row, treating viewer as non-VIP");
            (Viewer::unresolved().with_id(user_id), None)
        }
        Err(e) => {
            tracing::warn!(%user_id, error = %e, "Profile fetch failed, treating viewer as non-VIP");
            (Viewer::unresolved().with_id(user_id), None)
        }
    }
}
