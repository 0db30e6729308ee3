//! Profile screen

use crate::navigation::Route;
use chrono::{DateTime, Utc};
use reel_entitlement::Viewer;
use reel_store::{UserProfile, UserRole};
use serde::Serialize;

/// Profile screen contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub email: String,
    pub role: UserRole,
    pub vip_active: bool,
    pub vip_expiry: Option<DateTime<Utc>>,
    /// Upgrade call to action, shown to non-VIP viewers
    pub upgrade: Option<Route>,
}

impl ProfileView {
    /// Build from the session email, the resolved viewer and the profile row if any
    #[must_use]
    pub fn new(email: &str, viewer: &Viewer, profile: Option<&UserProfile>) -> Self {
        let vip_active = viewer.vip_active();
        Self {
            email: profile.map_or_else(|| email.to_string(), |p| p.email.clone()),
            role: profile.map(|p| p.role).unwrap_or_default(),
            vip_active,
            vip_expiry: viewer.vip_expiry,
            upgrade: (!vip_active).then_some(Route::Vip),
        }
    }
}
