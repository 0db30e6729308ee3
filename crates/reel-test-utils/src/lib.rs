//! Testing utilities for the Reel workspace
//!
//! Shared fixtures: seeded backends, storefronts and signed-in sessions.

#![allow(missing_docs)]

use reel_core::{IdentityProvider, Session, Storefront, StorefrontConfig};
use reel_store::{
    CatalogProvider, MemoryBackend, NewEpisode, NewSeries, ProfileStore, Series, UserId,
    UserProfile, UserRole,
};
use std::sync::Arc;

/// Password used by every fixture account
pub const TEST_PASSWORD: &str = "secret123";

/// Insert a series with episodes `1..=episodes`
pub async fn add_series(
    backend: &MemoryBackend,
    title: &str,
    category: &str,
    episodes: i32,
) -> Series {
    let series = backend
        .insert_series(NewSeries::new(title, category))
        .await
        .unwrap();
    for n in 1..=episodes {
        backend
            .insert_episode(NewEpisode::new(
                series.id,
                n,
                "",
                format!("https://player.example/{}/{n}", series.id),
            ))
            .await
            .unwrap();
    }
    series
}

/// Backend with the standard plans and one six-episode drama
pub async fn seeded_backend() -> (Arc<MemoryBackend>, Series) {
    let backend = Arc::new(MemoryBackend::with_default_plans());
    let series = add_series(&backend, "Crown of Ashes", "Drama", 6).await;
    (backend, series)
}

/// Storefront over [`seeded_backend`]
pub async fn seeded_storefront(config: StorefrontConfig) -> (Storefront, Arc<MemoryBackend>, Series) {
    let (backend, series) = seeded_backend().await;
    let store = Storefront::with_memory_backend(config, backend.clone());
    (store, backend, series)
}

/// Register a regular viewer
pub async fn sign_up_viewer(store: &Storefront, email: &str) -> Session {
    store.sign_up(email, TEST_PASSWORD).await.unwrap().session
}

/// Register an account whose profile carries the admin role
pub async fn sign_up_admin(store: &Storefront, email: &str) -> Session {
    let session = store
        .backends()
        .identity
        .sign_up(email, TEST_PASSWORD)
        .await
        .unwrap();
    store
        .backends()
        .profiles
        .insert_profile(UserProfile::new(session.user.id, email).with_role(UserRole::Admin))
        .await
        .unwrap();
    session
}

/// Flip a profile to VIP with no expiry
pub async fn make_vip(store: &Storefront, user_id: UserId) {
    store
        .backends()
        .profiles
        .set_vip(user_id, true, None)
        .await
        .unwrap();
}
