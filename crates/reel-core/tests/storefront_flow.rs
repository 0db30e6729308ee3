use chrono::Utc;
use pretty_assertions::assert_eq;
use reel_core::prelude::*;
use reel_core::{AdminSnapshot, AdminStats, ConfigError, Environment, IdentityProvider};
use reel_store::{CatalogProvider, NewEpisode, NewSeries, ProfileStore};
use reel_test_utils::{
    add_series, make_vip, seeded_storefront, sign_up_admin, sign_up_viewer, TEST_PASSWORD,
};
use std::io::Write;

#[tokio::test]
async fn free_viewer_sees_upsell_from_episode_five() {
    let (store, _, series) = seeded_storefront(StorefrontConfig::default()).await;
    let session = sign_up_viewer(&store, "viewer@reel.example").await;

    let view = store
        .player(Some(&session), series.id)
        .await
        .unwrap()
        .into_render()
        .unwrap();

    let reasons: Vec<DecisionReason> = view.slots.iter().map(|s| s.decision.reason).collect();
    assert_eq!(
        reasons,
        vec![
            DecisionReason::Free,
            DecisionReason::Free,
            DecisionReason::Free,
            DecisionReason::Free,
            DecisionReason::VipRequired,
            DecisionReason::VipRequired,
        ]
    );
    for slot in &view.slots[4..] {
        assert_eq!(slot.surface, Surface::Locked { upgrade: Route::Vip });
    }
    match &view.slots[0].surface {
        Surface::Playable { embed_url } => assert!(embed_url.ends_with("?autoplay=1&mute=0")),
        Surface::Locked { .. } => panic!("first episode must be playable"),
    }
    assert!(!view.vip_badge());
}

#[tokio::test]
async fn vip_upgrade_unlocks_on_next_load() {
    let (store, _, series) = seeded_storefront(StorefrontConfig::default()).await;
    let session = sign_up_viewer(&store, "viewer@reel.example").await;

    let before = store.player(Some(&session), series.id).await.unwrap().into_render().unwrap();
    assert_eq!(before.locked_count(), 2);

    make_vip(&store, session.user_id()).await;

    let after = store.player(Some(&session), series.id).await.unwrap().into_render().unwrap();
    assert_eq!(after.locked_count(), 0);
    assert!(after.vip_badge());
    assert_eq!(after.slots[4].decision.reason, DecisionReason::VipActive);
    assert_eq!(after.slots[0].decision.reason, DecisionReason::Free);
}

#[tokio::test]
async fn lapsed_vip_is_locked_again() {
    let (store, _, series) = seeded_storefront(StorefrontConfig::default()).await;
    let session = sign_up_viewer(&store, "viewer@reel.example").await;
    store
        .backends()
        .profiles
        .set_vip(session.user_id(), true, Some(Utc::now() - chrono::Duration::hours(1)))
        .await
        .unwrap();

    let view = store.player(Some(&session), series.id).await.unwrap().into_render().unwrap();
    assert_eq!(view.locked_count(), 2);
}

#[tokio::test]
async fn account_without_profile_fails_closed() {
    let (store, _, series) = seeded_storefront(StorefrontConfig::default()).await;
    // identity only, no profile row
    let session = store
        .backends()
        .identity
        .sign_up("orphan@reel.example", TEST_PASSWORD)
        .await
        .unwrap();

    let view = store.player(Some(&session), series.id).await.unwrap().into_render().unwrap();
    assert!(!view.viewer.is_resolved());
    assert_eq!(view.locked_count(), 2);
}

#[tokio::test]
async fn configured_threshold_moves_the_lock() {
    let config = StorefrontConfig::default()
        .with_policy(EntitlementPolicy::new().with_lock_threshold(3));
    let (store, _, series) = seeded_storefront(config).await;
    let session = sign_up_viewer(&store, "viewer@reel.example").await;

    let view = store.player(Some(&session), series.id).await.unwrap().into_render().unwrap();
    assert_eq!(view.locked_count(), 4);
}

#[tokio::test]
async fn storefront_gate_matches_player_slots() {
    let config = StorefrontConfig::default()
        .with_policy(EntitlementPolicy::new().with_lock_threshold(3));
    let (store, backend, series) = seeded_storefront(config).await;
    assert_eq!(store.policy().lock_threshold, 3);

    let episodes = backend.episodes(series.id).await.unwrap();
    let third = &episodes[2];
    assert_eq!(third.episode_number, 3);
    assert_eq!(
        store.evaluate(&Viewer::free(), third),
        EntitlementDecision::vip_required()
    );
    assert_eq!(store.evaluate(&Viewer::vip(), third), EntitlementDecision::vip_active());
    assert_eq!(store.evaluate(&Viewer::unresolved(), &episodes[1]), EntitlementDecision::free());

    let session = sign_up_viewer(&store, "viewer@reel.example").await;
    let view = store.player(Some(&session), series.id).await.unwrap().into_render().unwrap();
    for slot in &view.slots {
        assert_eq!(slot.decision, store.evaluate(&view.viewer, &slot.episode));
    }
}

#[tokio::test]
async fn post_login_routing() {
    let (store, _, _) = seeded_storefront(StorefrontConfig::default()).await;
    sign_up_viewer(&store, "viewer@reel.example").await;
    sign_up_admin(&store, "editor@reel.example").await;

    let viewer = store.sign_in("viewer@reel.example", TEST_PASSWORD).await.unwrap();
    assert_eq!(viewer.landing, Route::Home);

    let admin = store.sign_in("EDITOR@reel.example", TEST_PASSWORD).await.unwrap();
    assert_eq!(admin.landing, Route::AdminPanel);

    let err = store.sign_in("viewer@reel.example", "wrong-pass").await.unwrap_err();
    assert!(matches!(err, StorefrontError::Auth(_)));
}

#[tokio::test]
async fn admin_console_access() {
    let config = StorefrontConfig::default().with_admin_email("ops@reel.example");
    let (store, _, _) = seeded_storefront(config).await;

    let viewer = sign_up_viewer(&store, "viewer@reel.example").await;
    assert_eq!(store.admin(Some(&viewer)).await.unwrap().redirect(), Some(Route::Home));

    let listed = sign_up_viewer(&store, "ops@reel.example").await;
    assert!(!store.admin(Some(&listed)).await.unwrap().is_redirect());

    let editor = sign_up_admin(&store, "editor@reel.example").await;
    assert!(!store.admin(Some(&editor)).await.unwrap().is_redirect());
}

#[tokio::test]
async fn admin_refreshes_after_every_mutation() {
    let (store, backend, seeded) = seeded_storefront(StorefrontConfig::default()).await;
    let editor = sign_up_admin(&store, "editor@reel.example").await;
    let console = store.admin(Some(&editor)).await.unwrap().into_render().unwrap();

    let AdminSnapshot { series, stats } = console.snapshot().await.unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(stats, AdminStats { series: 1, episodes: 6, vips: 0 });

    let snapshot = console
        .add_series(NewSeries::new("Steel Hearts", "Action").trending())
        .await
        .unwrap();
    assert_eq!(snapshot.series[0].title, "Steel Hearts");
    assert_eq!(snapshot.stats.series, 2);

    let snapshot = console
        .add_episode(NewEpisode::new(seeded.id, 7, "", "https://player.example/7"))
        .await
        .unwrap();
    assert_eq!(snapshot.stats.episodes, 7);

    let plan = backend.vip_plans().await.unwrap().remove(0);
    console.grant_vip(editor.user_id(), plan.id, Utc::now()).await.unwrap();
    assert_eq!(console.snapshot().await.unwrap().stats.vips, 1);

    let snapshot = console.delete_series(seeded.id).await.unwrap();
    assert_eq!(snapshot.stats, AdminStats { series: 1, episodes: 0, vips: 1 });
}

#[tokio::test]
async fn bookmarks_flow_into_my_list() {
    let (store, backend, first) = seeded_storefront(StorefrontConfig::default()).await;
    let second = add_series(&backend, "Moonlit Vows", "Romance", 2).await;
    let session = sign_up_viewer(&store, "viewer@reel.example").await;

    assert_eq!(
        store.toggle_bookmark(Some(&session), second.id).await.unwrap(),
        Outcome::Render(true)
    );
    store.toggle_bookmark(Some(&session), first.id).await.unwrap();

    let titles: Vec<String> = store
        .my_list(Some(&session))
        .await
        .unwrap()
        .into_render()
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["Moonlit Vows".to_string(), "Crown of Ashes".to_string()]);

    assert_eq!(
        store.toggle_bookmark(Some(&session), second.id).await.unwrap(),
        Outcome::Render(false)
    );
    let list = store.my_list(Some(&session)).await.unwrap().into_render().unwrap();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn home_feed_filters_and_trending() {
    let (store, backend, _) = seeded_storefront(StorefrontConfig::default()).await;
    backend
        .insert_series(NewSeries::new("Steel Hearts", "Action").trending())
        .await
        .unwrap();

    let feed = store.home(CategoryFilter::All).await.unwrap();
    assert_eq!(feed.series.len(), 2);
    assert_eq!(feed.trending.len(), 1);
    assert_eq!(feed.categories.first().map(String::as_str), Some("All"));

    let feed = store.home(CategoryFilter::from_label("Action")).await.unwrap();
    assert_eq!(feed.series.len(), 1);
    assert_eq!(feed.series[0].title, "Steel Hearts");
}

#[tokio::test]
async fn profile_screen_and_sign_out() {
    let (store, _, _) = seeded_storefront(StorefrontConfig::default()).await;
    let session = sign_up_viewer(&store, "viewer@reel.example").await;

    let view = store.profile(Some(&session)).await.unwrap().into_render().unwrap();
    assert_eq!(view.email, "viewer@reel.example");
    assert_eq!(view.upgrade, Some(Route::Vip));

    make_vip(&store, session.user_id()).await;
    let view = store.profile(Some(&session)).await.unwrap().into_render().unwrap();
    assert!(view.vip_active);
    assert_eq!(view.upgrade, None);

    assert_eq!(store.sign_out(&session).await.unwrap(), Route::Login);
    assert_eq!(store.profile(Some(&session)).await.unwrap().redirect(), Some(Route::Login));
}

#[tokio::test]
async fn vip_page_shows_viewer_state() {
    let (store, _, _) = seeded_storefront(StorefrontConfig::default()).await;
    let session = sign_up_viewer(&store, "viewer@reel.example").await;

    let page = store.vip_page(Some(&session)).await.unwrap();
    let prices: Vec<u32> = page.plans.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![99, 299, 999]);
    assert_eq!(page.viewer.map(|v| v.vip_active()), Some(false));
}

#[test]
fn config_file_with_env_overlay() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
environment = "development"

[backend]
url = "https://db.reel.example"

[home]
trending_limit = 3
categories = ["All", "Drama"]
"#
    )
    .unwrap();

    let config = StorefrontConfig::from_file(file.path())
        .unwrap()
        .with_env_overrides(|key| match key {
            "REEL_BACKEND_ANON_KEY" => Some("anon".to_string()),
            "REEL_ENV" => Some("production".to_string()),
            _ => None,
        })
        .unwrap();
    config.validate().unwrap();

    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.home.trending_limit, 3);
    let endpoint = config.backend_endpoint().unwrap();
    assert_eq!(endpoint.url, "https://db.reel.example");
    assert!(!endpoint.placeholder);
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = StorefrontConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
