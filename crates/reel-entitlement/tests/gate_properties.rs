use chrono::Utc;
use proptest::prelude::*;
use reel_entitlement::{evaluate, DecisionReason, EntitlementDecision, EntitlementPolicy, Viewer, LOCK_THRESHOLD};
use reel_store::{Episode, EpisodeId, SeriesId, UserId};

fn episode(number: i32) -> Episode {
    Episode {
        id: EpisodeId::new(),
        series_id: SeriesId::new(),
        episode_number: number,
        title: format!("Episode {number}"),
        video_url: "https://player.example/embed".to_string(),
        thumbnail: String::new(),
        duration_secs: 90,
        created_at: Utc::now(),
    }
}

fn viewer_with(vip: Option<bool>) -> Viewer {
    Viewer {
        id: Some(UserId::new()),
        vip,
        vip_expiry: None,
    }
}

#[test]
fn scenario_free_viewer_first_episode() {
    let decision = evaluate(&Viewer::free(), &episode(1));
    assert_eq!(
        decision,
        EntitlementDecision {
            allowed: true,
            reason: DecisionReason::Free
        }
    );
}

#[test]
fn scenario_free_viewer_fifth_episode() {
    let decision = evaluate(&Viewer::free(), &episode(5));
    assert_eq!(
        decision,
        EntitlementDecision {
            allowed: false,
            reason: DecisionReason::VipRequired
        }
    );
}

#[test]
fn scenario_vip_viewer_fifth_episode() {
    let decision = evaluate(&Viewer::vip(), &episode(5));
    assert_eq!(
        decision,
        EntitlementDecision {
            allowed: true,
            reason: DecisionReason::VipActive
        }
    );
}

#[test]
fn scenario_vip_viewer_first_episode() {
    let decision = evaluate(&Viewer::vip(), &episode(1));
    assert_eq!(
        decision,
        EntitlementDecision {
            allowed: true,
            reason: DecisionReason::Free
        }
    );
}

#[test]
fn unresolved_vip_flag_on_episode_five_is_denied() {
    let decision = evaluate(&viewer_with(None), &episode(5));
    assert!(!decision.allowed);
}

#[test]
fn upgrade_unlocks_on_next_evaluation() {
    let ep = episode(8);
    let id = UserId::new();

    let before = evaluate(&Viewer::new(id, false, None), &ep);
    assert!(before.is_locked());

    let after = evaluate(&Viewer::new(id, true, None), &ep);
    assert!(after.allowed);
}

#[test]
fn decision_serializes_to_contract_shape() {
    let json = serde_json::to_value(evaluate(&Viewer::free(), &episode(6))).unwrap();
    assert_eq!(json, serde_json::json!({ "allowed": false, "reason": "vip-required" }));
}

proptest! {
    #[test]
    fn prop_free_range_always_allowed(
        number in 1..LOCK_THRESHOLD,
        vip in prop_oneof![Just(None), Just(Some(false)), Just(Some(true))],
    ) {
        let decision = evaluate(&viewer_with(vip), &episode(number));
        prop_assert!(decision.allowed);
        prop_assert_eq!(decision.reason, DecisionReason::Free);
    }

    #[test]
    fn prop_gated_range_denied_without_vip(
        number in LOCK_THRESHOLD..10_000,
        vip in prop_oneof![Just(None), Just(Some(false))],
    ) {
        let decision = evaluate(&viewer_with(vip), &episode(number));
        prop_assert!(!decision.allowed);
        prop_assert_eq!(decision.reason, DecisionReason::VipRequired);
    }

    #[test]
    fn prop_gated_range_allowed_with_vip(number in LOCK_THRESHOLD..10_000) {
        let decision = evaluate(&viewer_with(Some(true)), &episode(number));
        prop_assert!(decision.allowed);
        prop_assert_eq!(decision.reason, DecisionReason::VipActive);
    }

    #[test]
    fn prop_evaluation_is_pure(
        number in -10i32..50,
        vip in prop_oneof![Just(None), Just(Some(false)), Just(Some(true))],
        threshold in 1i32..20,
    ) {
        let policy = EntitlementPolicy::new().with_lock_threshold(threshold);
        let viewer = viewer_with(vip);
        let ep = episode(number);
        let (viewer_before, ep_before) = (viewer, ep.clone());

        let first = policy.evaluate(&viewer, &ep);
        let second = policy.evaluate(&viewer, &ep);

        prop_assert_eq!(first, second);
        prop_assert_eq!(viewer, viewer_before);
        prop_assert_eq!(ep, ep_before);
    }

    #[test]
    fn prop_allowed_iff_free_or_vip(
        number in 1i32..100,
        vip in prop_oneof![Just(None), Just(Some(false)), Just(Some(true))],
    ) {
        let decision = evaluate(&viewer_with(vip), &episode(number));
        let expected = number < LOCK_THRESHOLD || vip == Some(true);
        prop_assert_eq!(decision.allowed, expected);
    }
}
