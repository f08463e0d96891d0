//! Integration tests for the combo engine.
//!
//! These tests drive a full sorting session the way a renderer would:
//! actions in, snapshots and transition events out, with the decay
//! watchdog running for real on the tokio runtime.

use std::time::Duration;

use chrono::Utc;
use snapsift_core::{ComboConfig, ComboEvent, ComboLevel, ComboState, SortSession};

fn config(window_ms: u64) -> ComboConfig {
    ComboConfig {
        decay_window_ms: window_ms,
        ..ComboConfig::default()
    }
}

#[tokio::test]
async fn test_burst_then_idle_then_fresh_streak() {
    let session = SortSession::start(config(250)).unwrap();

    // A quick burst of keep/discard decisions.
    for _ in 0..6 {
        session.record_action(Utc::now());
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    let hot = session.state();
    assert_eq!(hot.count, 6);
    assert_eq!(hot.level, ComboLevel::Warm);
    assert!(hot.is_active);

    // Walk away; the watchdog clears the streak on its own.
    tokio::time::sleep(Duration::from_millis(700)).await;
    let cold = session.state();
    assert_eq!(cold, ComboState::cleared(cold.last_action_at));

    // Coming back starts over at 1.
    let fresh = session.record_action(Utc::now());
    assert_eq!(fresh.count, 1);
    assert_eq!(fresh.level, ComboLevel::Normal);

    session.shutdown();
}

#[tokio::test]
async fn test_subscription_reports_decay_as_streak_ended() {
    let session = SortSession::start(config(150)).unwrap();
    let mut rx = session.subscribe();

    session.record_action(Utc::now());

    let mut prev = ComboState::initial();
    let mut events = Vec::new();
    // Two pushes: the action, then the watchdog reset.
    for _ in 0..2 {
        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("push within the timeout")
            .expect("sender alive");
        let next = rx.borrow_and_update().clone();
        if let Some(event) = ComboEvent::from_transition(&prev, &next) {
            events.push(event);
        }
        prev = next;
    }

    assert!(matches!(events[0], ComboEvent::StreakStarted { count: 1, .. }));
    assert!(matches!(events[1], ComboEvent::StreakEnded { .. }));

    session.shutdown();
}

#[tokio::test]
async fn test_explicit_reset_beats_the_clock() {
    let session = SortSession::start(config(30_000)).unwrap();

    session.record_action(Utc::now());
    session.record_action(Utc::now());
    assert_eq!(session.state().count, 2);

    // The renderer cancels the run; no need to wait for the watchdog.
    let state = session.reset(Utc::now());
    assert!(!state.is_active);
    assert_eq!(state.count, 0);
    assert_eq!(state.level, ComboLevel::None);

    session.shutdown();
}

#[tokio::test]
async fn test_dropping_the_session_stops_the_watchdog() {
    let tracker_view;
    {
        let session = SortSession::start(config(100)).unwrap();
        session.record_action(Utc::now());
        tracker_view = session.subscribe();
        // Dropped here without shutdown.
    }

    tokio::time::sleep(Duration::from_millis(400)).await;

    // The armed timer died with the session: nobody reset the state.
    let state = tracker_view.borrow().clone();
    assert!(state.is_active);
    assert_eq!(state.count, 1);
}

#[tokio::test]
async fn test_config_thresholds_shape_the_run() {
    use snapsift_core::LevelThreshold;

    let config = ComboConfig {
        decay_window_ms: 10_000,
        thresholds: vec![
            LevelThreshold { min_count: 0, level: ComboLevel::None },
            LevelThreshold { min_count: 1, level: ComboLevel::Normal },
            LevelThreshold { min_count: 3, level: ComboLevel::Fire },
        ],
    };
    let session = SortSession::start(config).unwrap();

    session.record_action(Utc::now());
    session.record_action(Utc::now());
    assert_eq!(session.state().level, ComboLevel::Normal);
    let state = session.record_action(Utc::now());
    assert_eq!(state.level, ComboLevel::Fire);

    session.shutdown();
}
