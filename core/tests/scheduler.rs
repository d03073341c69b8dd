//! Tick scheduler tests: cadence, publication, and guaranteed stop.

use orbit_core::{
    engine::SimEngine,
    error::SimError,
    scheduler::{self, ManualTicker},
};
use std::time::Duration;

#[tokio::test]
async fn manual_ticks_publish_snapshots() {
    let engine = SimEngine::build_test(0x71C).unwrap();
    let (ticker, source) = ManualTicker::channel();
    let handle = scheduler::start_with_source(engine, source);
    let mut rx = handle.subscribe();

    for expected in 1..=3 {
        ticker.tick().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().tick, expected);
    }
    assert_eq!(handle.current_tick(), 3);

    let engine = handle.stop().await.unwrap();
    assert_eq!(engine.current_tick(), 3);
}

#[tokio::test]
async fn ticks_after_stop_have_no_effect() {
    let engine = SimEngine::build_test(0x5709).unwrap();
    let (ticker, source) = ManualTicker::channel();
    let handle = scheduler::start_with_source(engine, source);
    let mut rx = handle.subscribe();

    ticker.tick().await.unwrap();
    rx.changed().await.unwrap();
    let last = rx.borrow_and_update().clone();

    let engine = handle.stop().await.unwrap();

    for _ in 0..5 {
        let err = ticker.tick().await.unwrap_err();
        assert!(matches!(err, SimError::SchedulerStopped));
    }
    assert_eq!(*engine.snapshot(), *last);
    assert_eq!(rx.borrow().tick, 1);
    assert!(!rx.has_changed().unwrap_or(false));
}

#[tokio::test(start_paused = true)]
async fn interval_drives_ticks_at_configured_cadence() {
    let engine = SimEngine::build_test(0xCADE).unwrap();
    assert_eq!(engine.config().tick_interval_ms, 2000);
    let handle = scheduler::start(engine);

    tokio::time::sleep(Duration::from_millis(6_500)).await;
    assert_eq!(handle.current_tick(), 3);
    assert!(handle.is_running());

    let engine = handle.stop().await.unwrap();
    let stopped_at = engine.current_tick();
    let snapshot = engine.snapshot();

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(engine.current_tick(), stopped_at);
    assert_eq!(*engine.snapshot(), *snapshot);
}

#[tokio::test]
async fn stopped_engine_can_keep_running_by_hand() {
    let engine = SimEngine::build_test(0xBEEF).unwrap();
    let (_ticker, source) = ManualTicker::channel();
    let handle = scheduler::start_with_source(engine, source);

    let mut engine = handle.stop().await.unwrap();
    assert_eq!(engine.current_tick(), 0);
    engine.run_ticks(2).unwrap();
    assert_eq!(engine.current_tick(), 2);
}
