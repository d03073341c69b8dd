//! Tick scheduler — drives the engine on a fixed cadence.
//!
//! The scheduler task takes sole ownership of the engine, so nothing else
//! can mutate the store while it runs. Readers follow along through the
//! snapshot watch channel.
//!
//! Stopping is a hard guarantee: `stop()` signals the task and waits for it
//! to exit, and the shutdown branch is polled before any tick branch. Once
//! `stop()` returns no further tick can run, and the engine is handed back.
//! Dropping the handle without calling `stop()` also ends the task.

use crate::{
    engine::SimEngine,
    error::{SimError, SimResult},
    store::SharedSnapshot,
    types::Tick,
};
use std::time::Duration;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

/// Where tick signals come from.
pub enum TickSource {
    /// A timer firing every period. The first tick lands one full
    /// period after start.
    Interval(Duration),
    /// Ticks pushed by hand through a [`ManualTicker`].
    Manual(mpsc::Receiver<()>),
}

/// Sender half of [`TickSource::Manual`].
#[derive(Clone)]
pub struct ManualTicker {
    tx: mpsc::Sender<()>,
}

impl ManualTicker {
    pub fn channel() -> (Self, TickSource) {
        let (tx, rx) = mpsc::channel(16);
        (Self { tx }, TickSource::Manual(rx))
    }

    /// Request one tick. Fails once the scheduler has stopped.
    pub async fn tick(&self) -> SimResult<()> {
        self.tx.send(()).await.map_err(|_| SimError::SchedulerStopped)
    }
}

pub struct SchedulerHandle {
    shutdown:  watch::Sender<bool>,
    task:      JoinHandle<SimEngine>,
    snapshots: watch::Receiver<SharedSnapshot>,
}

/// Start ticking at the engine's configured interval.
/// Must be called from inside a tokio runtime.
pub fn start(engine: SimEngine) -> SchedulerHandle {
    let period = Duration::from_millis(engine.config().tick_interval_ms);
    start_with_source(engine, TickSource::Interval(period))
}

pub fn start_with_source(mut engine: SimEngine, source: TickSource) -> SchedulerHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);
    let snapshots = engine.subscribe();

    let task = tokio::spawn(async move {
        log::info!("scheduler started at tick {}", engine.current_tick());
        match source {
            TickSource::Interval(period) => {
                let mut ticker = interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // interval() fires immediately once; swallow it.
                ticker.tick().await;
                loop {
                    tokio::select! {
                        biased;
                        _ = shutdown_rx.changed() => break,
                        _ = ticker.tick() => run_one(&mut engine),
                    }
                }
            }
            TickSource::Manual(mut rx) => loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    signal = rx.recv() => match signal {
                        Some(()) => run_one(&mut engine),
                        None => break,
                    },
                }
            },
        }
        log::info!("scheduler stopped at tick {}", engine.current_tick());
        engine
    });

    SchedulerHandle { shutdown, task, snapshots }
}

fn run_one(engine: &mut SimEngine) {
    // The engine already skips failing rules; an error here would mean the
    // tick as a whole failed, which must not end the session either.
    if let Err(err) = engine.tick() {
        log::warn!("tick={} failed: {err}", engine.current_tick());
    }
}

impl SchedulerHandle {
    /// The most recently published snapshot.
    pub fn snapshot(&self) -> SharedSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn current_tick(&self) -> Tick {
        self.snapshots.borrow().tick
    }

    /// Receiver notified after each tick's snapshot replacement.
    pub fn subscribe(&self) -> watch::Receiver<SharedSnapshot> {
        self.snapshots.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop ticking and wait for the task to exit. Returns the engine.
    pub async fn stop(self) -> SimResult<SimEngine> {
        // Err only if the task already exited and dropped its receiver.
        let _ = self.shutdown.send(true);
        self.task
            .await
            .map_err(|e| SimError::Other(anyhow::anyhow!("scheduler task failed: {e}")))
    }
}
