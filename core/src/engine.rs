//! The simulation engine — owns the telemetry store and the rules.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Security subsystem      (feeds, corridor alerts)
//!   2. Energy subsystem        (solar window, room load, wastage script)
//!   3. Transparency subsystem  (decision trail)
//!   4. Cleanliness subsystem   (hygiene scan rotation)
//!
//! RULES:
//!   - Rules execute in registration order, every tick.
//!   - No rule reads another rule's output; each works on its own part
//!     of the snapshot.
//!   - All randomness flows through the RngBank.
//!   - A rule that errors is skipped for that tick; the others still run.
//!   - The next snapshot is published only after every rule has run.

use crate::{
    clock::SimClock,
    config::SimConfig,
    cleanliness_subsystem::CleanlinessSubsystem,
    energy_subsystem::EnergySubsystem,
    error::SimResult,
    event::{event_type_name, SimEvent},
    rng::{RngBank, SubsystemRng, SubsystemSlot},
    security_subsystem::SecuritySubsystem,
    seed,
    snapshot::TelemetrySnapshot,
    store::{SharedSnapshot, TelemetryStore},
    subsystem::SimSubsystem,
    transparency_subsystem::TransparencySubsystem,
    types::Tick,
};
use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::watch;

struct RegisteredRule {
    slot:      SubsystemSlot,
    subsystem: Box<dyn SimSubsystem>,
    rng:       SubsystemRng,
}

pub struct SimEngine {
    pub clock:  SimClock,
    rng_bank:   RngBank,
    seed:       u64,
    config:     SimConfig,
    subsystems: Vec<RegisteredRule>,
    store:      TelemetryStore,
}

impl SimEngine {
    /// Engine over the fixed seed dataset, with no rules registered.
    pub fn new(config: SimConfig, seed: u64, started_at: NaiveDateTime) -> SimResult<Self> {
        let rng_bank = RngBank::new(seed);
        let mut seed_rng = rng_bank.for_subsystem(SubsystemSlot::Seed);
        let initial = seed::initial_snapshot(&config, &mut seed_rng);
        Self::with_snapshot(config, seed, started_at, initial)
    }

    /// Engine over a caller-supplied starting snapshot.
    pub fn with_snapshot(
        config: SimConfig,
        seed: u64,
        started_at: NaiveDateTime,
        mut initial: TelemetrySnapshot,
    ) -> SimResult<Self> {
        config.validate()?;
        // Log caps hold from tick 0, not from the first emission.
        initial
            .transparency_log
            .set_capacity(Some(config.transparency.log_capacity));
        initial.alert_log.set_capacity(config.alert_log_capacity);
        let mut clock = SimClock::new(started_at, config.tick_interval_ms);
        clock.current_tick = initial.tick;
        Ok(Self {
            clock,
            rng_bank: RngBank::new(seed),
            seed,
            config,
            subsystems: Vec::new(),
            store: TelemetryStore::new(initial),
        })
    }

    /// Build a fully wired engine with all rules registered.
    /// Call this instead of new() + manual register() calls.
    pub fn build(config: SimConfig, seed: u64, started_at: NaiveDateTime) -> SimResult<Self> {
        let mut engine = SimEngine::new(config, seed, started_at)?;
        engine.register_all();
        Ok(engine)
    }

    /// Fully wired engine with reference config and a fixed start time.
    pub fn build_test(seed: u64) -> SimResult<Self> {
        Self::build(SimConfig::default_test(), seed, test_epoch())
    }

    /// Register the standard rules on an engine made with new() or
    /// with_snapshot().
    pub fn register_all(&mut self) {
        // EXECUTION ORDER — fixed, documented, never reordered.
        let cfg = self.config.clone();
        self.register(SubsystemSlot::Security, Box::new(SecuritySubsystem::new(cfg.security)));
        self.register(SubsystemSlot::Energy, Box::new(EnergySubsystem::new(cfg.energy)));
        self.register(
            SubsystemSlot::Transparency,
            Box::new(TransparencySubsystem::new(cfg.transparency)),
        );
        self.register(
            SubsystemSlot::Cleanliness,
            Box::new(CleanlinessSubsystem::new(cfg.cleanliness)),
        );
    }

    /// Register a rule. Call in the documented execution order.
    pub fn register(&mut self, slot: SubsystemSlot, subsystem: Box<dyn SimSubsystem>) {
        let rng = self.rng_bank.for_subsystem(slot);
        self.subsystems.push(RegisteredRule { slot, subsystem, rng });
    }

    /// Advance one tick. This is the core simulation step.
    pub fn tick(&mut self) -> SimResult<Vec<SimEvent>> {
        let current_tick = self.clock.advance();
        let mut tick_events = vec![SimEvent::TickStarted { tick: current_tick }];

        let mut next = TelemetrySnapshot::clone(&self.store.snapshot());
        next.tick = current_tick;

        for rule in &mut self.subsystems {
            // Each rule works on a staged copy so a failure cannot leave
            // a half-applied update behind.
            let mut staged = next.clone();
            match rule.subsystem.update(&self.clock, &mut staged, &mut rule.rng) {
                Ok(new_events) => {
                    next = staged;
                    for event in &new_events {
                        log::trace!(
                            "tick={current_tick} {} -> {}",
                            rule.slot.name(),
                            event_type_name(event)
                        );
                    }
                    tick_events.extend(new_events);
                }
                Err(err) => {
                    log::warn!(
                        "tick={current_tick} rule '{}' skipped: {err}",
                        rule.subsystem.name()
                    );
                    tick_events.push(SimEvent::RuleSkipped {
                        tick:   current_tick,
                        rule:   rule.subsystem.name().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        self.store.publish(next);
        tick_events.push(SimEvent::TickCompleted { tick: current_tick });
        Ok(tick_events)
    }

    /// Run n ticks in a loop. Used for testing and fast-forward.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> SharedSnapshot {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SharedSnapshot> {
        self.store.subscribe()
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Registered rule names, in execution order.
    pub fn subsystem_names(&self) -> Vec<&'static str> {
        self.subsystems.iter().map(|r| r.subsystem.name()).collect()
    }

    /// Typed access to a registered rule. Tests and tooling only.
    pub fn subsystem<T: 'static>(&self) -> Option<&T> {
        self.subsystems
            .iter()
            .find_map(|r| r.subsystem.as_any().downcast_ref::<T>())
    }
}

/// Fixed start time so test timestamps are stable.
pub fn test_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 9, 2)
        .and_then(|d| d.and_hms_opt(10, 42, 0))
        .unwrap_or_default()
}
