//! Subsystem trait — one implementation per update rule.
//!
//! RULE: Every rule implements SimSubsystem.
//! The engine calls update() on each registered rule
//! in registration order, every tick.
//! Execution order is fixed and documented in engine.rs.

use crate::{
    clock::SimClock,
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    snapshot::TelemetrySnapshot,
};
use std::any::Any;

/// The contract every rule must fulfill.
pub trait SimSubsystem: Send {
    /// Unique stable name for this rule.
    fn name(&self) -> &'static str;

    /// Called once per tick by the engine.
    ///
    /// - `clock`: already advanced to the tick being computed
    /// - `next`:  a private copy of the previous snapshot; the rule
    ///            rewrites it into its part of the next snapshot
    /// - `rng`:   this rule's deterministic RNG stream
    ///
    /// On error the engine throws `next` away, so a failing rule
    /// leaves the snapshot exactly as it found it.
    fn update(
        &mut self,
        clock: &SimClock,
        next: &mut TelemetrySnapshot,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>>;

    /// For downcasting in tests and tooling only.
    fn as_any(&self) -> &dyn Any;
}
