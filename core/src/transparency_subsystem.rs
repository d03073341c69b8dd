//! Transparency subsystem — synthesises the decision trail shown in the
//! "AI transparency" console.
//!
//! Execution: every tick, after energy. Emits at most one entry per tick.
//! The log is newest-first and capped; the oldest entry falls off.

use crate::{
    clock::SimClock,
    config::TransparencyConfig,
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    snapshot::TelemetrySnapshot,
    store::log::{TransparencyEvent, TransparencyKind},
    subsystem::SimSubsystem,
};

const EMITTED_KINDS: [TransparencyKind; 2] = [TransparencyKind::Analysis, TransparencyKind::Decision];

pub struct TransparencySubsystem {
    config: TransparencyConfig,
}

impl TransparencySubsystem {
    pub fn new(config: TransparencyConfig) -> Self {
        Self { config }
    }

    fn synthesize(&self, clock: &SimClock, rng: &mut SubsystemRng) -> Option<TransparencyEvent> {
        let module = rng.pick(&self.config.modules)?.clone();
        let kind = *rng.pick(&EMITTED_KINDS)?;
        let detail = rng.pick(&self.config.details)?.clone();
        let confidence = rng.range_f64(self.config.confidence_min, self.config.confidence_max);
        Some(TransparencyEvent {
            id: rng.uuid().to_string(),
            timestamp: clock.hour_minute_second(),
            module,
            kind,
            detail,
            confidence,
        })
    }
}

impl SimSubsystem for TransparencySubsystem {
    fn name(&self) -> &'static str {
        "transparency"
    }

    fn update(
        &mut self,
        clock: &SimClock,
        next: &mut TelemetrySnapshot,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let tick = clock.current_tick;
        if !rng.chance(self.config.emission_probability) {
            return Ok(vec![]);
        }

        let Some(event) = self.synthesize(clock, rng) else {
            log::debug!("tick={tick} transparency: empty phrase set, nothing emitted");
            return Ok(vec![]);
        };

        log::debug!(
            "tick={tick} transparency: [{}] {:?} {} ({:.2})",
            event.module,
            event.kind,
            event.detail,
            event.confidence
        );
        let emitted = SimEvent::TransparencyEmitted {
            tick,
            event_id: event.id.clone(),
            module: event.module.clone(),
            confidence: event.confidence,
        };
        next.transparency_log.set_capacity(Some(self.config.log_capacity));
        next.transparency_log.prepend(event);

        Ok(vec![emitted])
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
