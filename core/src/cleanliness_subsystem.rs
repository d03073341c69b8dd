//! Cleanliness subsystem — rotates the hygiene cameras through scans.
//!
//! A zone that is scanning finishes with a clean result; a clean zone is
//! occasionally queued for a fresh scan. Pending and critical zones wait
//! for the cleaning crew and are left alone.
//!
//! Execution: every tick, last in registration order.

use crate::{
    clock::SimClock,
    config::CleanlinessConfig,
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    snapshot::TelemetrySnapshot,
    store::cleanliness::HygieneStatus,
    subsystem::SimSubsystem,
};

pub struct CleanlinessSubsystem {
    config: CleanlinessConfig,
}

impl CleanlinessSubsystem {
    pub fn new(config: CleanlinessConfig) -> Self {
        Self { config }
    }
}

impl SimSubsystem for CleanlinessSubsystem {
    fn name(&self) -> &'static str {
        "cleanliness"
    }

    fn update(
        &mut self,
        clock: &SimClock,
        next: &mut TelemetrySnapshot,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let tick = clock.current_tick;
        let mut out = Vec::new();

        for zone in &mut next.cleanliness_zones {
            match zone.status {
                HygieneStatus::Scanning => {
                    zone.status = HygieneStatus::Clean;
                    zone.score = self.config.clean_score;
                    zone.detections.clear();
                    out.push(SimEvent::ZoneScanCompleted {
                        tick,
                        zone_id: zone.id.clone(),
                        score: zone.score,
                    });
                }
                HygieneStatus::Clean if rng.chance(self.config.rescan_probability) => {
                    zone.status = HygieneStatus::Scanning;
                    zone.score = 0;
                    out.push(SimEvent::ZoneScanStarted { tick, zone_id: zone.id.clone() });
                }
                _ => {}
            }
        }

        if !out.is_empty() {
            log::debug!("tick={tick} cleanliness: {} zone transitions", out.len());
        }
        Ok(out)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
