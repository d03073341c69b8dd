//! Solar and room energy subsystem.
//!
//! Per tick:
//!   1. Every solar sample's `actual` drifts by a bounded random delta,
//!      floored at zero. Nothing else in the window changes.
//!   2. Every room's draw is redrawn from its occupancy.
//!   3. The wastage-prone room is scripted: sometimes flagged as wasting
//!      (vacant, every device on), otherwise sometimes switched off.
//!
//! Execution: every tick, after security.
//! A wastage room id missing from the snapshot makes step 3 a no-op.

use crate::{
    clock::SimClock,
    config::EnergyConfig,
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    snapshot::TelemetrySnapshot,
    store::room::RoomState,
    subsystem::SimSubsystem,
    types::Tick,
};

pub struct EnergySubsystem {
    config: EnergyConfig,
}

impl EnergySubsystem {
    pub fn new(config: EnergyConfig) -> Self {
        Self { config }
    }

    fn fluctuate_solar(&self, next: &mut TelemetrySnapshot, rng: &mut SubsystemRng) {
        let amp = self.config.solar_fluctuation;
        for sample in &mut next.solar {
            let delta = rng.range_f64(-amp, amp);
            sample.actual = (sample.actual + delta).max(0.0);
        }
    }

    fn redraw_room_load(&self, next: &mut TelemetrySnapshot, rng: &mut SubsystemRng) {
        for room in &mut next.rooms {
            room.power_consumption = if room.is_occupied {
                rng.range_f64(self.config.occupied_draw_min, self.config.occupied_draw_max)
            } else {
                self.config.vacant_draw
            };
        }
    }

    fn script_wastage_room(
        &self,
        tick: Tick,
        next: &mut TelemetrySnapshot,
        rng: &mut SubsystemRng,
        out: &mut Vec<SimEvent>,
    ) {
        let room_id = self.config.wastage_room_id.as_str();
        if rng.chance(self.config.wastage_probability) {
            let Some(room) = next.room_mut(room_id) else {
                log::debug!("tick={tick} energy: wastage room {room_id} not present, skipped");
                return;
            };
            room.mark_wastage();
            let idle_draw_kw: f64 = room.devices.iter().map(|d| d.power).sum();
            log::warn!(
                "tick={tick} energy: room {room_id} ({}) empty with {idle_draw_kw:.1} kW of devices on",
                room.name
            );
            out.push(SimEvent::WastageDetected {
                tick,
                room_id: room.id.clone(),
                idle_draw_kw,
            });
        } else if rng.chance(self.config.room_off_probability) {
            let Some(room) = next.room_mut(room_id) else {
                log::debug!("tick={tick} energy: wastage room {room_id} not present, skipped");
                return;
            };
            room.status = RoomState::Off;
            log::debug!("tick={tick} energy: room {room_id} forced off");
            out.push(SimEvent::RoomStateForced {
                tick,
                room_id: room.id.clone(),
                status: RoomState::Off,
            });
        }
    }
}

impl SimSubsystem for EnergySubsystem {
    fn name(&self) -> &'static str {
        "energy"
    }

    fn update(
        &mut self,
        clock: &SimClock,
        next: &mut TelemetrySnapshot,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let tick = clock.current_tick;
        let mut out = Vec::new();

        self.fluctuate_solar(next, rng);
        self.redraw_room_load(next, rng);
        self.script_wastage_room(tick, next, rng, &mut out);

        Ok(out)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
