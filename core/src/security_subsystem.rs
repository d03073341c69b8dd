//! Security feed subsystem.
//!
//! Each feed moves independently according to its zone kind:
//!   - Classroom:   staff presence flips now and then; no staff => WARNING.
//!   - Corridor:    rare clashes go CRITICAL and raise a high-severity
//!                  alert; a fighting corridor may settle back down.
//!   - Common area: head count is redrawn every tick; crowding => WARNING.
//!
//! Execution: every tick, first in registration order.
//! Side effect: prepends to the alert log on a corridor clash.

use crate::{
    clock::SimClock,
    config::SecurityConfig,
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    snapshot::TelemetrySnapshot,
    store::{
        log::{AlertCategory, AlertLogEntry, NewestFirst, Severity},
        security::{Activity, FeedStatus, SecurityFeed, ZoneKind},
    },
    subsystem::SimSubsystem,
    types::Tick,
};

pub struct SecuritySubsystem {
    config: SecurityConfig,
}

impl SecuritySubsystem {
    pub fn new(config: SecurityConfig) -> Self {
        Self { config }
    }

    fn update_classroom(
        &self,
        tick: Tick,
        feed: &mut SecurityFeed,
        rng: &mut SubsystemRng,
        out: &mut Vec<SimEvent>,
    ) {
        if !rng.chance(self.config.staff_toggle_probability) {
            return;
        }
        feed.staff_detected = !feed.staff_detected;
        feed.status = if feed.staff_detected { FeedStatus::Safe } else { FeedStatus::Warning };
        log::debug!(
            "tick={tick} security: {} staff_detected={}",
            feed.location,
            feed.staff_detected
        );
        out.push(SimEvent::StaffPresenceChanged {
            tick,
            feed_id: feed.id.clone(),
            staff_detected: feed.staff_detected,
        });
    }

    fn update_corridor(
        &self,
        clock: &SimClock,
        feed: &mut SecurityFeed,
        alerts: &mut NewestFirst<AlertLogEntry>,
        rng: &mut SubsystemRng,
        out: &mut Vec<SimEvent>,
    ) {
        let tick = clock.current_tick;
        if rng.chance(self.config.clash_probability) {
            feed.activity = Activity::Fighting;
            feed.status = FeedStatus::Critical;

            let alert = AlertLogEntry {
                id:        rng.uuid().to_string(),
                timestamp: clock.hour_minute(),
                category:  AlertCategory::Security,
                message:   format!("Clash detected at {}. Staff dispatched.", feed.location),
                severity:  Severity::High,
            };
            log::warn!("tick={tick} security: {}", alert.message);
            out.push(SimEvent::ClashDetected {
                tick,
                feed_id:  feed.id.clone(),
                location: feed.location.clone(),
                alert_id: alert.id.clone(),
            });
            alerts.prepend(alert);
        } else if feed.activity == Activity::Fighting
            && rng.chance(self.config.fight_recovery_probability)
        {
            feed.activity = Activity::Loitering;
            feed.status = FeedStatus::Safe;
            log::debug!("tick={tick} security: {} settled", feed.location);
            out.push(SimEvent::ClashCleared { tick, feed_id: feed.id.clone() });
        }
    }

    fn update_common_area(
        &self,
        tick: Tick,
        feed: &mut SecurityFeed,
        rng: &mut SubsystemRng,
        out: &mut Vec<SimEvent>,
    ) {
        let span = u64::from(self.config.crowd_max.saturating_sub(self.config.crowd_min));
        // span < crowd_max, so the draw always fits back into u32
        let extra = rng.next_u64_below(span) as u32;
        feed.head_count = self.config.crowd_min + extra;

        let status = if feed.head_count > self.config.crowd_warning_threshold {
            FeedStatus::Warning
        } else {
            FeedStatus::Safe
        };
        if status != feed.status {
            out.push(SimEvent::CrowdLevelChanged {
                tick,
                feed_id: feed.id.clone(),
                head_count: feed.head_count,
                status,
            });
        }
        feed.status = status;
    }
}

impl SimSubsystem for SecuritySubsystem {
    fn name(&self) -> &'static str {
        "security"
    }

    fn update(
        &mut self,
        clock: &SimClock,
        next: &mut TelemetrySnapshot,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let tick = clock.current_tick;
        let mut out = Vec::new();

        for feed in &mut next.security_feeds {
            match feed.zone {
                ZoneKind::Classroom => self.update_classroom(tick, feed, rng, &mut out),
                ZoneKind::Corridor => {
                    self.update_corridor(clock, feed, &mut next.alert_log, rng, &mut out)
                }
                ZoneKind::CommonArea => self.update_common_area(tick, feed, rng, &mut out),
            }
        }

        Ok(out)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
