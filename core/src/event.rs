//! Typed record of what each rule did on a tick.
//!
//! Events are informational: rules never read each other's events, and
//! the snapshot is the only state. The engine logs them and hands them
//! back from `tick()` for tooling.

use crate::{
    store::{room::RoomState, security::FeedStatus},
    types::{EntityId, Tick},
};
use serde::{Deserialize, Serialize};

/// Variants are appended as rules are added — never reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine events ──────────────────────────────
    TickStarted {
        tick: Tick,
    },
    TickCompleted {
        tick: Tick,
    },
    RuleSkipped {
        tick: Tick,
        rule: String,
        reason: String,
    },

    // ── Security events ────────────────────────────
    StaffPresenceChanged {
        tick: Tick,
        feed_id: EntityId,
        staff_detected: bool,
    },
    ClashDetected {
        tick: Tick,
        feed_id: EntityId,
        location: String,
        alert_id: EntityId,
    },
    ClashCleared {
        tick: Tick,
        feed_id: EntityId,
    },
    CrowdLevelChanged {
        tick: Tick,
        feed_id: EntityId,
        head_count: u32,
        status: FeedStatus,
    },

    // ── Energy events ──────────────────────────────
    WastageDetected {
        tick: Tick,
        room_id: EntityId,
        idle_draw_kw: f64,
    },
    RoomStateForced {
        tick: Tick,
        room_id: EntityId,
        status: RoomState,
    },

    // ── Transparency events ────────────────────────
    TransparencyEmitted {
        tick: Tick,
        event_id: EntityId,
        module: String,
        confidence: f64,
    },

    // ── Cleanliness events ─────────────────────────
    ZoneScanStarted {
        tick: Tick,
        zone_id: EntityId,
    },
    ZoneScanCompleted {
        tick: Tick,
        zone_id: EntityId,
        score: u8,
    },
}

/// Stable string name for a SimEvent variant, used in log lines.
pub fn event_type_name(event: &SimEvent) -> &'static str {
    match event {
        SimEvent::TickStarted { .. }          => "tick_started",
        SimEvent::TickCompleted { .. }        => "tick_completed",
        SimEvent::RuleSkipped { .. }          => "rule_skipped",
        SimEvent::StaffPresenceChanged { .. } => "staff_presence_changed",
        SimEvent::ClashDetected { .. }        => "clash_detected",
        SimEvent::ClashCleared { .. }         => "clash_cleared",
        SimEvent::CrowdLevelChanged { .. }    => "crowd_level_changed",
        SimEvent::WastageDetected { .. }      => "wastage_detected",
        SimEvent::RoomStateForced { .. }      => "room_state_forced",
        SimEvent::TransparencyEmitted { .. }  => "transparency_emitted",
        SimEvent::ZoneScanStarted { .. }      => "zone_scan_started",
        SimEvent::ZoneScanCompleted { .. }    => "zone_scan_completed",
    }
}
