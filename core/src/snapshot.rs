//! The telemetry snapshot — every panel's data at one tick.
//!
//! A snapshot is immutable once published. The engine builds the next one
//! from a copy of the previous one and swaps it in wholesale.

use crate::{
    store::{
        building::BuildingStats,
        cleanliness::CleanlinessZone,
        log::{AlertLogEntry, NewestFirst, TransparencyEvent},
        room::RoomStatus,
        security::SecurityFeed,
        solar::SolarSample,
    },
    types::Tick,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetrySnapshot {
    pub tick:              Tick,
    pub solar:             Vec<SolarSample>,
    pub rooms:             Vec<RoomStatus>,
    pub security_feeds:    Vec<SecurityFeed>,
    pub alert_log:         NewestFirst<AlertLogEntry>,
    pub transparency_log:  NewestFirst<TransparencyEvent>,
    pub buildings:         Vec<BuildingStats>,
    pub cleanliness_zones: Vec<CleanlinessZone>,
}

impl TelemetrySnapshot {
    pub fn room(&self, id: &str) -> Option<&RoomStatus> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: &str) -> Option<&mut RoomStatus> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn feed(&self, id: &str) -> Option<&SecurityFeed> {
        self.security_feeds.iter().find(|f| f.id == id)
    }

    pub fn to_json(&self) -> crate::error::SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
