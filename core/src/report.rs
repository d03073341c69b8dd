//! Read-only aggregates behind the report panels.
//!
//! Everything here is a pure function of one snapshot.

use crate::{
    snapshot::TelemetrySnapshot,
    store::{
        log::Severity,
        room::{PowerSource, RoomState},
        security::{Activity, FeedStatus, SecurityFeed, ZoneKind},
        solar::SolarSample,
    },
    types::{EntityId, Kilowatts},
};
use serde::Serialize;

/// Savings credited per kWh of solar generation.
pub const SAVINGS_PER_KWH: f64 = 0.15;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SolarReport {
    pub total_generation: Kilowatts,
    pub total_grid:       Kilowatts,
    /// Solar share of total load, percent. Zero when there is no load.
    pub solar_share_pct:  f64,
    pub estimated_savings: f64,
    pub peak:             Option<SolarSample>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceMix {
    pub solar:  usize,
    pub grid:   usize,
    pub hybrid: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoomLoad {
    pub id:                EntityId,
    pub name:              String,
    pub power_consumption: Kilowatts,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EnergyReport {
    pub source_mix:      SourceMix,
    /// Heaviest first.
    pub rooms_by_load:   Vec<RoomLoad>,
    pub active_devices:  usize,
    /// Load on rooms that draw at least partly from the grid.
    pub grid_fed_load:   Kilowatts,
    /// Load on rooms that draw at least partly from solar.
    pub solar_fed_load:  Kilowatts,
    pub wastage_rooms:   Vec<EntityId>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SecurityReport {
    /// Classrooms with students but no staff.
    pub unsupervised: Vec<SecurityFeed>,
    pub conflicts:    Vec<SecurityFeed>,
    pub warnings:     Vec<SecurityFeed>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CampusStats {
    pub grid_dependency_pct: f64,
    pub active_alerts:       usize,
    pub flagged_individuals: u32,
}

pub fn solar_report(snapshot: &TelemetrySnapshot) -> SolarReport {
    let total_generation: f64 = snapshot.solar.iter().map(|s| s.actual).sum();
    let total_grid: f64 = snapshot.solar.iter().map(|s| s.grid_usage).sum();
    let total_load = total_generation + total_grid;
    let solar_share_pct = if total_load > 0.0 {
        total_generation / total_load * 100.0
    } else {
        0.0
    };
    let peak = snapshot
        .solar
        .iter()
        .max_by(|a, b| a.actual.total_cmp(&b.actual))
        .cloned();

    SolarReport {
        total_generation,
        total_grid,
        solar_share_pct,
        estimated_savings: total_generation * SAVINGS_PER_KWH,
        peak,
    }
}

pub fn energy_report(snapshot: &TelemetrySnapshot) -> EnergyReport {
    let count = |source: PowerSource| snapshot.rooms.iter().filter(|r| r.source == source).count();
    let source_mix = SourceMix {
        solar:  count(PowerSource::Solar),
        grid:   count(PowerSource::Grid),
        hybrid: count(PowerSource::Hybrid),
    };

    let mut rooms_by_load: Vec<RoomLoad> = snapshot
        .rooms
        .iter()
        .map(|r| RoomLoad {
            id:                r.id.clone(),
            name:              r.name.clone(),
            power_consumption: r.power_consumption,
        })
        .collect();
    rooms_by_load.sort_by(|a, b| b.power_consumption.total_cmp(&a.power_consumption));

    let load_where = |keep: fn(PowerSource) -> bool| -> f64 {
        snapshot
            .rooms
            .iter()
            .filter(|r| keep(r.source))
            .map(|r| r.power_consumption)
            .sum()
    };

    EnergyReport {
        source_mix,
        rooms_by_load,
        active_devices: snapshot
            .rooms
            .iter()
            .map(|r| r.devices.iter().filter(|d| d.is_on()).count())
            .sum(),
        grid_fed_load: load_where(|s| s != PowerSource::Solar),
        solar_fed_load: load_where(|s| s != PowerSource::Grid),
        wastage_rooms: snapshot
            .rooms
            .iter()
            .filter(|r| r.status == RoomState::Wastage)
            .map(|r| r.id.clone())
            .collect(),
    }
}

pub fn security_report(snapshot: &TelemetrySnapshot) -> SecurityReport {
    let select = |pred: &dyn Fn(&SecurityFeed) -> bool| -> Vec<SecurityFeed> {
        snapshot.security_feeds.iter().filter(|f| pred(f)).cloned().collect()
    };
    SecurityReport {
        unsupervised: select(&|f: &SecurityFeed| {
            f.zone == ZoneKind::Classroom && !f.staff_detected && f.head_count > 0
        }),
        conflicts: select(&|f: &SecurityFeed| f.activity == Activity::Fighting),
        warnings: select(&|f: &SecurityFeed| f.status == FeedStatus::Warning),
    }
}

pub fn campus_stats(snapshot: &TelemetrySnapshot) -> CampusStats {
    let solar = solar_report(snapshot);
    CampusStats {
        grid_dependency_pct: if solar.total_generation + solar.total_grid > 0.0 {
            100.0 - solar.solar_share_pct
        } else {
            0.0
        },
        active_alerts: snapshot
            .alert_log
            .iter()
            .filter(|a| a.severity == Severity::High)
            .count(),
        flagged_individuals: snapshot.security_feeds.iter().map(|f| f.flagged_individuals).sum(),
    }
}
