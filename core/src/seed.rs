//! Fixed startup dataset.
//!
//! Everything here is literal except the solar window, which draws its
//! readings from the seed RNG slot so the window replays with the seed.

use crate::{
    config::SimConfig,
    rng::SubsystemRng,
    snapshot::TelemetrySnapshot,
    store::{
        building::BuildingStats,
        cleanliness::{CleanlinessZone, Detection, HygieneStatus},
        log::{AlertCategory, AlertLogEntry, NewestFirst, Severity, TransparencyEvent, TransparencyKind},
        room::{Device, DeviceKind, DeviceState, PowerSource, RoomState, RoomStatus},
        security::{Activity, FeedStatus, SecurityFeed, ZoneKind},
        solar::SolarSample,
    },
};

pub const SOLAR_WINDOW_LEN: usize = 15;
const SOLAR_FIRST_HOUR: usize = 10;
/// Campus base load the grid covers when solar falls short.
const BASE_LOAD_KW: f64 = 80.0;

pub fn initial_snapshot(config: &SimConfig, rng: &mut SubsystemRng) -> TelemetrySnapshot {
    TelemetrySnapshot {
        tick:              0,
        solar:             solar_window(config, rng),
        rooms:             rooms(),
        security_feeds:    security_feeds(),
        alert_log:         NewestFirst::from_newest_first(alert_log(), config.alert_log_capacity),
        transparency_log:  NewestFirst::from_newest_first(
            transparency_log(),
            Some(config.transparency.log_capacity),
        ),
        buildings:         buildings(),
        cleanliness_zones: cleanliness_zones(),
    }
}

/// Hourly samples from 10:00. Grid draw falls as solar rises.
pub fn solar_window(config: &SimConfig, rng: &mut SubsystemRng) -> Vec<SolarSample> {
    (0..SOLAR_WINDOW_LEN)
        .map(|i| {
            let actual = rng.range_f64(40.0, 60.0);
            let grid_usage =
                (BASE_LOAD_KW - actual - rng.range_f64(0.0, 10.0)).max(config.energy.grid_floor);
            SolarSample {
                time: format!("{}:00", SOLAR_FIRST_HOUR + i),
                actual,
                predicted: rng.range_f64(45.0, 55.0),
                grid_usage,
                battery_level: 60.0 + i as f64 * 1.5,
            }
        })
        .collect()
}

fn device(name: &str, power: f64, kind: DeviceKind, status: DeviceState) -> Device {
    Device { name: name.into(), power, kind, status }
}

fn cam(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?q=80&w=600&auto=format&fit=crop")
}

pub fn rooms() -> Vec<RoomStatus> {
    use DeviceKind::*;
    use DeviceState::*;
    vec![
        RoomStatus {
            id: "101".into(),
            name: "Lecture Hall A".into(),
            is_occupied: true,
            power_consumption: 2.4,
            status: RoomState::Optimal,
            source: PowerSource::Solar,
            devices: vec![
                device("AC Unit 1", 1.2, Hvac, On),
                device("Projector", 0.5, Misc, On),
                device("Lights", 0.7, Light, On),
            ],
            cam_feed: Some(cam("photo-1594122230689-45899d9e6f69")),
        },
        RoomStatus {
            id: "102".into(),
            name: "Lab 3".into(),
            is_occupied: false,
            power_consumption: 0.1,
            status: RoomState::Off,
            source: PowerSource::Grid,
            devices: vec![
                device("Main Equip", 0.0, Misc, Off),
                device("Safety Light", 0.1, Light, On),
            ],
            cam_feed: Some(cam("photo-1581093458791-9f302e686c57")),
        },
        RoomStatus {
            id: "103".into(),
            name: "Library Zone 1".into(),
            is_occupied: false,
            power_consumption: 1.8,
            status: RoomState::Wastage,
            source: PowerSource::Hybrid,
            devices: vec![
                device("Central AC", 1.5, Hvac, On),
                device("Reading Lights", 0.3, Light, On),
            ],
            cam_feed: Some(cam("photo-1521587760476-6c12a4b040da")),
        },
        RoomStatus {
            id: "104".into(),
            name: "Staff Room".into(),
            is_occupied: true,
            power_consumption: 0.8,
            status: RoomState::Optimal,
            source: PowerSource::Solar,
            devices: vec![
                device("Coffee Machine", 0.4, Misc, On),
                device("Lights", 0.4, Light, On),
            ],
            cam_feed: Some(cam("photo-1524758631624-e2822e304c36")),
        },
        RoomStatus {
            id: "105".into(),
            name: "Auditorium".into(),
            is_occupied: false,
            power_consumption: 0.0,
            status: RoomState::Off,
            source: PowerSource::Grid,
            devices: vec![
                device("Stage Lights", 0.0, Light, Off),
                device("Sound Sys", 0.0, Misc, Off),
            ],
            cam_feed: Some(cam("photo-1505664194779-8beaceb93744")),
        },
        RoomStatus {
            id: "106".into(),
            name: "Server Room".into(),
            is_occupied: false,
            power_consumption: 3.2,
            status: RoomState::Optimal,
            source: PowerSource::Grid,
            devices: vec![
                device("Cooling Array", 1.8, Hvac, On),
                device("Racks 1-4", 1.4, Misc, On),
            ],
            cam_feed: Some(cam("photo-1558494949-efc5e60c9480")),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn feed(
    id: &str,
    location: &str,
    zone: ZoneKind,
    status: FeedStatus,
    staff_detected: bool,
    head_count: u32,
    activity: Activity,
    flagged_individuals: u32,
    photo: &str,
) -> SecurityFeed {
    SecurityFeed {
        id: id.into(),
        location: location.into(),
        zone,
        status,
        staff_detected,
        head_count,
        activity,
        flagged_individuals,
        cam_url: format!("https://images.unsplash.com/{photo}?q=80&w=400&auto=format&fit=crop"),
    }
}

pub fn security_feeds() -> Vec<SecurityFeed> {
    use Activity::*;
    use FeedStatus::*;
    use ZoneKind::*;
    vec![
        feed("01", "Classroom 3B", Classroom, Safe, true, 42, Studying, 0, "photo-1577896851231-70ef18881754"),
        feed("02", "North Corridor", Corridor, Safe, false, 12, Loitering, 1, "photo-1509062522246-3755977927d7"),
        feed("03", "Main Canteen", CommonArea, Warning, false, 85, Gathering, 0, "photo-1544928147-79a2e746b5e9"),
        feed("04", "Lab Complex", Classroom, Safe, true, 20, Studying, 0, "photo-1562774053-701939374585"),
        feed("05", "Main Gate", CommonArea, Safe, true, 5, Empty, 0, "photo-1623328328766-02e7b57970d2"),
        feed("06", "Exam Hall B", Classroom, Safe, true, 55, Studying, 0, "photo-1596496181871-9681eacf9764"),
    ]
}

/// Newest first.
pub fn alert_log() -> Vec<AlertLogEntry> {
    let entry = |id: &str, timestamp: &str, category, message: &str, severity| AlertLogEntry {
        id: id.into(),
        timestamp: timestamp.into(),
        category,
        message: message.into(),
        severity,
    };
    vec![
        entry("1", "10:42 AM", AlertCategory::Solar, "Load shifted to solar grid.", Severity::Low),
        entry(
            "2",
            "10:30 AM",
            AlertCategory::Energy,
            "Room 103: Empty with AC On. Auto-shutdown initiated.",
            Severity::Medium,
        ),
        entry("3", "09:15 AM", AlertCategory::Cleanliness, "Task generated: Corridor B Spill.", Severity::Low),
    ]
}

/// Newest first.
pub fn transparency_log() -> Vec<TransparencyEvent> {
    let event = |id: &str, timestamp: &str, module: &str, kind, detail: &str, confidence| {
        TransparencyEvent {
            id: id.into(),
            timestamp: timestamp.into(),
            module: module.into(),
            kind,
            detail: detail.into(),
            confidence,
        }
    };
    vec![
        event("3", "10:42:15", "ENERGY", TransparencyKind::Decision, "Room 103 Occupancy = 0. Power = 1.8kW.", 0.95),
        event("2", "10:42:05", "SOLAR", TransparencyKind::Action, "Grid export throttle set to 20%.", 0.99),
        event("1", "10:42:01", "SOLAR", TransparencyKind::Analysis, "Irradiance delta > 5%. Recalculating forecast.", 0.98),
    ]
}

pub fn buildings() -> Vec<BuildingStats> {
    let b = |id: &str, name: &str, usage, solar_mix, grid_mix| BuildingStats {
        id: id.into(),
        name: name.into(),
        usage,
        solar_mix,
        grid_mix,
    };
    vec![
        b("b1", "Academic Block A", 120.0, 65.0, 35.0),
        b("b2", "Admin Block", 45.0, 30.0, 70.0),
        b("b3", "Laboratories", 210.0, 55.0, 45.0),
        b("b4", "Student Dorms", 85.0, 80.0, 20.0),
    ]
}

pub fn cleanliness_zones() -> Vec<CleanlinessZone> {
    let det = |x, y, w, h, label: &str, confidence| Detection {
        x,
        y,
        w,
        h,
        label: label.into(),
        confidence,
    };
    vec![
        CleanlinessZone {
            id: "z1".into(),
            name: "Main Corridor".into(),
            image: cam("photo-1565008576549-57569a49371d"),
            status: HygieneStatus::Clean,
            score: 98,
            detections: vec![],
        },
        CleanlinessZone {
            id: "z2".into(),
            name: "Canteen Zone B".into(),
            image: cam("photo-1584622050111-993a426fbf0a"),
            status: HygieneStatus::Pending,
            score: 65,
            detections: vec![
                det(30.0, 60.0, 15.0, 15.0, "Wrapper", 92.0),
                det(60.0, 70.0, 20.0, 12.0, "Spill", 88.0),
            ],
        },
        CleanlinessZone {
            id: "z3".into(),
            name: "East Wing Bin".into(),
            image: cam("photo-1532996122724-e3c354a0b15b"),
            status: HygieneStatus::Critical,
            score: 35,
            detections: vec![det(25.0, 30.0, 50.0, 60.0, "OVERFLOW", 99.0)],
        },
        CleanlinessZone {
            id: "z4".into(),
            name: "Library Entrance".into(),
            image: cam("photo-1562774053-701939374585"),
            status: HygieneStatus::Scanning,
            score: 0,
            detections: vec![],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_window_respects_floors() {
        let cfg = SimConfig::default_test();
        let mut rng = SubsystemRng::new(1, 0);
        let window = solar_window(&cfg, &mut rng);
        assert_eq!(window.len(), SOLAR_WINDOW_LEN);
        assert_eq!(window[0].time, "10:00");
        assert_eq!(window[14].time, "24:00");
        for s in &window {
            assert!(s.actual >= 0.0);
            assert!(s.grid_usage >= cfg.energy.grid_floor);
        }
    }

    #[test]
    fn seed_ids_are_unique() {
        let rooms = rooms();
        let mut ids: Vec<_> = rooms.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), rooms.len());

        let feeds = security_feeds();
        let mut ids: Vec<_> = feeds.iter().map(|f| f.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), feeds.len());
    }

    #[test]
    fn seeded_wastage_room_is_vacant() {
        for room in rooms() {
            if room.status == RoomState::Wastage {
                assert!(room.is_wasting(), "room {} seeded inconsistently", room.id);
            }
        }
    }
}
