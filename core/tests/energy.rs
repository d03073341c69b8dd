//! Solar and room energy rule tests.

use orbit_core::{
    clock::SimClock,
    config::{EnergyConfig, SimConfig},
    energy_subsystem::EnergySubsystem,
    engine::{test_epoch, SimEngine},
    event::SimEvent,
    rng::SubsystemRng,
    snapshot::TelemetrySnapshot,
    store::room::{DeviceState, RoomState},
    subsystem::SimSubsystem,
};

fn seed_snapshot() -> TelemetrySnapshot {
    let engine = SimEngine::build_test(0xE4E).expect("engine");
    (*engine.snapshot()).clone()
}

fn clock() -> SimClock {
    let mut clock = SimClock::new(test_epoch(), 2000);
    clock.current_tick = 1;
    clock
}

#[test]
fn forced_wastage_vacates_room_and_powers_devices() {
    let mut snap = seed_snapshot();
    {
        let room = snap.room_mut("103").unwrap();
        room.status = RoomState::Optimal;
        room.is_occupied = true;
        for d in &mut room.devices {
            d.status = DeviceState::Off;
        }
    }

    let mut rule = EnergySubsystem::new(EnergyConfig {
        wastage_probability: 1.0,
        ..EnergyConfig::default()
    });
    let events = rule.update(&clock(), &mut snap, &mut SubsystemRng::new(1, 2)).unwrap();

    let room = snap.room("103").unwrap();
    assert_eq!(room.status, RoomState::Wastage);
    assert!(!room.is_occupied);
    assert!(room.devices.iter().all(|d| d.status == DeviceState::On));
    assert!(matches!(
        events.as_slice(),
        [SimEvent::WastageDetected { room_id, .. }] if room_id == "103"
    ));
}

#[test]
fn missed_wastage_roll_can_switch_room_off() {
    let mut snap = seed_snapshot();
    let mut rule = EnergySubsystem::new(EnergyConfig {
        wastage_probability: 0.0,
        room_off_probability: 1.0,
        ..EnergyConfig::default()
    });
    rule.update(&clock(), &mut snap, &mut SubsystemRng::new(2, 2)).unwrap();
    assert_eq!(snap.room("103").unwrap().status, RoomState::Off);
}

#[test]
fn neither_branch_leaves_room_status_alone() {
    let mut snap = seed_snapshot();
    let before = snap.room("103").unwrap().status;
    let mut rule = EnergySubsystem::new(EnergyConfig {
        wastage_probability: 0.0,
        room_off_probability: 0.0,
        ..EnergyConfig::default()
    });
    let events = rule.update(&clock(), &mut snap, &mut SubsystemRng::new(3, 2)).unwrap();
    assert_eq!(snap.room("103").unwrap().status, before);
    assert!(events.is_empty());
}

#[test]
fn unknown_wastage_room_is_a_no_op() {
    let mut snap = seed_snapshot();
    let statuses: Vec<_> = snap.rooms.iter().map(|r| (r.status, r.is_occupied)).collect();

    let mut rule = EnergySubsystem::new(EnergyConfig {
        wastage_room_id: "999".into(),
        wastage_probability: 1.0,
        ..EnergyConfig::default()
    });
    let events = rule.update(&clock(), &mut snap, &mut SubsystemRng::new(4, 2)).unwrap();

    assert!(events.is_empty());
    let after: Vec<_> = snap.rooms.iter().map(|r| (r.status, r.is_occupied)).collect();
    assert_eq!(statuses, after);
}

#[test]
fn room_draw_follows_occupancy() {
    let mut snap = seed_snapshot();
    let mut rule = EnergySubsystem::new(EnergyConfig {
        wastage_probability: 0.0,
        room_off_probability: 0.0,
        ..EnergyConfig::default()
    });
    let mut rng = SubsystemRng::new(5, 2);
    for _ in 0..200 {
        rule.update(&clock(), &mut snap, &mut rng).unwrap();
        for room in &snap.rooms {
            if room.is_occupied {
                assert!((2.0..3.0).contains(&room.power_consumption), "{}", room.power_consumption);
            } else {
                assert_eq!(room.power_consumption, 0.1);
            }
        }
    }
}

#[test]
fn solar_drift_is_bounded_per_tick() {
    let mut snap = seed_snapshot();
    let before: Vec<f64> = snap.solar.iter().map(|s| s.actual).collect();
    let mut rule = EnergySubsystem::new(EnergyConfig::default());
    rule.update(&clock(), &mut snap, &mut SubsystemRng::new(6, 2)).unwrap();

    for (b, s) in before.iter().zip(snap.solar.iter()) {
        assert!((s.actual - b).abs() <= 1.0, "moved {} -> {}", b, s.actual);
    }
}

#[test]
fn solar_actual_floors_at_zero() {
    let mut snap = seed_snapshot();
    for s in &mut snap.solar {
        s.actual = 0.0;
    }
    let mut rule = EnergySubsystem::new(EnergyConfig::default());
    let mut rng = SubsystemRng::new(7, 2);
    for _ in 0..100 {
        rule.update(&clock(), &mut snap, &mut rng).unwrap();
        assert!(snap.solar.iter().all(|s| s.actual >= 0.0));
    }
}

#[test]
fn engine_scenario_seeded_room_forced_into_wastage() {
    let mut initial = seed_snapshot();
    {
        let room = initial.room_mut("103").unwrap();
        room.status = RoomState::Optimal;
        room.is_occupied = true;
    }
    let mut cfg = SimConfig::default_test();
    cfg.energy.wastage_probability = 1.0;

    let mut engine = SimEngine::with_snapshot(cfg, 21, test_epoch(), initial).unwrap();
    engine.register_all();
    engine.tick().unwrap();

    let snap = engine.snapshot();
    let room = snap.room("103").unwrap();
    assert_eq!(room.status, RoomState::Wastage);
    assert!(!room.is_occupied);
    assert!(room.devices.iter().all(|d| d.is_on()));
}
