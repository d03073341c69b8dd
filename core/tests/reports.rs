//! Report aggregate tests over the seed snapshot.

use orbit_core::{
    engine::SimEngine,
    report::{campus_stats, energy_report, security_report, solar_report, SAVINGS_PER_KWH},
    store::security::Activity,
};

#[test]
fn solar_report_totals_the_window() {
    let engine = SimEngine::build_test(10).unwrap();
    let snap = engine.snapshot();
    let report = solar_report(&snap);

    let gen: f64 = snap.solar.iter().map(|s| s.actual).sum();
    let grid: f64 = snap.solar.iter().map(|s| s.grid_usage).sum();
    assert!((report.total_generation - gen).abs() < 1e-9);
    assert!((report.total_grid - grid).abs() < 1e-9);
    assert!((report.estimated_savings - gen * SAVINGS_PER_KWH).abs() < 1e-9);
    assert!(report.solar_share_pct > 0.0 && report.solar_share_pct < 100.0);

    let peak = report.peak.unwrap();
    assert!(snap.solar.iter().all(|s| s.actual <= peak.actual));
}

#[test]
fn energy_report_on_seed_rooms() {
    let engine = SimEngine::build_test(11).unwrap();
    let report = energy_report(&engine.snapshot());

    assert_eq!(report.source_mix.solar, 2);
    assert_eq!(report.source_mix.grid, 3);
    assert_eq!(report.source_mix.hybrid, 1);
    assert_eq!(report.rooms_by_load[0].id, "106");
    assert!(report
        .rooms_by_load
        .windows(2)
        .all(|w| w[0].power_consumption >= w[1].power_consumption));
    assert_eq!(report.active_devices, 10);
    assert_eq!(report.wastage_rooms, vec!["103".to_string()]);
    // 102 + 103 + 105 + 106 vs 101 + 103 + 104
    assert!((report.grid_fed_load - (0.1 + 1.8 + 0.0 + 3.2)).abs() < 1e-9);
    assert!((report.solar_fed_load - (2.4 + 1.8 + 0.8)).abs() < 1e-9);
}

#[test]
fn security_report_flags_warnings_and_conflicts() {
    let engine = SimEngine::build_test(12).unwrap();
    let mut snap = (*engine.snapshot()).clone();

    let report = security_report(&snap);
    assert!(report.conflicts.is_empty());
    assert!(report.unsupervised.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].location, "Main Canteen");

    snap.security_feeds[0].staff_detected = false;
    snap.security_feeds[1].activity = Activity::Fighting;
    let report = security_report(&snap);
    assert_eq!(report.unsupervised.len(), 1);
    assert_eq!(report.unsupervised[0].location, "Classroom 3B");
    assert_eq!(report.conflicts.len(), 1);
}

#[test]
fn campus_stats_on_seed() {
    let engine = SimEngine::build_test(13).unwrap();
    let snap = engine.snapshot();
    let stats = campus_stats(&snap);
    let solar = solar_report(&snap);

    assert!((stats.grid_dependency_pct + solar.solar_share_pct - 100.0).abs() < 1e-9);
    assert_eq!(stats.active_alerts, 0);
    assert_eq!(stats.flagged_individuals, 1);
}
