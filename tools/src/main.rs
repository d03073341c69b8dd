//! orbit-runner: headless driver for the campus telemetry simulator.
//!
//! Usage:
//!   orbit-runner --seed 12345 --ticks 300
//!   orbit-runner --seed 12345 --ticks 30 --live
//!   orbit-runner --seed 12345 --ipc-mode

use anyhow::Result;
use orbit_core::{
    config::SimConfig,
    engine::SimEngine,
    report::{self, CampusStats, EnergyReport, SecurityReport, SolarReport},
    scheduler,
    snapshot::TelemetrySnapshot,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick { count: u64 },
    Report,
    Quit,
}

#[derive(serde::Serialize)]
struct ReportBundle {
    tick:     u64,
    solar:    SolarReport,
    energy:   EnergyReport,
    security: SecurityReport,
    campus:   CampusStats,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 300u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let live = args.iter().any(|a| a == "--live");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    let config = match SimConfig::load(data_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("{e}; falling back to built-in defaults");
            SimConfig::default()
        }
    };

    if !ipc_mode {
        println!("Orbit campus telemetry — orbit-runner");
        println!("  seed:      {seed}");
        println!("  ticks:     {ticks}");
        println!("  interval:  {} ms", config.tick_interval_ms);
        println!("  data_dir:  {data_dir}");
        println!();
    }

    let started_at = chrono::Local::now().naive_local();
    let mut engine = SimEngine::build(config, seed, started_at)?;

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else if live {
        let engine = run_live(engine, ticks)?;
        print_summary(&engine.snapshot());
    } else {
        engine.run_ticks(ticks)?;
        print_summary(&engine.snapshot());
    }

    Ok(())
}

/// Drive the real scheduler until `ticks` snapshots have been published.
fn run_live(engine: SimEngine, ticks: u64) -> Result<SimEngine> {
    if ticks == 0 {
        // Nothing would ever be published to stop on.
        return Ok(engine);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let handle = scheduler::start(engine);
        let mut rx = handle.subscribe();

        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snap = rx.borrow_and_update().clone();
                    print_tick_line(&snap);
                    if snap.tick >= ticks {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    log::info!("interrupted");
                    break;
                }
            }
        }

        Ok::<SimEngine, anyhow::Error>(handle.stop().await?)
    })
}

fn run_ipc_loop(engine: &mut SimEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Tick { count } => {
                engine.run_ticks(count)?;
                writeln!(stdout, "{}", engine.snapshot().to_json()?)?;
            }
            IpcCommand::GetState => {
                writeln!(stdout, "{}", engine.snapshot().to_json()?)?;
            }
            IpcCommand::Report => {
                let bundle = build_reports(&engine.snapshot());
                writeln!(stdout, "{}", serde_json::to_string(&bundle)?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn build_reports(snap: &TelemetrySnapshot) -> ReportBundle {
    ReportBundle {
        tick:     snap.tick,
        solar:    report::solar_report(snap),
        energy:   report::energy_report(snap),
        security: report::security_report(snap),
        campus:   report::campus_stats(snap),
    }
}

fn print_tick_line(snap: &TelemetrySnapshot) {
    let r = build_reports(snap);
    println!(
        "tick {:>4} | solar {:>6.1} kW | grid dep {:>5.1}% | wastage {:?} | conflicts {} | alerts {} | trail {}",
        r.tick,
        r.solar.total_generation,
        r.campus.grid_dependency_pct,
        r.energy.wastage_rooms,
        r.security.conflicts.len(),
        snap.alert_log.len(),
        snap.transparency_log.len(),
    );
}

fn print_summary(snap: &TelemetrySnapshot) {
    let r = build_reports(snap);

    println!("=== RUN SUMMARY ===");
    println!("  final tick:       {}", r.tick);
    println!("  solar generation: {:.1} kW", r.solar.total_generation);
    println!("  grid draw:        {:.1} kW", r.solar.total_grid);
    println!("  solar share:      {:.1}%", r.solar.solar_share_pct);
    println!("  est. savings:     ${:.2}", r.solar.estimated_savings);
    println!("  active devices:   {}", r.energy.active_devices);
    println!("  wastage rooms:    {:?}", r.energy.wastage_rooms);
    println!("  unsupervised:     {}", r.security.unsupervised.len());
    println!("  conflicts:        {}", r.security.conflicts.len());
    println!("  high alerts:      {}", r.campus.active_alerts);
    println!("  alert log:        {}", snap.alert_log.len());
    println!("  decision trail:   {}", snap.transparency_log.len());

    println!();
    println!("=== LATEST ALERTS ===");
    if snap.alert_log.is_empty() {
        println!("  (none)");
    }
    for alert in snap.alert_log.iter().take(5) {
        println!(
            "  {} | {:?} | {:?} | {}",
            alert.timestamp, alert.severity, alert.category, alert.message
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
