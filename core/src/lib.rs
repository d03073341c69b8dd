//! Orbit campus telemetry simulator.
//!
//! A seeded, tick-driven simulation of the panels behind a campus
//! operations dashboard: solar generation, room energy use, security
//! feeds, hygiene cameras, and the alert and decision logs.

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod report;
pub mod rng;
pub mod scheduler;
pub mod seed;
pub mod snapshot;
pub mod store;
pub mod subsystem;
pub mod types;

pub mod cleanliness_subsystem;
pub mod energy_subsystem;
pub mod security_subsystem;
pub mod transparency_subsystem;

pub mod engine;
