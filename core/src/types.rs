//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one scheduler interval.
pub type Tick = u64;

/// A stable, unique identifier for any entity in the simulation.
pub type EntityId = String;

/// Power in kilowatts.
pub type Kilowatts = f64;
