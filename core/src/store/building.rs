use crate::types::{EntityId, Kilowatts};
use serde::{Deserialize, Serialize};

/// Static per-building aggregate. Never touched by the rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildingStats {
    pub id:        EntityId,
    pub name:      String,
    pub usage:     Kilowatts,
    pub solar_mix: f64,
    pub grid_mix:  f64,
}
