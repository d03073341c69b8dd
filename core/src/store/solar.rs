use crate::types::Kilowatts;
use serde::{Deserialize, Serialize};

/// One slot of the rolling solar window.
///
/// Only `actual` moves after generation; `predicted`, `grid_usage` and
/// `battery_level` are fixed when the window is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolarSample {
    pub time:          String,
    pub actual:        Kilowatts,
    pub predicted:     Kilowatts,
    pub grid_usage:    Kilowatts,
    /// Percent charge.
    pub battery_level: f64,
}
