//! Tuning for every rule. All probabilities and ranges live here,
//! never as literals in the rules themselves.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 2000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SecurityConfig {
    /// Per classroom, per tick.
    pub staff_toggle_probability: f64,
    /// Per corridor, per tick.
    pub clash_probability: f64,
    /// Chance a fighting corridor settles back to loitering.
    pub fight_recovery_probability: f64,
    /// Common-area head count is redrawn from [min, max).
    pub crowd_min: u32,
    pub crowd_max: u32,
    /// Head counts strictly above this raise a warning.
    pub crowd_warning_threshold: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            staff_toggle_probability:   0.05,
            clash_probability:          0.02,
            fight_recovery_probability: 0.20,
            crowd_min:                  60,
            crowd_max:                  100,
            crowd_warning_threshold:    90,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnergyConfig {
    /// `actual` moves by a uniform delta in [-amplitude, +amplitude).
    pub solar_fluctuation: f64,
    /// Occupied rooms draw from [min, max) kW.
    pub occupied_draw_min: f64,
    pub occupied_draw_max: f64,
    pub vacant_draw: f64,
    /// Room used for the scripted wastage demonstration.
    pub wastage_room_id: String,
    pub wastage_probability: f64,
    /// Applied only when the wastage roll misses.
    pub room_off_probability: f64,
    /// Grid draw never drops below this when the window is generated.
    pub grid_floor: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            solar_fluctuation:    1.0,
            occupied_draw_min:    2.0,
            occupied_draw_max:    3.0,
            vacant_draw:          0.1,
            wastage_room_id:      "103".into(),
            wastage_probability:  0.20,
            room_off_probability: 0.50,
            grid_floor:           5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransparencyConfig {
    pub emission_probability: f64,
    pub log_capacity: usize,
    pub confidence_min: f64,
    pub confidence_max: f64,
    pub modules: Vec<String>,
    pub details: Vec<String>,
}

impl Default for TransparencyConfig {
    fn default() -> Self {
        Self {
            emission_probability: 0.30,
            log_capacity:         20,
            confidence_min:       0.85,
            confidence_max:       0.99,
            modules: vec!["SOLAR".into(), "ENERGY".into(), "SECURITY".into()],
            details: vec![
                "Scanning...".into(),
                "Optimizing...".into(),
                "Analyzing Pattern...".into(),
                "Syncing DB...".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CleanlinessConfig {
    /// Chance a clean zone is queued for a rescan.
    pub rescan_probability: f64,
    /// Score assigned when a scan completes.
    pub clean_score: u8,
}

impl Default for CleanlinessConfig {
    fn default() -> Self {
        Self {
            rescan_probability: 0.02,
            clean_score:        96,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub tick_interval_ms: u64,
    pub security:         SecurityConfig,
    pub energy:           EnergyConfig,
    pub transparency:     TransparencyConfig,
    pub cleanliness:      CleanlinessConfig,
    /// `None` keeps the alert log unbounded for the session.
    pub alert_log_capacity: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:   DEFAULT_TICK_INTERVAL_MS,
            security:           SecurityConfig::default(),
            energy:             EnergyConfig::default(),
            transparency:       TransparencyConfig::default(),
            cleanliness:        CleanlinessConfig::default(),
            alert_log_capacity: None,
        }
    }
}

impl SimConfig {
    /// Load from `<data_dir>/simulation.json`.
    /// Sections missing from the file keep their defaults.
    /// In tests, use SimConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/simulation.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        log::debug!("Loaded simulation config from {path}");
        Ok(config)
    }

    /// Reference values, for use in tests.
    pub fn default_test() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be > 0"));
        }

        let probabilities = [
            ("security.staff_toggle_probability", self.security.staff_toggle_probability),
            ("security.clash_probability", self.security.clash_probability),
            ("security.fight_recovery_probability", self.security.fight_recovery_probability),
            ("energy.wastage_probability", self.energy.wastage_probability),
            ("energy.room_off_probability", self.energy.room_off_probability),
            ("transparency.emission_probability", self.transparency.emission_probability),
            ("cleanliness.rescan_probability", self.cleanliness.rescan_probability),
        ];
        for (field, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, format!("probability {p} outside [0, 1]")));
            }
        }

        if self.security.crowd_min >= self.security.crowd_max {
            return Err(invalid("security.crowd_min", "must be below crowd_max"));
        }
        if self.energy.occupied_draw_min >= self.energy.occupied_draw_max {
            return Err(invalid("energy.occupied_draw_min", "must be below occupied_draw_max"));
        }
        if self.energy.solar_fluctuation < 0.0 {
            return Err(invalid("energy.solar_fluctuation", "must be >= 0"));
        }
        if self.energy.vacant_draw < 0.0 || self.energy.grid_floor < 0.0 {
            return Err(invalid("energy.vacant_draw", "draws and floors must be >= 0"));
        }

        let t = &self.transparency;
        if t.log_capacity == 0 {
            return Err(invalid("transparency.log_capacity", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&t.confidence_min)
            || !(0.0..=1.0).contains(&t.confidence_max)
            || t.confidence_min > t.confidence_max
        {
            return Err(invalid("transparency.confidence_min", "range must sit inside [0, 1]"));
        }
        if t.modules.is_empty() {
            return Err(invalid("transparency.modules", "must not be empty"));
        }
        if t.details.is_empty() {
            return Err(invalid("transparency.details", "must not be empty"));
        }

        if self.cleanliness.clean_score > 100 {
            return Err(invalid("cleanliness.clean_score", "must be <= 100"));
        }
        if self.alert_log_capacity == Some(0) {
            return Err(invalid("alert_log_capacity", "use null for unbounded, not 0"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SimError {
    SimError::InvalidConfig { field, reason: reason.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SimConfig::default_test().validate().expect("defaults validate");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: SimConfig =
            serde_json::from_str(r#"{ "energy": { "wastage_room_id": "105" } }"#).unwrap();
        assert_eq!(cfg.energy.wastage_room_id, "105");
        assert_eq!(cfg.energy.wastage_probability, 0.20);
        assert_eq!(cfg.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(cfg.transparency.log_capacity, 20);
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let mut cfg = SimConfig::default_test();
        cfg.security.clash_probability = 1.5;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfig { field: "security.clash_probability", .. }
        ));
    }

    #[test]
    fn rejects_inverted_crowd_range() {
        let mut cfg = SimConfig::default_test();
        cfg.security.crowd_min = 100;
        cfg.security.crowd_max = 60;
        assert!(cfg.validate().is_err());
    }
}
