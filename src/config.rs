//! TOML-based dispatch configuration, sparse patches, and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Battery dispatch parameters, immutable for the duration of one run.
///
/// Defaults match the stock household system: 10 kWh pack, 3 kW
/// charge/discharge, 95% round-trip efficiency, 15-minute samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Total energy capacity (kWh, > 0).
    pub capacity_kwh: f64,
    /// Maximum charging power (kW, > 0).
    pub max_charge_kw: f64,
    /// Maximum discharging power (kW, > 0).
    pub max_discharge_kw: f64,
    /// Round-trip efficiency applied on the charge path (0, 1].
    pub efficiency: f64,
    /// Fraction of an hour one sample represents (> 0; 0.25 = 15 min).
    pub interval_fraction: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 10.0,
            max_charge_kw: 3.0,
            max_discharge_kw: 3.0,
            efficiency: 0.95,
            interval_fraction: 0.25,
        }
    }
}

impl BatteryConfig {
    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.capacity_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "battery.capacity_kwh".into(),
                message: "must be > 0".into(),
            });
        }
        if self.max_charge_kw <= 0.0 {
            errors.push(ConfigError {
                field: "battery.max_charge_kw".into(),
                message: "must be > 0".into(),
            });
        }
        if self.max_discharge_kw <= 0.0 {
            errors.push(ConfigError {
                field: "battery.max_discharge_kw".into(),
                message: "must be > 0".into(),
            });
        }
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            errors.push(ConfigError {
                field: "battery.efficiency".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if self.interval_fraction <= 0.0 {
            errors.push(ConfigError {
                field: "battery.interval_fraction".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}

/// Sparse partial update for [`BatteryConfig`].
///
/// Fields left as `None` keep their prior values when applied. Callers
/// validate the patched result before committing it; a patch is never
/// applied to a configuration visible to an in-flight run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfigPatch {
    /// New capacity (kWh), if provided.
    pub capacity_kwh: Option<f64>,
    /// New maximum charging power (kW), if provided.
    pub max_charge_kw: Option<f64>,
    /// New maximum discharging power (kW), if provided.
    pub max_discharge_kw: Option<f64>,
    /// New charge-path efficiency, if provided.
    pub efficiency: Option<f64>,
    /// New sample interval fraction, if provided.
    pub interval_fraction: Option<f64>,
}

impl BatteryConfigPatch {
    /// Writes the provided fields onto `config`, leaving the rest untouched.
    pub fn apply(&self, config: &mut BatteryConfig) {
        if let Some(v) = self.capacity_kwh {
            config.capacity_kwh = v;
        }
        if let Some(v) = self.max_charge_kw {
            config.max_charge_kw = v;
        }
        if let Some(v) = self.max_discharge_kw {
            config.max_discharge_kw = v;
        }
        if let Some(v) = self.efficiency {
            config.efficiency = v;
        }
        if let Some(v) = self.interval_fraction {
            config.interval_fraction = v;
        }
    }

    /// Returns `true` if the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        self.capacity_kwh.is_none()
            && self.max_charge_kw.is_none()
            && self.max_discharge_kw.is_none()
            && self.efficiency.is_none()
            && self.interval_fraction.is_none()
    }
}

/// Synthetic consumption profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Household identifier stamped on generated readings.
    pub household_id: u64,
    /// Number of readings to generate.
    pub samples: usize,
    /// Baseline consumption per sample (kWh).
    pub base_kwh: f64,
    /// Sinusoidal amplitude (kWh).
    pub amp_kwh: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Gaussian noise standard deviation (kWh).
    pub noise_std: f64,
    /// Random seed for reproducible noise.
    pub seed: u64,
    /// Epoch timestamp of the first reading (seconds).
    pub start_timestamp: i64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            household_id: 1,
            samples: 96,
            base_kwh: 2.0,
            amp_kwh: 1.2,
            phase_rad: 1.2,
            noise_std: 0.15,
            seed: 42,
            start_timestamp: 0,
        }
    }
}

impl ProfileConfig {
    /// Validates all fields and returns a list of errors.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.samples == 0 {
            errors.push(ConfigError {
                field: "profile.samples".into(),
                message: "must be > 0".into(),
            });
        }
        if self.base_kwh < 0.0 {
            errors.push(ConfigError {
                field: "profile.base_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if self.noise_std < 0.0 {
            errors.push(ConfigError {
                field: "profile.noise_std".into(),
                message: "must be >= 0".into(),
            });
        }

        errors
    }
}

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`DispatchConfig::from_toml_file`] or use
/// [`DispatchConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Battery dispatch parameters.
    pub battery: BatteryConfig,
    /// Synthetic consumption profile parameters.
    pub profile: ProfileConfig,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl DispatchConfig {
    /// Returns the baseline scenario (stock battery, one day of 15-minute samples).
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the high-capacity preset: larger pack, higher rates.
    pub fn high_capacity() -> Self {
        Self {
            battery: BatteryConfig {
                capacity_kwh: 20.0,
                max_charge_kw: 6.0,
                max_discharge_kw: 6.0,
                efficiency: 0.92,
                ..BatteryConfig::default()
            },
            profile: ProfileConfig {
                base_kwh: 2.4,
                amp_kwh: 1.5,
                ..ProfileConfig::default()
            },
        }
    }

    /// Returns the fast-cycle preset: 5-minute samples, aggressive rates.
    pub fn fast_cycle() -> Self {
        Self {
            battery: BatteryConfig {
                capacity_kwh: 8.0,
                max_charge_kw: 5.0,
                max_discharge_kw: 5.0,
                interval_fraction: 1.0 / 12.0,
                ..BatteryConfig::default()
            },
            profile: ProfileConfig {
                samples: 288,
                noise_std: 0.25,
                ..ProfileConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "high_capacity", "fast_cycle"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "high_capacity" => Ok(Self::high_capacity()),
            "fast_cycle" => Ok(Self::fast_cycle()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all sections and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.battery.validate();
        errors.extend(self.profile.validate());
        errors
    }
}
