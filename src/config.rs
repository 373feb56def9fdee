use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a JSON file with a [`RouteConfig`].
pub const CONFIG_ENV_VAR: &str = "RELAY_PATH_CONFIG";

/// Earth's mean radius in thousands of kilometres.
pub const EARTH_RADIUS: f64 = 6.371;
/// Converts input altitudes (kilometres) to the radius unit.
pub const ALTITUDE_SCALE: f64 = 1000.0;
/// Altitude given to ground endpoints so they sit just above the surface.
pub const GROUND_ALTITUDE: f64 = 1e-3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Expected relay altitude range, in input altitude units.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AltitudeBand {
    pub min: f64,
    pub max: f64,
}

impl Default for AltitudeBand {
    fn default() -> Self {
        AltitudeBand {
            min: 300.0,
            max: 700.0,
        }
    }
}

/// Physical constants for one routing run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RouteConfig {
    pub occluder_radius: f64,
    pub altitude_scale: f64,
    pub ground_altitude: f64,
    pub relay_band: AltitudeBand,
}

impl Default for RouteConfig {
    fn default() -> Self {
        RouteConfig {
            occluder_radius: EARTH_RADIUS,
            altitude_scale: ALTITUDE_SCALE,
            ground_altitude: GROUND_ALTITUDE,
            relay_band: AltitudeBand::default(),
        }
    }
}

impl RouteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.occluder_radius.is_finite() && self.occluder_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "occluder_radius must be positive, got {}",
                self.occluder_radius
            )));
        }
        if !(self.altitude_scale.is_finite() && self.altitude_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "altitude_scale must be positive, got {}",
                self.altitude_scale
            )));
        }
        if !(self.ground_altitude.is_finite() && self.ground_altitude >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "ground_altitude must be non-negative, got {}",
                self.ground_altitude
            )));
        }
        if self.relay_band.min > self.relay_band.max {
            return Err(ConfigError::Invalid(format!(
                "relay_band is inverted ({} > {})",
                self.relay_band.min, self.relay_band.max
            )));
        }
        Ok(())
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => load_config(path),
            None => Ok(RouteConfig::default()),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RouteConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let config: RouteConfig = serde_json::from_str(&text)?;
    config.validate()?;
    debug!("Loaded route config from {}: {:?}", path.display(), config);
    Ok(config)
}
