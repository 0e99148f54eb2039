//! JSON configuration for a swarm.
//!
//! Every tunable constant of the simulation lives in [`SwarmConfig`]. The
//! default config reproduces the standard behavior exactly, and every section
//! may be omitted from a file:
//!
//! ```json
//! {
//!   "seed": 7,
//!   "lifecycle": { "separation_delay": { "start": 1.0, "end": 2.0 } },
//!   "spatial": { "cell_size": 2.0 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lifecycle::Lifecycle;
use crate::params::{SimulationParameters, MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER};
use crate::rules::{Flock, Rule};
use crate::spatial::SpatialConfig;
use crate::spawn::WordLayout;

/// Population size above which the world logs a growth warning.
pub const DEFAULT_POPULATION_WATERMARK: usize = 2000;

/// Complete swarm configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// RNG seed. Seeded from the system clock when absent.
    pub seed: Option<u64>,
    /// Steering model for separated letters.
    pub flock: Flock,
    pub lifecycle: Lifecycle,
    pub layout: WordLayout,
    /// Initial simulation parameters.
    pub params: SimulationParameters,
    /// Grid acceleration for neighbor queries. Brute force when absent.
    pub spatial: Option<SpatialConfig>,
    pub population_watermark: usize,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            seed: None,
            flock: Flock::default(),
            lifecycle: Lifecycle::default(),
            layout: WordLayout::default(),
            params: SimulationParameters::default(),
            spatial: None,
            population_watermark: DEFAULT_POPULATION_WATERMARK,
        }
    }
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")))
    }
}

fn finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")))
    }
}

impl SwarmConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let delay = &self.lifecycle.separation_delay;
        if !(delay.start >= 0.0 && delay.start <= delay.end && delay.end.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "separation_delay must be a non-negative, non-inverted range, got {}..{}",
                delay.start, delay.end
            )));
        }
        non_negative("formation_pull", self.lifecycle.formation_pull)?;
        non_negative("launch_speed", self.lifecycle.launch_speed)?;

        positive("letter_spacing", self.layout.letter_spacing)?;
        positive("row_spacing", self.layout.row_spacing)?;

        positive("damping", self.flock.damping)?;
        positive("max_speed", self.flock.max_speed)?;
        non_negative("heading_jitter", self.flock.heading_jitter)?;
        for weighted in &self.flock.rules {
            finite("rule weight", weighted.weight)?;
            match weighted.rule {
                Rule::Separate { radius, strength } | Rule::Align { radius, strength } => {
                    positive("rule radius", radius)?;
                    finite("rule strength", strength)?;
                }
                Rule::Cohere { strength, orbit } => {
                    finite("cohesion strength", strength)?;
                    finite("cohesion orbit", orbit)?;
                }
                Rule::GroupDrift { strength } => finite("drift strength", strength)?,
                Rule::Contain {
                    center,
                    radius,
                    push,
                } => {
                    if !center.is_finite() {
                        return Err(ConfigError::Invalid(format!(
                            "containment center must be finite, got {center}"
                        )));
                    }
                    positive("containment radius", radius)?;
                    finite("containment push", push)?;
                }
                Rule::Wander { strength } => non_negative("wander strength", strength)?,
            }
        }

        let speed = self.params.speed_multiplier();
        if !(MIN_SPEED_MULTIPLIER..=MAX_SPEED_MULTIPLIER).contains(&speed) {
            return Err(ConfigError::Invalid(format!(
                "speed_multiplier must be within {MIN_SPEED_MULTIPLIER}..={MAX_SPEED_MULTIPLIER}, got {speed}"
            )));
        }
        positive("group_distance", self.params.group_distance())?;

        if let Some(spatial) = &self.spatial {
            positive("cell_size", spatial.cell_size)?;
        }
        if self.population_watermark == 0 {
            return Err(ConfigError::Invalid("population_watermark must be positive".into()));
        }
        Ok(())
    }
}
