use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::history::HistoryConfig;
use crate::preset::{ParticlePreset, PresetKind};
use crate::simulation::SimulationParams;
use crate::timeline::TimelineConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Preset applied over `simulation` at startup.
    pub preset: Option<PresetKind>,
    /// Seed for spawn randomness. Random when absent.
    pub seed: Option<u64>,
    pub simulation: SimulationParams,
    pub timeline: TimelineConfig,
    pub history: HistoryConfig,
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let read = || {
            fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&read()?)?,
            Some("json") => Self::from_json_str(&read()?)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        let ranges = [
            ("speed", sim.min_speed, sim.max_speed),
            ("size", sim.min_size, sim.max_size),
            ("life", sim.min_life, sim.max_life),
        ];
        for (name, min, max) in ranges {
            if !min.is_finite() || !max.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} range must be finite")));
            }
            if min > max {
                return Err(ConfigError::Invalid(format!(
                    "{name} range is inverted ({min} > {max})"
                )));
            }
        }
        let scalars = [
            ("gravity", sim.gravity),
            ("hover_spawn_rate", sim.hover_spawn_rate),
            ("click_spawn_rate", sim.click_spawn_rate),
            ("trail_life", sim.trail_life),
            ("playback_fps", self.timeline.playback_fps),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite")));
        }
        if !(0.0..=1.0).contains(&sim.drag) {
            return Err(ConfigError::Invalid(format!(
                "drag must be within [0, 1], got {}",
                sim.drag
            )));
        }
        if self.history.capacity == 0 {
            return Err(ConfigError::Invalid("history capacity must be at least 1".into()));
        }
        Ok(())
    }

    /// Simulation parameters with the configured preset applied.
    pub fn resolved_params(&self) -> SimulationParams {
        let mut params = self.simulation.clone();
        if let Some(kind) = self.preset {
            ParticlePreset::for_kind(kind).apply(&mut params);
        }
        params
    }
}
