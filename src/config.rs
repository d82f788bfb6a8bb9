use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::core::sampler::{DEFAULT_MAX_SAMPLES, DEFAULT_TIME_STEP_S, StopPolicy};
use crate::core::window::{DEFAULT_X_PADDING_M, DEFAULT_Y_PADDING_M};

pub const CONFIG_PATH_ENV: &str = "PARABOLIC_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "parabolic.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub time_step: f64,
    pub max_time: Option<f64>,
    pub max_samples: usize,
    pub frame_pause_ms: u64,
    pub ground_impact: bool,
    pub x_padding: f64,
    pub y_padding: f64,
    pub chart_dir: PathBuf,
    pub chart_size: (u32, u32),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP_S,
            max_time: None,
            max_samples: DEFAULT_MAX_SAMPLES,
            frame_pause_ms: 10,
            ground_impact: true,
            x_padding: DEFAULT_X_PADDING_M,
            y_padding: DEFAULT_Y_PADDING_M,
            chart_dir: PathBuf::from("."),
            chart_size: (1024, 768),
        }
    }
}

impl SimulationConfig {
    /// Reads the TOML file named by `PARABOLIC_CONFIG`, else `parabolic.toml`.
    /// A missing default file yields the defaults. Callers load `.env` first.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(invalid("time_step", "must be a positive number"));
        }
        if self
            .max_time
            .is_some_and(|max_time| !(max_time.is_finite() && max_time > 0.0))
        {
            return Err(invalid("max_time", "must be a positive number"));
        }
        if self.max_samples == 0 {
            return Err(invalid("max_samples", "must be at least 1"));
        }
        if !(self.x_padding.is_finite() && self.x_padding >= 0.0) {
            return Err(invalid("x_padding", "must be a non-negative number"));
        }
        if !(self.y_padding.is_finite() && self.y_padding >= 0.0) {
            return Err(invalid("y_padding", "must be a non-negative number"));
        }
        if self.chart_size.0 == 0 || self.chart_size.1 == 0 {
            return Err(invalid("chart_size", "width and height must be non-zero"));
        }
        Ok(())
    }

    pub fn frame_pause(&self) -> Duration {
        Duration::from_millis(self.frame_pause_ms)
    }

    pub fn stop_policy(&self) -> StopPolicy {
        let mut policy = StopPolicy::ground_impact();
        if !self.ground_impact {
            policy = policy.without_ground_impact();
        }
        if let Some(max_time) = self.max_time {
            policy = policy.with_time_bound(max_time);
        }
        policy
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
