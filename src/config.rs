use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    filter::{FilterVariant, DEFAULT_FIRE_INTENSITY, DEFAULT_NOISE_INTENSITY},
};

/// Main configuration for secam-fire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Filter intensities and behaviour
    #[serde(default)]
    pub filter: FilterConfig,

    /// How frames are produced
    #[serde(default)]
    pub processing: ProcessingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.filter.validate()?;
        self.processing.validate()?;
        Ok(())
    }
}

/// Filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Fire intensity, nominally 0.0-1.0
    pub fire_intensity: f64,

    /// Noise intensity, nominally 0.0-1.0
    pub noise_intensity: f64,

    /// Fixed random seed; fresh entropy when absent
    pub seed: Option<u64>,

    /// Behavioural variant of the effect
    pub variant: FilterVariant,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            fire_intensity: DEFAULT_FIRE_INTENSITY,
            noise_intensity: DEFAULT_NOISE_INTENSITY,
            seed: None,
            variant: FilterVariant::default(),
        }
    }
}

impl FilterConfig {
    fn validate(&self) -> Result<()> {
        // Out-of-range intensities are allowed, they just extrapolate
        if !self.fire_intensity.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "filter.fire_intensity".to_string(),
                value: self.fire_intensity.to_string()
            }.into());
        }

        if !self.noise_intensity.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "filter.noise_intensity".to_string(),
                value: self.noise_intensity.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Frame production settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of worker threads for row pairs
    pub threads: usize,

    /// Number of degraded frames to render from one input
    pub frames: usize,

    /// Frame rate used to derive each frame's timestamp
    pub fps: f64,

    /// Drive both intensities from the frame time and draw a progress bar
    pub time_sweep: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            frames: 1,
            fps: 25.0, // SECAM territory
            time_sweep: false,
        }
    }
}

impl ProcessingConfig {
    fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "processing.threads".to_string(),
                value: self.threads.to_string()
            }.into());
        }

        if self.frames == 0 {
            return Err(ConfigError::InvalidValue {
                key: "processing.frames".to_string(),
                value: self.frames.to_string()
            }.into());
        }

        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "processing.fps".to_string(),
                value: self.fps.to_string()
            }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FireSignPolicy;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.filter.fire_intensity, 0.125);
        assert_eq!(config.filter.variant, FilterVariant::legacy());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.filter.seed = Some(1234);
        original_config.filter.variant = FilterVariant::latest();
        original_config.processing.frames = 12;

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(
            &file_path,
            "[filter]\nfire_intensity = 0.9\n\n[filter.variant]\nfire_sign = \"sticky\"\nprefilter_seed = \"zero\"\nscan_direction = \"left_to_right\"\n",
        )
        .unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.filter.fire_intensity, 0.9);
        assert_eq!(config.filter.noise_intensity, 0.125);
        assert_eq!(config.filter.variant.fire_sign, FireSignPolicy::Sticky);
        assert_eq!(config.processing.frames, 1);
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempdir().unwrap();
        assert!(Config::from_file(dir.path().join("nope.toml")).is_err());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[filter\nfire_intensity = ").unwrap();
        assert!(Config::from_file(&bad).is_err());
    }

    #[test]
    fn test_out_of_range_intensity_is_valid() {
        let mut config = Config::default();
        config.filter.fire_intensity = 10.0;
        config.filter.noise_intensity = -5.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = Config::default();
        config.filter.noise_intensity = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.processing.threads = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.processing.fps = 0.0;
        assert!(config.validate().is_err());
    }
}
