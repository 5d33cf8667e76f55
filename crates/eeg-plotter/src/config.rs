//! Run configuration for the simulator binary

use eeg_core::{ensure_positive, invalid_parameter, EegError, EegResult};
use eeg_simulation::{EEGConfig, DEFAULT_SAMPLING_RATE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Smallest canvas the chart layout fits in
pub const MIN_WIDTH: u32 = 200;
pub const MIN_HEIGHT: u32 = 150;

/// Plot output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Directory the images are written to
    pub output_dir: PathBuf,
    /// Sampling rate assumed when labelling frequency bins (Hz)
    pub sampling_rate: f32,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("plots"),
            sampling_rate: DEFAULT_SAMPLING_RATE,
            // 10 x 3 inch figure at 100 dpi
            width: 1000,
            height: 300,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> EegResult<()> {
        ensure_positive("sampling_rate", self.sampling_rate)?;

        if self.width < MIN_WIDTH {
            return Err(invalid_parameter!(
                "width",
                self.width as f32,
                "image must be at least 200 pixels wide"
            ));
        }

        if self.height < MIN_HEIGHT {
            return Err(invalid_parameter!(
                "height",
                self.height as f32,
                "image must be at least 150 pixels high"
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(EegError::ConfigurationError {
                message: "Output directory must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Everything one run of the binary needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub simulation: EEGConfig,
    pub render: RenderConfig,
}

impl RunConfig {
    pub fn validate(&self) -> EegResult<()> {
        self.simulation.validate()?;
        self.render.validate()
    }

    /// Export configuration as JSON
    pub fn to_json(&self) -> EegResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EegError::ConfigurationError {
            message: format!("Failed to serialize configuration: {}", e),
        })
    }

    /// Import configuration from JSON
    pub fn from_json(json: &str) -> EegResult<Self> {
        serde_json::from_str(json).map_err(|e| EegError::ConfigurationError {
            message: format!("Failed to deserialize configuration: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.render.output_dir, PathBuf::from("plots"));
        assert_eq!(config.render.sampling_rate, config.simulation.sampling_rate);
        assert_eq!(config.simulation.duration, 10.0);
    }

    #[test]
    fn test_render_config_validation() {
        let mut config = RenderConfig::default();
        assert!(config.validate().is_ok());

        config.sampling_rate = 0.0;
        assert!(config.validate().is_err());

        config.sampling_rate = 250.0;
        config.width = 50;
        assert!(matches!(
            config.validate(),
            Err(EegError::InvalidParameter { name: "width", .. })
        ));

        config.width = 1000;
        config.height = 10;
        assert!(config.validate().is_err());

        config.height = 300;
        config.output_dir = PathBuf::new();
        assert!(matches!(
            config.validate(),
            Err(EegError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_json_serialization() {
        let config = RunConfig::default();

        let json = config.to_json().unwrap();
        assert!(json.contains("output_dir"));

        let deserialized = RunConfig::from_json(&json).unwrap();
        assert_eq!(deserialized.render.output_dir, config.render.output_dir);
        assert_eq!(deserialized.simulation.components, config.simulation.components);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            RunConfig::from_json("{ not json"),
            Err(EegError::ConfigurationError { .. })
        ));
    }
}
