//! EEG signal simulator: band sinusoids plus Gaussian noise

use crate::noise::{GaussianNoise, NoiseSource, DEFAULT_NOISE_STD};
use crate::wave_bands::WaveComponent;
use eeg_core::{
    ensure_positive, sample_count, EEGRecording, EegError, EegResult, TimeAxis, Waveform,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default trace length in seconds
pub const DEFAULT_DURATION: f32 = 10.0;
/// Default sampling rate in Hz
pub const DEFAULT_SAMPLING_RATE: f32 = 250.0;

/// Configuration for EEG simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EEGConfig {
    /// Trace length in seconds
    pub duration: f32,
    /// Sampling rate in Hz
    pub sampling_rate: f32,
    /// Sinusoids summed into the trace
    pub components: Vec<WaveComponent>,
    /// Standard deviation of the additive Gaussian noise (0.0 = no noise)
    pub noise_std: f32,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for EEGConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            sampling_rate: DEFAULT_SAMPLING_RATE,
            components: WaveComponent::defaults(),
            noise_std: DEFAULT_NOISE_STD,
            seed: None,
        }
    }
}

impl EEGConfig {
    pub fn validate(&self) -> EegResult<()> {
        sample_count(self.duration, self.sampling_rate)?;

        if !(self.noise_std.is_finite() && self.noise_std >= 0.0) {
            return Err(EegError::InvalidParameter {
                name: "noise_std",
                value: self.noise_std,
                reason: "must be a non-negative finite number",
            });
        }

        for component in &self.components {
            ensure_positive("frequency", component.frequency)?;
            if !component.band.contains(component.frequency) {
                warn!(
                    band = component.band.name(),
                    frequency = component.frequency,
                    "component frequency lies outside its EEG band"
                );
            }
            if !component.amplitude.is_finite() {
                return Err(EegError::InvalidParameter {
                    name: "amplitude",
                    value: component.amplitude,
                    reason: "must be finite",
                });
            }
        }

        Ok(())
    }

    /// Number of samples a run with this configuration produces
    pub fn sample_count(&self) -> EegResult<usize> {
        sample_count(self.duration, self.sampling_rate)
    }
}

/// EEG signal simulator
pub struct EEGSimulator {
    config: EEGConfig,
    noise: Box<dyn NoiseSource>,
}

impl EEGSimulator {
    /// Create simulator with Gaussian noise built from the configuration
    pub fn new(config: EEGConfig) -> EegResult<Self> {
        config.validate()?;
        let noise = GaussianNoise::new(config.noise_std, config.seed)?;

        Ok(EEGSimulator {
            config,
            noise: Box::new(noise),
        })
    }

    /// Create simulator drawing noise from `noise` instead.
    ///
    /// `noise_std` and `seed` in the configuration are ignored.
    pub fn with_noise_source(config: EEGConfig, noise: Box<dyn NoiseSource>) -> EegResult<Self> {
        config.validate()?;
        Ok(EEGSimulator { config, noise })
    }

    /// Generate one recording of `config.duration` seconds
    pub fn generate(&mut self) -> EegResult<EEGRecording> {
        let count = self.config.sample_count()?;
        let time_axis = TimeAxis::linspace(self.config.duration, count);

        let mut samples = vec![0.0; count];
        self.noise.fill(&mut samples);

        for (sample, &t) in samples.iter_mut().zip(time_axis.iter()) {
            let deterministic: f32 = self.config.components
                .iter()
                .map(|component| component.value_at(t))
                .sum();
            *sample += deterministic;
        }

        debug!(
            samples = count,
            duration = self.config.duration,
            sampling_rate = self.config.sampling_rate,
            components = self.config.components.len(),
            "generated EEG trace"
        );

        EEGRecording::new(
            time_axis,
            Waveform::new(samples),
            self.config.sampling_rate,
            self.config.duration,
        )
    }

    /// Get current configuration
    pub fn config(&self) -> &EEGConfig {
        &self.config
    }
}

/// Generate a time axis and waveform with the default bands and
/// entropy-seeded noise of scale 0.5.
pub fn generate(duration: f32, sampling_rate: f32) -> EegResult<(TimeAxis, Waveform)> {
    let config = EEGConfig {
        duration,
        sampling_rate,
        ..EEGConfig::default()
    };

    let mut simulator = EEGSimulator::new(config)?;
    Ok(simulator.generate()?.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::SilentNoise;
    use crate::wave_bands::{WaveBand, WaveComponent};

    #[test]
    fn test_eeg_simulator_basic() {
        let config = EEGConfig::default();
        let mut simulator = EEGSimulator::new(config).unwrap();

        let recording = simulator.generate().unwrap();

        assert_eq!(recording.len(), 2500);
        assert_eq!(recording.time_axis().len(), recording.waveform().len());
        assert_eq!(recording.sampling_rate(), 250.0);
        assert_eq!(recording.time_axis().start(), Some(0.0));
        assert_eq!(recording.time_axis().end(), Some(10.0));
    }

    #[test]
    fn test_generate_small_grid() {
        let (axis, waveform) = generate(1.0, 4.0).unwrap();

        assert_eq!(axis.len(), 4);
        assert_eq!(waveform.len(), 4);
        assert!((axis[1] - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(axis.end(), Some(1.0));
    }

    #[test]
    fn test_generate_lengths_follow_truncation() {
        for (duration, rate, expected) in [
            (2.0, 100.0, 200),
            (0.5, 3.0, 1),
            (2.5, 5.0, 12),
            (0.7, 10.0, 7),
            (0.9, 10.0, 9),
            (2.3, 100.0, 230),
            (0.7, 250.0, 175),
        ] {
            let (axis, waveform) = generate(duration, rate).unwrap();
            assert_eq!(axis.len(), expected);
            assert_eq!(waveform.len(), expected);
            assert!(axis.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            generate(0.0, 250.0),
            Err(EegError::InvalidParameter { name: "duration", .. })
        ));
        assert!(matches!(
            generate(10.0, -250.0),
            Err(EegError::InvalidParameter { name: "sampling_rate", .. })
        ));
        assert!(generate(f32::NAN, 250.0).is_err());
    }

    #[test]
    fn test_oversized_request_is_rejected() {
        assert!(matches!(
            generate(1.0e30, 250.0),
            Err(EegError::InvalidParameter { name: "duration", .. })
        ));
    }

    #[test]
    fn test_silent_noise_gives_deterministic_sum() {
        let config = EEGConfig {
            duration: 1.0,
            sampling_rate: 250.0,
            ..EEGConfig::default()
        };
        let mut simulator =
            EEGSimulator::with_noise_source(config, Box::new(SilentNoise)).unwrap();
        let recording = simulator.generate().unwrap();

        let components = WaveComponent::defaults();
        for (&t, &value) in recording.time_axis().iter().zip(recording.waveform().iter()) {
            let expected: f32 = components.iter().map(|c| c.value_at(t)).sum();
            assert!((value - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_seeded_runs_match() {
        let config = EEGConfig {
            seed: Some(1234),
            ..EEGConfig::default()
        };

        let first = EEGSimulator::new(config.clone()).unwrap().generate().unwrap();
        let second = EEGSimulator::new(config).unwrap().generate().unwrap();
        assert_eq!(first.waveform(), second.waveform());
    }

    #[test]
    fn test_noise_changes_signal() {
        let config = EEGConfig { seed: Some(99), ..EEGConfig::default() };
        let noisy = EEGSimulator::new(config.clone()).unwrap().generate().unwrap();
        let clean = EEGSimulator::with_noise_source(config, Box::new(SilentNoise))
            .unwrap()
            .generate()
            .unwrap();

        let residual: Vec<f32> = noisy.waveform().iter()
            .zip(clean.waveform().iter())
            .map(|(n, c)| n - c)
            .collect();
        let stats = eeg_core::SignalStats::calculate(&residual);
        assert!((stats.std_dev - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_config_validation() {
        let mut config = EEGConfig::default();
        assert!(config.validate().is_ok());

        config.noise_std = -0.1;
        assert!(config.validate().is_err());

        config.noise_std = 0.5;
        // outside the beta band, but still a valid sinusoid
        config.components.push(WaveComponent {
            band: WaveBand::Beta,
            frequency: 40.0,
            amplitude: 1.0,
        });
        assert!(config.validate().is_ok());

        config.components.push(WaveComponent {
            band: WaveBand::Beta,
            frequency: 0.0,
            amplitude: 1.0,
        });
        assert!(config.validate().is_err());
    }
}
