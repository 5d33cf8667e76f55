//! EEG frequency bands and the sinusoidal components that stand in for them

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Named EEG rhythm bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveBand {
    /// Theta rhythm, 4-8 Hz
    Theta,
    /// Alpha rhythm, 8-13 Hz
    Alpha,
    /// Beta rhythm, 13-30 Hz
    Beta,
}

impl WaveBand {
    /// Frequency the simulator uses for this band
    pub fn nominal_frequency(&self) -> f32 {
        match self {
            WaveBand::Theta => 6.0,
            WaveBand::Alpha => 10.0,
            WaveBand::Beta => 20.0,
        }
    }

    /// Conventional band limits in Hz as `(low, high)`
    pub fn frequency_range(&self) -> (f32, f32) {
        match self {
            WaveBand::Theta => (4.0, 8.0),
            WaveBand::Alpha => (8.0, 13.0),
            WaveBand::Beta => (13.0, 30.0),
        }
    }

    pub fn contains(&self, frequency: f32) -> bool {
        let (low, high) = self.frequency_range();
        frequency >= low && frequency <= high
    }

    pub fn name(&self) -> &'static str {
        match self {
            WaveBand::Theta => "theta",
            WaveBand::Alpha => "alpha",
            WaveBand::Beta => "beta",
        }
    }
}

/// One sinusoid contributing to the simulated trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveComponent {
    pub band: WaveBand,
    /// Frequency in Hz
    pub frequency: f32,
    pub amplitude: f32,
}

impl WaveComponent {
    /// Unit amplitude sinusoid at the band's nominal frequency
    pub fn for_band(band: WaveBand) -> Self {
        WaveComponent {
            band,
            frequency: band.nominal_frequency(),
            amplitude: 1.0,
        }
    }

    /// `amplitude * sin(2*pi*frequency*t)`
    pub fn value_at(&self, time: f32) -> f32 {
        self.amplitude * (2.0 * PI * self.frequency * time).sin()
    }

    /// Alpha, beta and theta at 10, 20 and 6 Hz
    pub fn defaults() -> Vec<WaveComponent> {
        vec![
            WaveComponent::for_band(WaveBand::Alpha),
            WaveComponent::for_band(WaveBand::Beta),
            WaveComponent::for_band(WaveBand::Theta),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_frequencies_fall_in_band() {
        for band in [WaveBand::Theta, WaveBand::Alpha, WaveBand::Beta] {
            assert!(band.contains(band.nominal_frequency()), "{}", band.name());
        }
    }

    #[test]
    fn test_default_components() {
        let components = WaveComponent::defaults();
        let frequencies: Vec<f32> = components.iter().map(|c| c.frequency).collect();

        assert_eq!(frequencies, vec![10.0, 20.0, 6.0]);
        assert!(components.iter().all(|c| c.amplitude == 1.0));
    }

    #[test]
    fn test_component_value() {
        let alpha = WaveComponent::for_band(WaveBand::Alpha);

        assert_eq!(alpha.value_at(0.0), 0.0);
        // quarter period of 10 Hz
        assert!((alpha.value_at(0.025) - 1.0).abs() < 1e-5);
        assert!((alpha.value_at(0.075) + 1.0).abs() < 1e-5);
    }
}
