//! One-sided magnitude spectrum of a real-valued trace

use eeg_core::{ensure_positive, EegError, EegResult};
use realfft::RealFftPlanner;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Bin centre frequencies of a one-sided DFT of `len` samples.
///
/// Returns `len / 2 + 1` non-negative, ascending values spaced by
/// `sampling_rate / len`.
pub fn rfft_frequencies(len: usize, sampling_rate: f32) -> Vec<f32> {
    if len == 0 {
        return Vec::new();
    }

    let resolution = sampling_rate as f64 / len as f64;
    (0..=len / 2)
        .map(|k| (k as f64 * resolution) as f32)
        .collect()
}

/// Local maximum of a magnitude spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralPeak {
    pub frequency: f32,
    pub magnitude: f32,
}

/// Frequency bins paired with DFT magnitudes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    frequencies: Vec<f32>,
    magnitudes: Vec<f32>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Spacing between adjacent bins in Hz
    pub fn resolution(&self) -> f32 {
        match self.frequencies.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Up to `count` strongest interior local maxima, strongest first.
    ///
    /// The DC bin is never reported.
    pub fn peak_frequencies(&self, count: usize) -> Vec<SpectralPeak> {
        let m = &self.magnitudes;
        let mut peaks: Vec<SpectralPeak> = (1..m.len())
            .filter(|&i| {
                let rising = m[i] > m[i - 1];
                let not_falling_after = i + 1 == m.len() || m[i] >= m[i + 1];
                rising && not_falling_after
            })
            .map(|i| SpectralPeak {
                frequency: self.frequencies[i],
                magnitude: m[i],
            })
            .collect();

        peaks.sort_by(|a, b| {
            b.magnitude
                .partial_cmp(&a.magnitude)
                .unwrap_or(Ordering::Equal)
        });
        peaks.truncate(count);
        peaks
    }
}

/// Computes spectra, reusing FFT plans across calls
pub struct SpectrumAnalyzer {
    planner: RealFftPlanner<f32>,
}

impl SpectrumAnalyzer {
    pub fn new() -> Self {
        SpectrumAnalyzer {
            planner: RealFftPlanner::new(),
        }
    }

    /// Magnitude of the real-input DFT of `samples`, with bins for `sampling_rate`
    pub fn analyze(&mut self, samples: &[f32], sampling_rate: f32) -> EegResult<Spectrum> {
        ensure_positive("sampling_rate", sampling_rate)?;
        if samples.is_empty() {
            return Err(EegError::InvalidSignalData {
                reason: "cannot compute the spectrum of an empty waveform".to_string(),
            });
        }

        let fft = self.planner.plan_fft_forward(samples.len());
        let mut input = fft.make_input_vec();
        input.copy_from_slice(samples);
        let mut output = fft.make_output_vec();

        fft.process(&mut input, &mut output)
            .map_err(|e| EegError::SpectrumError {
                reason: e.to_string(),
            })?;

        let magnitudes: Vec<f32> = output.iter().map(|c| c.norm()).collect();
        let frequencies = rfft_frequencies(samples.len(), sampling_rate);

        debug!(
            samples = samples.len(),
            bins = magnitudes.len(),
            sampling_rate,
            "computed spectrum"
        );

        Ok(Spectrum {
            frequencies,
            magnitudes,
        })
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
