//! Recording: time axis and waveform containers for a single EEG trace

use crate::error::{ensure_positive, EegError, EegResult};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Largest trace a single recording may hold
pub const MAX_SAMPLES: usize = 100_000_000;

/// Number of samples for `duration` seconds at `sampling_rate` Hz.
///
/// The `f32` product is truncated toward zero, so `0.7 s x 10 Hz` is 7
/// samples. Non-positive inputs, products below one whole sample and
/// products above [`MAX_SAMPLES`] are rejected.
pub fn sample_count(duration: f32, sampling_rate: f32) -> EegResult<usize> {
    ensure_positive("duration", duration)?;
    ensure_positive("sampling_rate", sampling_rate)?;

    // f32 product: its rounding absorbs the inputs' representation error
    let count = (duration * sampling_rate).trunc();

    if count < 1.0 {
        return Err(EegError::InvalidParameter {
            name: "duration",
            value: duration,
            reason: "duration x sampling_rate must yield at least one sample",
        });
    }

    if !count.is_finite() || count > MAX_SAMPLES as f32 {
        return Err(EegError::InvalidParameter {
            name: "duration",
            value: duration,
            reason: "duration x sampling_rate exceeds the maximum sample count",
        });
    }

    Ok(count as usize)
}

/// Uniformly spaced timestamps in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis(Vec<f32>);

impl TimeAxis {
    /// `count` evenly spaced points over `[0, duration]`, both ends included.
    ///
    /// The last point is exactly `duration`; a single point axis is `[0]`.
    pub fn linspace(duration: f32, count: usize) -> Self {
        match count {
            0 => TimeAxis(Vec::new()),
            1 => TimeAxis(vec![0.0]),
            _ => {
                let step = duration as f64 / (count - 1) as f64;
                let mut points: Vec<f32> = (0..count)
                    .map(|i| (i as f64 * step) as f32)
                    .collect();
                points[count - 1] = duration;
                TimeAxis(points)
            }
        }
    }

    /// First timestamp (0 for any non-empty axis)
    pub fn start(&self) -> Option<f32> {
        self.0.first().copied()
    }

    /// Last timestamp
    pub fn end(&self) -> Option<f32> {
        self.0.last().copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl Deref for TimeAxis {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.0
    }
}

/// Amplitude samples positionally aligned with a [`TimeAxis`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform(Vec<f32>);

impl Waveform {
    pub fn new(samples: Vec<f32>) -> Self {
        Waveform(samples)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    /// Summary statistics of the samples
    pub fn stats(&self) -> SignalStats {
        SignalStats::calculate(&self.0)
    }
}

impl Deref for Waveform {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for Waveform {
    fn from(samples: Vec<f32>) -> Self {
        Waveform(samples)
    }
}

/// A generated trace together with the parameters that produced it
#[derive(Debug, Clone)]
pub struct EEGRecording {
    time_axis: TimeAxis,
    waveform: Waveform,
    sampling_rate: f32,
    duration: f32,
}

impl EEGRecording {
    /// Bundle an axis and waveform, rejecting mismatched lengths
    pub fn new(
        time_axis: TimeAxis,
        waveform: Waveform,
        sampling_rate: f32,
        duration: f32,
    ) -> EegResult<Self> {
        ensure_positive("sampling_rate", sampling_rate)?;
        ensure_positive("duration", duration)?;

        if time_axis.len() != waveform.len() {
            return Err(EegError::InvalidSignalData {
                reason: format!(
                    "Time axis has {} points but waveform has {} samples",
                    time_axis.len(),
                    waveform.len()
                ),
            });
        }

        Ok(EEGRecording {
            time_axis,
            waveform,
            sampling_rate,
            duration,
        })
    }

    pub fn len(&self) -> usize {
        self.waveform.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waveform.is_empty()
    }

    pub fn time_axis(&self) -> &TimeAxis {
        &self.time_axis
    }

    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    /// Sampling rate in Hz the waveform was generated at
    pub fn sampling_rate(&self) -> f32 {
        self.sampling_rate
    }

    /// Duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn into_parts(self) -> (TimeAxis, Waveform) {
        (self.time_axis, self.waveform)
    }
}

/// Basic statistics for a waveform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalStats {
    pub mean: f32,
    pub rms: f32,
    pub std_dev: f32,
    pub min: f32,
    pub max: f32,
    pub peak_to_peak: f32,
}

impl SignalStats {
    pub fn calculate(data: &[f32]) -> Self {
        if data.is_empty() {
            return Self {
                mean: 0.0,
                rms: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                peak_to_peak: 0.0,
            };
        }

        let sum: f32 = data.iter().sum();
        let mean = sum / data.len() as f32;

        let sum_sq: f32 = data.iter().map(|x| x * x).sum();
        let rms = (sum_sq / data.len() as f32).sqrt();

        let variance: f32 = data.iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f32>() / data.len() as f32;
        let std_dev = variance.sqrt();

        let min = data.iter().fold(f32::INFINITY, |a, &b| a.min(b));
        let max = data.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));

        Self {
            mean,
            rms,
            std_dev,
            min,
            max,
            peak_to_peak: max - min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_truncates() {
        assert_eq!(sample_count(10.0, 250.0).unwrap(), 2500);
        assert_eq!(sample_count(1.0, 4.0).unwrap(), 4);
        assert_eq!(sample_count(1.5, 3.0).unwrap(), 4);
        assert_eq!(sample_count(0.99, 4.0).unwrap(), 3);
    }

    #[test]
    fn test_sample_count_decimal_durations() {
        assert_eq!(sample_count(0.7, 10.0).unwrap(), 7);
        assert_eq!(sample_count(0.9, 10.0).unwrap(), 9);
        assert_eq!(sample_count(2.3, 100.0).unwrap(), 230);
        assert_eq!(sample_count(0.7, 250.0).unwrap(), 175);
    }

    #[test]
    fn test_sample_count_upper_bound() {
        assert!(matches!(
            sample_count(1.0e30, 250.0),
            Err(EegError::InvalidParameter { name: "duration", .. })
        ));
        assert!(sample_count(f32::MAX, f32::MAX).is_err());
        assert_eq!(sample_count(1.0, MAX_SAMPLES as f32).unwrap(), MAX_SAMPLES);
    }

    #[test]
    fn test_sample_count_rejects_invalid() {
        assert!(matches!(
            sample_count(0.0, 250.0),
            Err(EegError::InvalidParameter { name: "duration", .. })
        ));
        assert!(matches!(
            sample_count(10.0, -1.0),
            Err(EegError::InvalidParameter { name: "sampling_rate", .. })
        ));
        assert!(sample_count(0.001, 250.0).is_err());
    }

    #[test]
    fn test_linspace_includes_both_ends() {
        let axis = TimeAxis::linspace(1.0, 4);
        let expected = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];

        assert_eq!(axis.len(), 4);
        for (actual, expected) in axis.iter().zip(expected.iter()) {
            assert!((actual - expected).abs() < 1e-6);
        }
        assert_eq!(axis.start(), Some(0.0));
        assert_eq!(axis.end(), Some(1.0));
    }

    #[test]
    fn test_linspace_monotonic() {
        let axis = TimeAxis::linspace(10.0, 2500);
        assert!(axis.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(axis.end(), Some(10.0));
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(TimeAxis::linspace(5.0, 0).is_empty());
        assert_eq!(TimeAxis::linspace(5.0, 1).as_slice(), &[0.0]);
    }

    #[test]
    fn test_recording_rejects_length_mismatch() {
        let axis = TimeAxis::linspace(1.0, 4);
        let waveform = Waveform::new(vec![0.0; 3]);

        let result = EEGRecording::new(axis, waveform, 4.0, 1.0);
        assert!(matches!(result, Err(EegError::InvalidSignalData { .. })));
    }

    #[test]
    fn test_recording_parts() {
        let axis = TimeAxis::linspace(1.0, 4);
        let waveform = Waveform::new(vec![1.0, 2.0, 3.0, 4.0]);

        let recording = EEGRecording::new(axis.clone(), waveform.clone(), 4.0, 1.0).unwrap();
        assert_eq!(recording.len(), 4);
        assert_eq!(recording.sampling_rate(), 4.0);

        let (parts_axis, parts_waveform) = recording.into_parts();
        assert_eq!(parts_axis, axis);
        assert_eq!(parts_waveform, waveform);
    }

    #[test]
    fn test_signal_stats() {
        let stats = Waveform::new(vec![1.0, -1.0, 1.0, -1.0]).stats();
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.rms, 1.0);
        assert_eq!(stats.peak_to_peak, 2.0);

        let empty = SignalStats::calculate(&[]);
        assert_eq!(empty.max, 0.0);
    }
}
