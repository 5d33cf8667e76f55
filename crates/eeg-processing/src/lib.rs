//! EEG-Processing: spectral analysis of simulated EEG traces
//!
//! One-sided magnitude spectra computed with a real-input FFT.

pub mod spectrum;

pub use spectrum::{rfft_frequencies, SpectralPeak, Spectrum, SpectrumAnalyzer};
