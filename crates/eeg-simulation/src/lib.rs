//! EEG-Simulation: synthetic EEG signal generation
//!
//! Sums fixed-frequency alpha, beta and theta sinusoids with Gaussian noise.

pub mod wave_bands;
pub mod noise;
pub mod eeg_simulator;

pub use eeg_simulator::*;
pub use noise::*;
pub use wave_bands::*;
