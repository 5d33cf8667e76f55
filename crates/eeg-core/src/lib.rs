//! EEG-Core: Foundation types for the EEG simulator
//!
//! Time axis, waveform and recording containers shared by the simulation,
//! processing and plotting crates.

pub mod recording;
pub mod error;

pub use recording::*;
pub use error::{ensure_positive, EegError, EegResult};
