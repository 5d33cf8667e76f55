//! EEG-Plotter: renders simulated EEG traces to raster images
//!
//! Time-domain and frequency-domain line charts written through an
//! [`ImageSink`].

pub mod chart;
pub mod config;
pub mod glyphs;
pub mod renderer;
pub mod sink;

pub use chart::LineChart;
pub use config::{RenderConfig, RunConfig};
pub use renderer::{Renderer, FREQUENCY_SPECTRUM, TIME_SERIES};
pub use sink::{DirectorySink, ImageSink, MemorySink};
