//! Renders the time-domain trace and magnitude spectrum of a recording

use crate::chart::LineChart;
use crate::config::RenderConfig;
use crate::sink::ImageSink;
use eeg_core::{EEGRecording, EegError, EegResult, TimeAxis, Waveform};
use eeg_processing::{Spectrum, SpectrumAnalyzer};
use tracing::{debug, info};

/// Image name of the time-domain plot
pub const TIME_SERIES: &str = "time_series";
/// Image name of the frequency-domain plot
pub const FREQUENCY_SPECTRUM: &str = "frequency_spectrum";

pub struct Renderer {
    config: RenderConfig,
    analyzer: SpectrumAnalyzer,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> EegResult<Self> {
        config.validate()?;
        Ok(Renderer {
            config,
            analyzer: SpectrumAnalyzer::new(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Plot `waveform` against `axis` and its spectrum into `sink`.
    ///
    /// Frequency bins assume the configured sampling rate; callers holding a
    /// [`EEGRecording`] should prefer [`Renderer::render_recording`].
    pub fn render(
        &mut self,
        axis: &TimeAxis,
        waveform: &Waveform,
        sink: &mut dyn ImageSink,
    ) -> EegResult<Spectrum> {
        let sampling_rate = self.config.sampling_rate;
        debug!(sampling_rate, "rendering with configured sampling rate");
        self.render_at(axis, waveform, sampling_rate, sink)
    }

    /// Like [`Renderer::render`], labelling bins with the rate the recording
    /// was generated at.
    pub fn render_recording(
        &mut self,
        recording: &EEGRecording,
        sink: &mut dyn ImageSink,
    ) -> EegResult<Spectrum> {
        self.render_at(
            recording.time_axis(),
            recording.waveform(),
            recording.sampling_rate(),
            sink,
        )
    }

    fn render_at(
        &mut self,
        axis: &TimeAxis,
        waveform: &Waveform,
        sampling_rate: f32,
        sink: &mut dyn ImageSink,
    ) -> EegResult<Spectrum> {
        if axis.len() != waveform.len() {
            return Err(EegError::InvalidSignalData {
                reason: format!(
                    "Time axis has {} points but waveform has {} samples",
                    axis.len(),
                    waveform.len()
                ),
            });
        }

        sink.prepare()?;

        let (width, height) = (self.config.width, self.config.height);

        let time_chart = LineChart::new("Simulated EEG Signal", "Time (s)", "Amplitude");
        sink.write_image(TIME_SERIES, &time_chart.draw(axis, waveform, width, height))?;

        let spectrum = self.analyzer.analyze(waveform, sampling_rate)?;

        let spectrum_chart =
            LineChart::new("Frequency Spectrum of EEG Signal", "Frequency (Hz)", "Amplitude");
        let spectrum_image =
            spectrum_chart.draw(spectrum.frequencies(), spectrum.magnitudes(), width, height);
        sink.write_image(FREQUENCY_SPECTRUM, &spectrum_image)?;

        info!(
            samples = waveform.len(),
            bins = spectrum.len(),
            sampling_rate,
            destination = %sink.location(),
            "rendered EEG plots"
        );

        Ok(spectrum)
    }
}
