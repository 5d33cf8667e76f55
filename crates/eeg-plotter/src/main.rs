//! EEG Simulator - generate a synthetic EEG trace and plot it

use anyhow::Context;
use eeg_plotter::{DirectorySink, Renderer, RunConfig};
use eeg_simulation::EEGSimulator;
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = RunConfig::default();
    config.validate().context("invalid default configuration")?;
    let config_json = config.to_json()?;
    debug!(config = %config_json, "run configuration");

    let mut simulator = EEGSimulator::new(config.simulation.clone())?;
    let recording = simulator.generate()?;

    let stats = recording.waveform().stats();
    info!(
        samples = recording.len(),
        duration = recording.duration(),
        sampling_rate = recording.sampling_rate(),
        mean = stats.mean,
        rms = stats.rms,
        peak_to_peak = stats.peak_to_peak,
        "generated EEG signal"
    );

    let output_dir = config.render.output_dir.clone();
    let mut sink = DirectorySink::new(&output_dir);
    let mut renderer = Renderer::new(config.render)?;

    let spectrum = renderer
        .render_recording(&recording, &mut sink)
        .with_context(|| format!("failed to write plots to {}", output_dir.display()))?;

    for peak in spectrum.peak_frequencies(3) {
        info!(frequency = peak.frequency, magnitude = peak.magnitude, "spectral peak");
    }

    println!("Plots saved to '{}/' directory.", output_dir.display());
    Ok(())
}
