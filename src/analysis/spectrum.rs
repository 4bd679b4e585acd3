use rustfft::{num_complex::Complex64, FftPlanner};
use crate::analysis::{AnalysisError, TimeSeries};
/// Floor added to magnitudes before the logarithm so the dB form stays
/// finite for empty bins.
pub const DB_FLOOR: f64 = 1e-10;
/// One-sided amplitude spectrum of a real-valued channel.
#[derive(Clone, Debug)]
pub struct Spectrum {
    pub frequencies_hz: Vec<f64>,
    pub magnitudes: Vec<f64>,
    pub magnitudes_db: Vec<f64>,
}
impl Spectrum {
    /// Frequency of the strongest bin.
    pub fn peak_frequency_hz(&self) -> Option<f64> {
        self.magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| self.frequencies_hz[idx])
    }
    /// Width of one frequency bin in Hz.
    pub fn bin_width_hz(&self) -> f64 {
        self.frequencies_hz.get(1).copied().unwrap_or(0.0)
    }
}
/// Compute the one-sided amplitude spectrum of one channel.
///
/// The full-length transform is taken as-is: no windowing, no zero padding.
/// Bins `0..=n/2` are kept (DC through Nyquist for even `n`), each scaled
/// by `2/n`. The DC bin is over-scaled by that single-sided convention on
/// purpose; downstream output is calibrated against it.
pub fn amplitude_spectrum(series: &TimeSeries, channel: &str) -> Result<Spectrum, AnalysisError> {
    let samples = series.channel(channel)?;
    let sample_rate = series.sample_rate()?;
    Ok(one_sided_spectrum(samples, sample_rate))
}
/// One-sided spectrum of an already-extracted sample block.
pub fn one_sided_spectrum(samples: &[f64], sample_rate_hz: f64) -> Spectrum {
    let n = samples.len();
    if n == 0 {
        return Spectrum {
            frequencies_hz: Vec::new(),
            magnitudes: Vec::new(),
            magnitudes_db: Vec::new(),
        };
    }
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex64> = samples
        .iter()
        .map(|&v| Complex64::new(v, 0.0))
        .collect();
    fft.process(&mut buffer);
    let kept = n / 2 + 1;
    let scale = 2.0 / n as f64;
    let mut frequencies = Vec::with_capacity(kept);
    let mut magnitudes = Vec::with_capacity(kept);
    let mut magnitudes_db = Vec::with_capacity(kept);
    for (k, value) in buffer.iter().take(kept).enumerate() {
        frequencies.push(k as f64 * sample_rate_hz / n as f64);
        let magnitude = value.norm() * scale;
        magnitudes.push(magnitude);
        magnitudes_db.push(20.0 * (magnitude + DB_FLOOR).log10());
    }
    Spectrum {
        frequencies_hz: frequencies,
        magnitudes,
        magnitudes_db,
    }
}
