//! # modtrace
//!
//! Turns AM/FM signal trace records produced by the external
//! generator/demodulator programs into PNG figures: time-domain overlays,
//! a one-sided spectrum, RC low-pass response curves and the diode I-V
//! characteristic of the envelope detector.
//!
//! ```bash
//! # AM figures from am_signal.csv (+ optional demodulation records)
//! modtrace am
//!
//! # Detector figure plus the analytical RC / diode charts
//! modtrace envelope --all
//!
//! # FM demodulation comparison from the tab-separated traces
//! modtrace fm
//! ```
mod analysis;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use analysis::{
    amplitude_spectrum, error_series, linear_sweep, load_series, log_sweep, DiodeModel,
    ErrorStats, PlotStyle, RcFilter, TimeSeries,
};
/// Reference modulation index of the generated AM traces.
const MODULATION_INDEX: f64 = 0.8;
/// Assumed modulating tone of the envelope detector traces (Hz).
const DETECTOR_TONE_HZ: f64 = 500.0;
#[derive(Parser)]
#[command(name = "modtrace")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Directory containing the generated trace files
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,
    /// Directory the PNG figures are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}
#[derive(Subcommand)]
enum Commands {
    /// AM modulation, demodulation and spectrum figures
    Am,
    /// Envelope detector figure and the analytical detector models
    Envelope {
        /// Draw the RC low-pass frequency response
        #[arg(long)]
        rc: bool,
        /// Draw the diode characteristic
        #[arg(long)]
        diode: bool,
        /// Draw every envelope-detector figure
        #[arg(long)]
        all: bool,
    },
    /// FM demodulation comparison figure
    Fm,
}
fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("cannot create output directory {}", cli.out_dir.display()))?;
    match cli.command {
        Commands::Am => run_am(&cli.data_dir, &cli.out_dir),
        Commands::Envelope { rc, diode, all } => {
            run_envelope(&cli.data_dir, &cli.out_dir, rc || all, diode || all)
        }
        Commands::Fm => run_fm(&cli.data_dir, &cli.out_dir),
    }
}
fn save_png(out_dir: &Path, name: &str, png: Vec<u8>) -> Result<()> {
    let path = out_dir.join(name);
    fs::write(&path, png).with_context(|| format!("cannot write {}", path.display()))?;
    info!("saved {}", path.display());
    Ok(())
}
/// Run one optional figure step; a failure is logged and the remaining
/// steps still run.
fn run_optional(label: &str, step: impl FnOnce() -> Result<()>) {
    if let Err(err) = step() {
        warn!("skipping {label}: {err:#}");
    }
}
fn run_am(data_dir: &Path, out_dir: &Path) -> Result<()> {
    let style = PlotStyle::default();
    // the modulated trace is the one required input, everything else is
    // optional
    let signal = load_series(data_dir.join("am_signal.csv"), b',', "Time")
        .context("am_signal.csv is required; run the AM generator first")?;
    info!(
        "loaded am_signal.csv: {} samples, {:.1} ms",
        signal.len(),
        signal.duration_seconds() * 1000.0
    );
    save_png(
        out_dir,
        "am_modulation.png",
        analysis::render_am_overview(&signal, MODULATION_INDEX, &style)?,
    )?;
    run_optional("demodulation figures", || {
        let demod = load_series(data_dir.join("am_demodulated.csv"), b',', "Time")?;
        save_png(
            out_dir,
            "am_demodulation.png",
            analysis::render_demodulation_panels(&demod, &style)?,
        )?;
        save_png(
            out_dir,
            "am_demod_comparison.png",
            analysis::render_demodulation_overlay(&demod, &style)?,
        )?;
        for channel in ["Envelope", "Hilbert", "Coherent"] {
            let stats =
                ErrorStats::between(demod.channel("Original")?, demod.channel(channel)?)?;
            info!(
                "{channel}: mse={:.6} rmse={:.6} max={:.6} snr={:.1} dB",
                stats.mse, stats.rmse, stats.max_abs_error, stats.snr_db
            );
        }
        Ok(())
    });
    run_optional("spectrum figure", || {
        let spectrum = amplitude_spectrum(&signal, "AM_Signal")?;
        save_png(
            out_dir,
            "am_spectrum.png",
            analysis::render_spectrum_figure(&spectrum, &style)?,
        )
    });
    run_optional("modulation index comparison", || {
        let variants = [
            ("am_signal_m30.csv", "u = 0.3 (30%)"),
            ("am_signal.csv", "u = 0.8 (80%)"),
            ("am_signal_m100.csv", "u = 1.0 (100%)"),
            ("am_signal_m120.csv", "u = 1.2 (120% - Over-modulation)"),
        ];
        let mut entries: Vec<(String, TimeSeries)> = Vec::new();
        for (file, label) in variants {
            match load_series(data_dir.join(file), b',', "Time") {
                Ok(series) => entries.push((label.to_string(), series)),
                Err(err) => info!("variant {file} not loaded: {err}"),
            }
        }
        save_png(
            out_dir,
            "am_modulation_index_comparison.png",
            analysis::render_modulation_index_grid(&entries, &style)?,
        )
    });
    Ok(())
}
fn run_envelope(data_dir: &Path, out_dir: &Path, rc: bool, diode: bool) -> Result<()> {
    let style = PlotStyle::default();
    run_optional("envelope detector figure", || {
        let result = load_series(
            data_dir.join("envelope_detector_result.csv"),
            b',',
            "time",
        )?;
        save_png(
            out_dir,
            "envelope_detector_result.png",
            analysis::render_envelope_detector(&result, DETECTOR_TONE_HZ, &style)?,
        )
    });
    if rc {
        // detector candidates from the reference design, middle one is the
        // fitted choice
        let configs = [
            (1e3, 0.1e-6, "R=1k, C=0.1uF"),
            (47e3, 0.47e-6, "R=47k, C=0.47uF (best)"),
            (1e6, 1e-6, "R=1M, C=1uF"),
        ];
        let sweep = log_sweep(1.0, 1e5, 1000);
        let mut entries = Vec::new();
        for (resistance, capacitance, label) in configs {
            let filter = RcFilter::new(resistance, capacitance)?;
            info!("{label}: fc = {:.2} Hz", filter.cutoff_hz());
            entries.push((label.to_string(), filter.response(&sweep)?));
        }
        save_png(
            out_dir,
            "rc_filter_response.png",
            analysis::render_rc_response(&entries, &style)?,
        )?;
    }
    if diode {
        let curve = DiodeModel::default().curve(&linear_sweep(-1.0, 1.0, 1000));
        save_png(
            out_dir,
            "diode_characteristic.png",
            analysis::render_diode_curve(&curve, &style)?,
        )?;
    }
    Ok(())
}
fn run_fm(data_dir: &Path, out_dir: &Path) -> Result<()> {
    let style = PlotStyle::default();
    let fm_signal = load_series(data_dir.join("fm_signal.txt"), b'\t', "Time(s)")?;
    let demodulated = load_series(data_dir.join("fm_demodulated.txt"), b'\t', "Time(s)")?;
    let original = load_series(
        data_dir.join("fm_original_modulating.txt"),
        b'\t',
        "Time(s)",
    )?;
    let errors = error_series(
        original.channel("Signal")?,
        demodulated.channel("Signal")?,
    )?;
    let stats = ErrorStats::between(
        original.channel("Signal")?,
        demodulated.channel("Signal")?,
    )?;
    info!(
        "fm demodulation: mse={:.2} rmse={:.2} max={:.2} Hz",
        stats.mse, stats.rmse, stats.max_abs_error
    );
    save_png(
        out_dir,
        "fm_demodulation_result.png",
        analysis::render_fm_result(&fm_signal, &demodulated, &original, &errors, &stats, &style)?,
    )
}
