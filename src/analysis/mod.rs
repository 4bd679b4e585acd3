// src/analysis/mod.rs
pub mod diode;
pub mod error;
pub mod loader;
pub mod plot;
pub mod rc_filter;
pub mod series;
pub mod spectrum;
pub mod stats;
pub use diode::{linear_sweep, rectifier_output, DiodeCurve, DiodeModel};
pub use error::AnalysisError;
pub use loader::{load_series, read_series};
pub use plot::{
    render_am_overview, render_demodulation_overlay, render_demodulation_panels,
    render_diode_curve, render_envelope_detector, render_fm_result,
    render_modulation_index_grid, render_rc_response, render_spectrum_figure, PlotStyle,
};
pub use rc_filter::{log_sweep, FrequencyResponse, RcFilter};
pub use series::TimeSeries;
pub use spectrum::{amplitude_spectrum, one_sided_spectrum, Spectrum};
pub use stats::{error_series, ErrorStats};
