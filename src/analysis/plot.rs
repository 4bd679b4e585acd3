use std::io::Cursor;
use std::ops::Range;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::analysis::diode::DiodeCurve;
use crate::analysis::error::AnalysisError;
use crate::analysis::rc_filter::FrequencyResponse;
use crate::analysis::series::TimeSeries;
use crate::analysis::spectrum::Spectrum;
use crate::analysis::stats::ErrorStats;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 1000,
            background: WHITE,
            palette: vec![BLUE, RED, GREEN, BLACK, MAGENTA, CYAN],
        }
    }
}
impl PlotStyle {
    fn color(&self, idx: usize) -> RGBColor {
        self.palette[idx % self.palette.len()]
    }
    fn buffer(&self) -> Vec<u8> {
        vec![0u8; (self.width * self.height * 3) as usize]
    }
}
/// One line trace inside a panel.
struct Trace {
    label: Option<String>,
    points: Vec<(f64, f64)>,
    style: ShapeStyle,
}
impl Trace {
    fn new(points: Vec<(f64, f64)>, style: ShapeStyle) -> Self {
        Self {
            label: None,
            points,
            style,
        }
    }
    fn labeled(label: impl Into<String>, points: Vec<(f64, f64)>, style: ShapeStyle) -> Self {
        Self {
            label: Some(label.into()),
            points,
            style,
        }
    }
}
fn zip_ms(time: &[f64], samples: &[f64]) -> Vec<(f64, f64)> {
    time.iter()
        .zip(samples)
        .map(|(t, v)| (t * 1000.0, *v))
        .collect()
}
fn x_span(traces: &[Trace]) -> Range<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for trace in traces {
        for (x, _) in &trace.points {
            lo = lo.min(*x);
            hi = hi.max(*x);
        }
    }
    if !lo.is_finite() || hi <= lo {
        return 0.0..1.0;
    }
    lo..hi
}
fn y_span(traces: &[Trace]) -> Range<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for trace in traces {
        for (_, y) in &trace.points {
            lo = lo.min(*y);
            hi = hi.max(*y);
        }
    }
    if !lo.is_finite() {
        return -1.0..1.0;
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}
fn draw_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    title: &str,
    x_label: &str,
    y_label: &str,
    x_range: Range<f64>,
    y_range: Range<f64>,
    traces: &[Trace],
) -> Result<(), AnalysisError> {
    let mut chart = ChartBuilder::on(area)
        .margin(8)
        .caption(title, ("sans-serif", 20).into_font().color(&BLACK))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x_range, y_range)?;
    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .light_line_style(&BLACK.mix(0.08))
        .draw()?;
    let mut has_legend = false;
    for trace in traces {
        let series =
            chart.draw_series(LineSeries::new(trace.points.iter().cloned(), trace.style))?;
        if let Some(label) = &trace.label {
            has_legend = true;
            let style = trace.style;
            series
                .label(label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
    }
    if has_legend {
        chart
            .configure_series_labels()
            .border_style(&BLACK.mix(0.3))
            .background_style(&WHITE.mix(0.85))
            .draw()?;
    }
    Ok(())
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, AnalysisError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| AnalysisError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
/// Modulating, carrier and modulated waveforms with the ±(1 + μ·m(t))
/// envelope drawn over the AM trace.
pub fn render_am_overview(
    series: &TimeSeries,
    modulation_index: f64,
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    let time = series.time();
    let modulating = series.channel("Modulating")?;
    let carrier = series.channel("Carrier")?;
    let am_signal = series.channel("AM_Signal")?;
    let mut buffer = style.buffer();
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let rows = root.split_evenly((3, 1));
        let modulating_trace =
            Trace::new(zip_ms(time, modulating), style.color(0).stroke_width(2));
        draw_panel(
            &rows[0],
            "Modulating Signal m(t)",
            "Time (ms)",
            "Amplitude",
            x_span(std::slice::from_ref(&modulating_trace)),
            y_span(std::slice::from_ref(&modulating_trace)),
            std::slice::from_ref(&modulating_trace),
        )?;
        let carrier_trace = Trace::new(zip_ms(time, carrier), style.color(1).stroke_width(1));
        draw_panel(
            &rows[1],
            "Carrier Signal c(t)",
            "Time (ms)",
            "Amplitude",
            x_span(std::slice::from_ref(&carrier_trace)),
            y_span(std::slice::from_ref(&carrier_trace)),
            std::slice::from_ref(&carrier_trace),
        )?;
        let envelope_style = BLACK.mix(0.6).stroke_width(2);
        let upper: Vec<(f64, f64)> = time
            .iter()
            .zip(modulating)
            .map(|(t, m)| (t * 1000.0, 1.0 + modulation_index * m))
            .collect();
        let lower: Vec<(f64, f64)> = upper.iter().map(|(t, v)| (*t, -v)).collect();
        let am_traces = vec![
            Trace::new(zip_ms(time, am_signal), style.color(2).stroke_width(1)),
            Trace::labeled("Envelope", upper, envelope_style),
            Trace::new(lower, envelope_style),
        ];
        draw_panel(
            &rows[2],
            "AM Modulated Signal s(t) = [1 + u*m(t)]*cos(2*pi*fc*t)",
            "Time (ms)",
            "Amplitude",
            x_span(&am_traces),
            y_span(&am_traces),
            &am_traces,
        )?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Four stacked panels: the original modulating signal, then each
/// demodulation method overlaid on it.
pub fn render_demodulation_panels(
    series: &TimeSeries,
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    let time = series.time();
    let original = series.channel("Original")?;
    let methods = [
        ("Envelope", "Envelope Detection Demodulation"),
        ("Hilbert", "Hilbert Transform Demodulation"),
        ("Coherent", "Coherent (Synchronous) Demodulation"),
    ];
    for (channel, _) in &methods {
        series.channel(channel)?;
    }
    let mut buffer = style.buffer();
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let rows = root.split_evenly((4, 1));
        let original_trace = Trace::labeled(
            "Original Signal",
            zip_ms(time, original),
            BLACK.stroke_width(2),
        );
        draw_panel(
            &rows[0],
            "Original Modulating Signal",
            "Time (ms)",
            "Amplitude",
            x_span(std::slice::from_ref(&original_trace)),
            y_span(std::slice::from_ref(&original_trace)),
            std::slice::from_ref(&original_trace),
        )?;
        for (idx, (channel, title)) in methods.iter().enumerate() {
            let demod = series.channel(channel)?;
            let traces = vec![
                Trace::labeled(
                    "Original",
                    zip_ms(time, original),
                    BLACK.mix(0.5).stroke_width(2),
                ),
                Trace::labeled(
                    *channel,
                    zip_ms(time, demod),
                    style.color(idx + 1).stroke_width(2),
                ),
            ];
            draw_panel(
                &rows[idx + 1],
                title,
                "Time (ms)",
                "Amplitude",
                x_span(&traces),
                y_span(&traces),
                &traces,
            )?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Every demodulation method over the original signal on one axes.
pub fn render_demodulation_overlay(
    series: &TimeSeries,
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    let time = series.time();
    let mut traces = vec![Trace::labeled(
        "Original Signal",
        zip_ms(time, series.channel("Original")?),
        BLACK.stroke_width(3),
    )];
    for (idx, channel) in ["Envelope", "Hilbert", "Coherent"].iter().enumerate() {
        traces.push(Trace::labeled(
            format!("{channel} Detection"),
            zip_ms(time, series.channel(channel)?),
            style.color(idx + 1).mix(0.7).stroke_width(2),
        ));
    }
    let mut buffer = style.buffer();
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        draw_panel(
            &root,
            "AM Demodulation Methods Comparison",
            "Time (ms)",
            "Amplitude",
            x_span(&traces),
            y_span(&traces),
            &traces,
        )?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// One panel of the modulated waveform per modulation-index variant.
pub fn render_modulation_index_grid(
    entries: &[(String, TimeSeries)],
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    if entries.is_empty() {
        return Err(AnalysisError::Plot(
            "no modulation index variants to draw".into(),
        ));
    }
    for (_, series) in entries {
        series.channel("AM_Signal")?;
    }
    let mut buffer = style.buffer();
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let rows = root.split_evenly((entries.len(), 1));
        for (idx, (label, series)) in entries.iter().enumerate() {
            let trace = Trace::new(
                zip_ms(series.time(), series.channel("AM_Signal")?),
                style.color(0).stroke_width(1),
            );
            draw_panel(
                &rows[idx],
                &format!("AM Signal - {label}"),
                "Time (ms)",
                "Amplitude",
                x_span(std::slice::from_ref(&trace)),
                y_span(std::slice::from_ref(&trace)),
                std::slice::from_ref(&trace),
            )?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Linear and dB magnitude panels of a one-sided spectrum, frequency in
/// kHz capped at 20 kHz like the reference figure.
pub fn render_spectrum_figure(
    spectrum: &Spectrum,
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    if spectrum.frequencies_hz.is_empty() {
        return Err(AnalysisError::Plot("spectrum has no bins".into()));
    }
    let linear: Vec<(f64, f64)> = spectrum
        .frequencies_hz
        .iter()
        .zip(&spectrum.magnitudes)
        .map(|(f, m)| (f / 1000.0, *m))
        .collect();
    let db: Vec<(f64, f64)> = spectrum
        .frequencies_hz
        .iter()
        .zip(&spectrum.magnitudes_db)
        .map(|(f, m)| (f / 1000.0, *m))
        .collect();
    let x_max = (spectrum.frequencies_hz.last().copied().unwrap_or(1.0) / 1000.0).min(20.0);
    let db_peak = spectrum
        .magnitudes_db
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let mut buffer = style.buffer();
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let rows = root.split_evenly((2, 1));
        let linear_trace = Trace::new(linear, style.color(0).stroke_width(1));
        draw_panel(
            &rows[0],
            "Signal Spectrum (Linear Scale)",
            "Frequency (kHz)",
            "Magnitude",
            0.0..x_max,
            y_span(std::slice::from_ref(&linear_trace)),
            std::slice::from_ref(&linear_trace),
        )?;
        draw_panel(
            &rows[1],
            "Signal Spectrum (dB Scale)",
            "Frequency (kHz)",
            "Magnitude (dB)",
            0.0..x_max,
            (db_peak - 80.0)..(db_peak + 5.0),
            &[Trace::new(db, style.color(1).stroke_width(1))],
        )?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Detector input, detected envelope over it, and the envelope against an
/// assumed modulating tone scaled to the detected peak.
pub fn render_envelope_detector(
    series: &TimeSeries,
    theory_hz: f64,
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    let time = series.time();
    let am_signal = series.channel("AM_Signal")?;
    let demodulated = series.channel("Demodulated")?;
    let demod_peak = demodulated.iter().cloned().fold(0.0f64, f64::max);
    let theory: Vec<(f64, f64)> = time
        .iter()
        .map(|t| {
            (
                t * 1000.0,
                demod_peak * (2.0 * std::f64::consts::PI * theory_hz * t).cos(),
            )
        })
        .collect();
    let mut buffer = style.buffer();
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let rows = root.split_evenly((3, 1));
        let am_trace = Trace::labeled(
            "AM Signal",
            zip_ms(time, am_signal),
            style.color(0).stroke_width(1),
        );
        draw_panel(
            &rows[0],
            "AM Input Signal",
            "Time (ms)",
            "Amplitude (V)",
            x_span(std::slice::from_ref(&am_trace)),
            y_span(std::slice::from_ref(&am_trace)),
            std::slice::from_ref(&am_trace),
        )?;
        let overlay = vec![
            Trace::labeled(
                "AM Signal",
                zip_ms(time, am_signal),
                style.color(0).mix(0.5).stroke_width(1),
            ),
            Trace::labeled(
                "Detected Envelope",
                zip_ms(time, demodulated),
                style.color(1).stroke_width(3),
            ),
        ];
        draw_panel(
            &rows[1],
            "Envelope Detection",
            "Time (ms)",
            "Amplitude (V)",
            x_span(&overlay),
            y_span(&overlay),
            &overlay,
        )?;
        let detail = vec![
            Trace::labeled(
                "Detected Envelope",
                zip_ms(time, demodulated),
                style.color(1).stroke_width(2),
            ),
            Trace::labeled(
                "Reference Tone",
                theory,
                style.color(2).mix(0.7).stroke_width(2),
            ),
        ];
        draw_panel(
            &rows[2],
            "Envelope vs Reference Modulating Tone",
            "Time (ms)",
            "Amplitude (V)",
            x_span(&detail),
            y_span(&detail),
            &detail,
        )?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Magnitude and phase response panels on a log frequency axis, one series
/// per filter configuration, with the -3 dB line marked.
pub fn render_rc_response(
    entries: &[(String, FrequencyResponse)],
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    if entries.is_empty() {
        return Err(AnalysisError::Plot("no filter responses to draw".into()));
    }
    let f_lo = entries
        .iter()
        .filter_map(|(_, r)| r.frequencies_hz.first().copied())
        .fold(f64::INFINITY, f64::min);
    let f_hi = entries
        .iter()
        .filter_map(|(_, r)| r.frequencies_hz.last().copied())
        .fold(0.0f64, f64::max);
    if !f_lo.is_finite() || f_hi <= f_lo {
        return Err(AnalysisError::Plot("filter responses are empty".into()));
    }
    let db_lo = entries
        .iter()
        .flat_map(|(_, r)| r.magnitude_db.iter().cloned())
        .fold(f64::INFINITY, f64::min);
    let mut buffer = style.buffer();
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let rows = root.split_evenly((2, 1));
        {
            let mut chart = ChartBuilder::on(&rows[0])
                .margin(8)
                .caption(
                    "RC Low-Pass Magnitude Response",
                    ("sans-serif", 20).into_font().color(&BLACK),
                )
                .set_label_area_size(LabelAreaPosition::Left, 60)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .build_cartesian_2d((f_lo..f_hi).log_scale(), (db_lo - 3.0)..3.0)?;
            chart
                .configure_mesh()
                .x_desc("Frequency (Hz)")
                .y_desc("Magnitude (dB)")
                .light_line_style(&BLACK.mix(0.08))
                .draw()?;
            for (idx, (label, response)) in entries.iter().enumerate() {
                let color = style.color(idx);
                chart
                    .draw_series(LineSeries::new(
                        response
                            .frequencies_hz
                            .iter()
                            .cloned()
                            .zip(response.magnitude_db.iter().cloned()),
                        color.stroke_width(2),
                    ))?
                    .label(label.clone())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
            // -3 dB cutoff marker
            chart.draw_series(LineSeries::new(
                [(f_lo, -3.0), (f_hi, -3.0)],
                RED.mix(0.5).stroke_width(1),
            ))?;
            chart
                .configure_series_labels()
                .border_style(&BLACK.mix(0.3))
                .background_style(&WHITE.mix(0.85))
                .draw()?;
        }
        {
            let mut chart = ChartBuilder::on(&rows[1])
                .margin(8)
                .caption(
                    "RC Low-Pass Phase Response",
                    ("sans-serif", 20).into_font().color(&BLACK),
                )
                .set_label_area_size(LabelAreaPosition::Left, 60)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .build_cartesian_2d((f_lo..f_hi).log_scale(), -95.0..5.0)?;
            chart
                .configure_mesh()
                .x_desc("Frequency (Hz)")
                .y_desc("Phase (degrees)")
                .light_line_style(&BLACK.mix(0.08))
                .draw()?;
            for (idx, (label, response)) in entries.iter().enumerate() {
                let color = style.color(idx);
                chart
                    .draw_series(LineSeries::new(
                        response
                            .frequencies_hz
                            .iter()
                            .cloned()
                            .zip(response.phase_degrees.iter().cloned()),
                        color.stroke_width(2),
                    ))?
                    .label(label.clone())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
            chart
                .configure_series_labels()
                .border_style(&BLACK.mix(0.3))
                .background_style(&WHITE.mix(0.85))
                .draw()?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// I-V characteristic (current in mA) next to the rectifier transfer curve
/// with the ideal-diode guide line.
pub fn render_diode_curve(
    curve: &DiodeCurve,
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    if curve.voltages.is_empty() {
        return Err(AnalysisError::Plot("diode curve has no samples".into()));
    }
    let iv: Vec<(f64, f64)> = curve
        .voltages
        .iter()
        .zip(&curve.currents)
        .map(|(v, i)| (*v, i * 1e3))
        .collect();
    let rectified: Vec<(f64, f64)> = curve
        .voltages
        .iter()
        .zip(&curve.rectified)
        .map(|(v, o)| (*v, *o))
        .collect();
    let ideal: Vec<(f64, f64)> = curve.voltages.iter().map(|v| (*v, *v)).collect();
    let mut buffer = style.buffer();
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let columns = root.split_evenly((1, 2));
        let iv_trace = Trace::labeled("Exponential Model", iv, style.color(0).stroke_width(2));
        draw_panel(
            &columns[0],
            "Diode I-V Characteristic",
            "Voltage (V)",
            "Current (mA)",
            x_span(std::slice::from_ref(&iv_trace)),
            y_span(std::slice::from_ref(&iv_trace)),
            std::slice::from_ref(&iv_trace),
        )?;
        let transfer = vec![
            Trace::labeled(
                "Ideal Diode",
                ideal,
                style.color(2).mix(0.5).stroke_width(1),
            ),
            Trace::labeled(
                "Simplified Model (Vd=0.7V)",
                rectified,
                style.color(1).stroke_width(2),
            ),
        ];
        draw_panel(
            &columns[1],
            "Diode Rectifier Transfer",
            "Input Voltage (V)",
            "Output Voltage (V)",
            x_span(&transfer),
            y_span(&transfer),
            &transfer,
        )?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// FM trace, demodulated-vs-original overlay, and the pointwise error
/// panel annotated with the error statistics.
pub fn render_fm_result(
    fm_signal: &TimeSeries,
    demodulated: &TimeSeries,
    original: &TimeSeries,
    errors: &[f64],
    stats: &ErrorStats,
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    let fm_trace = Trace::new(
        zip_ms(fm_signal.time(), fm_signal.channel("Signal")?),
        style.color(0).stroke_width(1),
    );
    let overlay = vec![
        Trace::labeled(
            "Demodulated",
            zip_ms(demodulated.time(), demodulated.channel("Signal")?),
            style.color(1).mix(0.7).stroke_width(2),
        ),
        Trace::labeled(
            "Reference Modulating",
            zip_ms(original.time(), original.channel("Signal")?),
            style.color(2).stroke_width(2),
        ),
    ];
    let error_trace = Trace::new(
        zip_ms(demodulated.time(), errors),
        style.color(4).stroke_width(1),
    );
    let mut buffer = style.buffer();
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let rows = root.split_evenly((3, 1));
        draw_panel(
            &rows[0],
            "FM Signal",
            "Time (ms)",
            "Amplitude",
            x_span(std::slice::from_ref(&fm_trace)),
            y_span(std::slice::from_ref(&fm_trace)),
            std::slice::from_ref(&fm_trace),
        )?;
        draw_panel(
            &rows[1],
            "FM Demodulation Result",
            "Time (ms)",
            "Frequency Deviation (Hz)",
            x_span(&overlay),
            y_span(&overlay),
            &overlay,
        )?;
        draw_panel(
            &rows[2],
            "Demodulation Error",
            "Time (ms)",
            "Error (Hz)",
            x_span(std::slice::from_ref(&error_trace)),
            y_span(std::slice::from_ref(&error_trace)),
            std::slice::from_ref(&error_trace),
        )?;
        let annotation = format!(
            "MSE: {:.2}  RMSE: {:.2}  Max Error: {:.2} Hz",
            stats.mse, stats.rmse, stats.max_abs_error
        );
        let (_, row_height) = rows[2].dim_in_pixel();
        rows[2].draw(&Text::new(
            annotation,
            (90, (row_height / 8) as i32),
            ("sans-serif", 16).into_font().color(&BLACK),
        ))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::diode::{linear_sweep, DiodeModel};
    use crate::analysis::rc_filter::{log_sweep, RcFilter};
    use crate::analysis::spectrum::one_sided_spectrum;
    use std::f64::consts::PI;
    fn am_series(n: usize) -> TimeSeries {
        let fs = 100_000.0;
        let time: Vec<f64> = (0..n).map(|i| i as f64 / fs).collect();
        let modulating: Vec<f64> = time.iter().map(|t| (2.0 * PI * 500.0 * t).cos()).collect();
        let carrier: Vec<f64> = time
            .iter()
            .map(|t| (2.0 * PI * 10_000.0 * t).cos())
            .collect();
        let am: Vec<f64> = modulating
            .iter()
            .zip(&carrier)
            .map(|(m, c)| (1.0 + 0.8 * m) * c)
            .collect();
        TimeSeries::new(
            time,
            vec!["Modulating".into(), "Carrier".into(), "AM_Signal".into()],
            vec![modulating, carrier, am],
        )
        .unwrap()
    }
    #[test]
    fn am_overview_returns_png() {
        let png = render_am_overview(&am_series(512), 0.8, &PlotStyle::default()).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }
    #[test]
    fn overview_requires_expected_channels() {
        let series = TimeSeries::new(
            vec![0.0, 0.001],
            vec!["Signal".into()],
            vec![vec![0.0, 1.0]],
        )
        .unwrap();
        assert!(matches!(
            render_am_overview(&series, 0.8, &PlotStyle::default()),
            Err(AnalysisError::MissingChannel(_))
        ));
    }
    #[test]
    fn spectrum_figure_returns_png() {
        let series = am_series(1024);
        let spectrum = one_sided_spectrum(series.channel("AM_Signal").unwrap(), 100_000.0);
        let png = render_spectrum_figure(&spectrum, &PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
    }
    #[test]
    fn rc_response_figure_returns_png() {
        let sweep = log_sweep(1.0, 1e5, 400);
        let entries: Vec<(String, FrequencyResponse)> = [
            ("R=1k, C=0.1uF", RcFilter::new(1e3, 0.1e-6).unwrap()),
            ("R=47k, C=0.47uF", RcFilter::new(47e3, 0.47e-6).unwrap()),
        ]
        .into_iter()
        .map(|(label, filter)| (label.to_string(), filter.response(&sweep).unwrap()))
        .collect();
        let png = render_rc_response(&entries, &PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
    }
    #[test]
    fn diode_figure_returns_png() {
        let curve = DiodeModel::default().curve(&linear_sweep(-1.0, 1.0, 500));
        let png = render_diode_curve(&curve, &PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
    }
    #[test]
    fn empty_inputs_are_rejected() {
        assert!(render_rc_response(&[], &PlotStyle::default()).is_err());
        assert!(render_modulation_index_grid(&[], &PlotStyle::default()).is_err());
    }
}
