use std::f64::consts::PI;
use crate::analysis::AnalysisError;
/// Single-pole RC low-pass filter, evaluated analytically.
///
/// `H(f) = 1 / sqrt(1 + (f/fc)^2)` with `fc = 1 / (2πRC)`. Only the
/// frequency response is modeled here; the detector circuit that uses the
/// filter is an external program.
#[derive(Clone, Copy, Debug)]
pub struct RcFilter {
    resistance_ohms: f64,
    capacitance_farads: f64,
}
/// Magnitude/phase response over a frequency sweep.
#[derive(Clone, Debug)]
pub struct FrequencyResponse {
    pub frequencies_hz: Vec<f64>,
    pub magnitude_db: Vec<f64>,
    pub phase_degrees: Vec<f64>,
}
impl RcFilter {
    pub fn new(resistance_ohms: f64, capacitance_farads: f64) -> Result<Self, AnalysisError> {
        if resistance_ohms <= 0.0 || !resistance_ohms.is_finite() {
            return Err(AnalysisError::InvalidParameter {
                name: "resistance_ohms",
                value: resistance_ohms,
            });
        }
        if capacitance_farads <= 0.0 || !capacitance_farads.is_finite() {
            return Err(AnalysisError::InvalidParameter {
                name: "capacitance_farads",
                value: capacitance_farads,
            });
        }
        Ok(Self {
            resistance_ohms,
            capacitance_farads,
        })
    }
    /// -3 dB cutoff frequency, `1 / (2πRC)`.
    pub fn cutoff_hz(&self) -> f64 {
        1.0 / (2.0 * PI * self.resistance_ohms * self.capacitance_farads)
    }
    /// Evaluate magnitude (dB) and phase (degrees) at each swept frequency.
    ///
    /// The sweep must be strictly positive; one filter configuration per
    /// call, comparisons across configurations are a caller concern.
    pub fn response(&self, frequencies_hz: &[f64]) -> Result<FrequencyResponse, AnalysisError> {
        let cutoff = self.cutoff_hz();
        let mut magnitude_db = Vec::with_capacity(frequencies_hz.len());
        let mut phase_degrees = Vec::with_capacity(frequencies_hz.len());
        for &frequency in frequencies_hz {
            if frequency <= 0.0 || !frequency.is_finite() {
                return Err(AnalysisError::InvalidParameter {
                    name: "frequency_hz",
                    value: frequency,
                });
            }
            let ratio = frequency / cutoff;
            let magnitude = 1.0 / (1.0 + ratio * ratio).sqrt();
            magnitude_db.push(20.0 * magnitude.log10());
            phase_degrees.push(-ratio.atan() * 180.0 / PI);
        }
        Ok(FrequencyResponse {
            frequencies_hz: frequencies_hz.to_vec(),
            magnitude_db,
            phase_degrees,
        })
    }
}
/// Logarithmically spaced sweep from `start_hz` to `stop_hz` inclusive.
pub fn log_sweep(start_hz: f64, stop_hz: f64, points: usize) -> Vec<f64> {
    if points == 0 {
        return Vec::new();
    }
    if points == 1 {
        return vec![start_hz];
    }
    let log_start = start_hz.log10();
    let log_step = (stop_hz.log10() - log_start) / (points - 1) as f64;
    (0..points)
        .map(|i| 10.0f64.powf(log_start + i as f64 * log_step))
        .collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn cutoff_matches_rc_product() {
        // 47kΩ / 0.47µF, the detector's reference values
        let filter = RcFilter::new(47e3, 0.47e-6).unwrap();
        assert!((filter.cutoff_hz() - 7.205).abs() < 0.01);
    }
    #[test]
    fn minus_three_db_at_cutoff() {
        let filter = RcFilter::new(1e3, 0.1e-6).unwrap();
        let response = filter.response(&[filter.cutoff_hz()]).unwrap();
        assert!((response.magnitude_db[0] - (-3.0103)).abs() < 0.1);
        assert!((response.phase_degrees[0] - (-45.0)).abs() < 0.5);
    }
    #[test]
    fn magnitude_and_phase_fall_monotonically() {
        let filter = RcFilter::new(1e3, 0.1e-6).unwrap();
        let sweep = log_sweep(1.0, 1e5, 200);
        let response = filter.response(&sweep).unwrap();
        assert!(response.magnitude_db.windows(2).all(|w| w[1] <= w[0]));
        assert!(response.phase_degrees.windows(2).all(|w| w[1] <= w[0]));
        assert!(response
            .phase_degrees
            .iter()
            .all(|&p| (-90.0..=0.0).contains(&p)));
    }
    #[test]
    fn rejects_non_positive_parameters() {
        assert!(matches!(
            RcFilter::new(0.0, 1e-6),
            Err(AnalysisError::InvalidParameter { name: "resistance_ohms", .. })
        ));
        assert!(matches!(
            RcFilter::new(1e3, -1e-6),
            Err(AnalysisError::InvalidParameter { name: "capacitance_farads", .. })
        ));
    }
    #[test]
    fn rejects_non_positive_sweep_frequency() {
        let filter = RcFilter::new(1e3, 0.1e-6).unwrap();
        assert!(matches!(
            filter.response(&[10.0, 0.0, 100.0]),
            Err(AnalysisError::InvalidParameter { name: "frequency_hz", .. })
        ));
    }
    #[test]
    fn log_sweep_hits_both_endpoints() {
        let sweep = log_sweep(1.0, 1e5, 1000);
        assert_eq!(sweep.len(), 1000);
        assert!((sweep[0] - 1.0).abs() < 1e-9);
        assert!((sweep[999] - 1e5).abs() < 1e-6);
        assert!(sweep.windows(2).all(|w| w[1] > w[0]));
    }
}
