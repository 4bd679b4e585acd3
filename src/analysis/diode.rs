use crate::analysis::AnalysisError;
/// Voltage below which the diode is treated as flat reverse leakage.
pub const REVERSE_CLAMP_VOLTS: f64 = -5.0;
/// Static piecewise diode model.
///
/// Three regimes: the Shockley exponential law between the reverse clamp
/// and the knee, linear extrapolation of the knee-point current above the
/// knee (keeps the exponential inside its safe range), and a flat `-Is`
/// leakage current below the clamp.
#[derive(Clone, Copy, Debug)]
pub struct DiodeModel {
    saturation_current: f64,
    ideality: f64,
    thermal_voltage: f64,
    knee_voltage: f64,
}
/// I–V characteristic plus the simplified rectifier transfer curve over
/// one voltage sweep.
#[derive(Clone, Debug)]
pub struct DiodeCurve {
    pub voltages: Vec<f64>,
    pub currents: Vec<f64>,
    pub rectified: Vec<f64>,
}
impl Default for DiodeModel {
    /// Reference small-signal diode: `Is = 1pA`, `n = 1.5`, `Vt = 26mV`,
    /// knee at 0.7 V.
    fn default() -> Self {
        Self {
            saturation_current: 1e-12,
            ideality: 1.5,
            thermal_voltage: 0.026,
            knee_voltage: 0.7,
        }
    }
}
impl DiodeModel {
    pub fn new(
        saturation_current: f64,
        ideality: f64,
        thermal_voltage: f64,
    ) -> Result<Self, AnalysisError> {
        if saturation_current <= 0.0 || !saturation_current.is_finite() {
            return Err(AnalysisError::InvalidParameter {
                name: "saturation_current",
                value: saturation_current,
            });
        }
        if ideality <= 0.0 || !ideality.is_finite() {
            return Err(AnalysisError::InvalidParameter {
                name: "ideality",
                value: ideality,
            });
        }
        if thermal_voltage <= 0.0 || !thermal_voltage.is_finite() {
            return Err(AnalysisError::InvalidParameter {
                name: "thermal_voltage",
                value: thermal_voltage,
            });
        }
        Ok(Self {
            saturation_current,
            ideality,
            thermal_voltage,
            knee_voltage: 0.7,
        })
    }
    pub fn knee_voltage(&self) -> f64 {
        self.knee_voltage
    }
    /// Diode current at one bias voltage.
    pub fn current(&self, voltage: f64) -> f64 {
        let n_vt = self.ideality * self.thermal_voltage;
        if voltage > self.knee_voltage {
            self.saturation_current
                * (self.knee_voltage / n_vt).exp()
                * (1.0 + (voltage - self.knee_voltage) / n_vt)
        } else if voltage < REVERSE_CLAMP_VOLTS {
            -self.saturation_current
        } else {
            self.saturation_current * ((voltage / n_vt).exp() - 1.0)
        }
    }
    /// Evaluate the I–V characteristic and the rectifier transfer curve
    /// over a voltage sweep.
    pub fn curve(&self, voltages: &[f64]) -> DiodeCurve {
        DiodeCurve {
            voltages: voltages.to_vec(),
            currents: voltages.iter().map(|&v| self.current(v)).collect(),
            rectified: voltages
                .iter()
                .map(|&v| rectifier_output(v, self.knee_voltage))
                .collect(),
        }
    }
}
/// Simplified rectifier transfer: `max(0, v - forward_drop)`.
pub fn rectifier_output(voltage: f64, forward_drop: f64) -> f64 {
    if voltage > forward_drop {
        voltage - forward_drop
    } else {
        0.0
    }
}
/// Evenly spaced sweep from `start` to `stop` inclusive.
pub fn linear_sweep(start: f64, stop: f64, points: usize) -> Vec<f64> {
    if points == 0 {
        return Vec::new();
    }
    if points == 1 {
        return vec![start];
    }
    let step = (stop - start) / (points - 1) as f64;
    (0..points).map(|i| start + i as f64 * step).collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn exponential_law_in_transition_region() {
        let diode = DiodeModel::default();
        // 0.5 V: Is * (exp(0.5 / 0.039) - 1)
        let expected = 1e-12 * ((0.5f64 / 0.039).exp() - 1.0);
        assert!((diode.current(0.5) - expected).abs() < expected.abs() * 1e-12);
    }
    #[test]
    fn continuous_at_the_knee() {
        let diode = DiodeModel::default();
        let below = diode.current(0.7 - 1e-9);
        let above = diode.current(0.7 + 1e-9);
        assert!((above - below).abs() < below.abs() * 1e-6);
    }
    #[test]
    fn continuous_at_the_reverse_clamp() {
        let diode = DiodeModel::default();
        let above = diode.current(REVERSE_CLAMP_VOLTS + 1e-9);
        let below = diode.current(REVERSE_CLAMP_VOLTS - 1e-9);
        // exp(-5/0.039) is ~0, so both sides sit at -Is
        assert!((above - below).abs() < 1e-15);
        assert!((below - (-1e-12)).abs() < 1e-15);
    }
    #[test]
    fn forward_current_grows_with_voltage() {
        let diode = DiodeModel::default();
        let sweep = linear_sweep(-1.0, 1.0, 1000);
        let curve = diode.curve(&sweep);
        assert_eq!(curve.currents.len(), 1000);
        assert!(curve.currents.windows(2).all(|w| w[1] >= w[0]));
    }
    #[test]
    fn rectifier_clamps_below_forward_drop() {
        assert_eq!(rectifier_output(0.3, 0.7), 0.0);
        assert_eq!(rectifier_output(-0.5, 0.7), 0.0);
        assert!((rectifier_output(1.0, 0.7) - 0.3).abs() < 1e-12);
    }
    #[test]
    fn rejects_non_positive_parameters() {
        assert!(matches!(
            DiodeModel::new(0.0, 1.5, 0.026),
            Err(AnalysisError::InvalidParameter { name: "saturation_current", .. })
        ));
        assert!(matches!(
            DiodeModel::new(1e-12, -1.0, 0.026),
            Err(AnalysisError::InvalidParameter { name: "ideality", .. })
        ));
        assert!(matches!(
            DiodeModel::new(1e-12, 1.5, 0.0),
            Err(AnalysisError::InvalidParameter { name: "thermal_voltage", .. })
        ));
    }
    #[test]
    fn linear_sweep_hits_both_endpoints() {
        let sweep = linear_sweep(-1.0, 1.0, 5);
        assert_eq!(sweep, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }
}
