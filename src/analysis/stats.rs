use crate::analysis::AnalysisError;
/// Scalar error figures between a reference channel and a demodulated one.
#[derive(Clone, Copy, Debug)]
pub struct ErrorStats {
    pub mse: f64,
    pub rmse: f64,
    pub max_abs_error: f64,
    /// `10·log10(Σref² / Σerr²)`; infinite for a perfect reconstruction.
    pub snr_db: f64,
}
/// Pointwise difference `derived[i] - reference[i]`.
///
/// The two sequences are assumed to share one time axis; no resampling or
/// alignment happens here, unequal lengths are an error.
pub fn error_series(reference: &[f64], derived: &[f64]) -> Result<Vec<f64>, AnalysisError> {
    if reference.len() != derived.len() {
        return Err(AnalysisError::LengthMismatch {
            left: reference.len(),
            right: derived.len(),
        });
    }
    if reference.is_empty() {
        return Err(AnalysisError::InsufficientSamples {
            required: 1,
            actual: 0,
        });
    }
    Ok(derived
        .iter()
        .zip(reference)
        .map(|(d, r)| d - r)
        .collect())
}
impl ErrorStats {
    /// Compare a demodulated sequence against its reference.
    pub fn between(reference: &[f64], derived: &[f64]) -> Result<Self, AnalysisError> {
        let errors = error_series(reference, derived)?;
        let n = errors.len() as f64;
        let error_power: f64 = errors.iter().map(|e| e * e).sum();
        let signal_power: f64 = reference.iter().map(|r| r * r).sum();
        let mse = error_power / n;
        let snr_db = if error_power > 0.0 {
            10.0 * (signal_power / error_power).log10()
        } else {
            f64::INFINITY
        };
        Ok(Self {
            mse,
            rmse: mse.sqrt(),
            max_abs_error: errors.iter().fold(0.0f64, |acc, e| acc.max(e.abs())),
            snr_db,
        })
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn known_sequences_give_known_stats() {
        let reference = [0.0, 1.0, 0.0, -1.0];
        let derived = [0.0, 1.0, 1.0, -1.0];
        let stats = ErrorStats::between(&reference, &derived).unwrap();
        assert!((stats.mse - 0.25).abs() < 1e-12);
        assert!((stats.rmse - 0.5).abs() < 1e-12);
        assert!((stats.max_abs_error - 1.0).abs() < 1e-12);
        // signal power 2, error power 1 -> 10*log10(2)
        assert!((stats.snr_db - 3.0103).abs() < 1e-3);
    }
    #[test]
    fn length_mismatch_is_rejected() {
        let err = ErrorStats::between(&[0.0; 4], &[0.0; 5]).unwrap_err();
        assert!(matches!(err, AnalysisError::LengthMismatch { left: 4, right: 5 }));
    }
    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            error_series(&[], &[]),
            Err(AnalysisError::InsufficientSamples { .. })
        ));
    }
    #[test]
    fn identical_sequences_have_infinite_snr() {
        let samples = [0.5, -0.5, 0.25];
        let stats = ErrorStats::between(&samples, &samples).unwrap();
        assert_eq!(stats.mse, 0.0);
        assert!(stats.snr_db.is_infinite());
    }
    #[test]
    fn error_series_is_signed() {
        let errors = error_series(&[1.0, 2.0], &[0.5, 3.0]).unwrap();
        assert_eq!(errors, vec![-0.5, 1.0]);
    }
}
