use crate::analysis::AnalysisError;
/// Relative spacing tolerance when deriving a sample rate.
const UNIFORM_REL_TOL: f64 = 1e-6;
/// Immutable record of uniformly sampled, named channels on a shared time axis.
#[derive(Clone, Debug)]
pub struct TimeSeries {
    time: Vec<f64>,
    channel_labels: Vec<String>,
    channels: Vec<Vec<f64>>, // channel -> samples
}
impl TimeSeries {
    /// Build a series from a time axis and per-channel sample vectors.
    ///
    /// The time axis must be strictly increasing and every channel must
    /// match its length; violations surface as structured errors rather
    /// than undefined numeric results downstream.
    pub fn new(
        time: Vec<f64>,
        channel_labels: Vec<String>,
        channels: Vec<Vec<f64>>,
    ) -> Result<Self, AnalysisError> {
        if channels.len() != channel_labels.len() {
            return Err(AnalysisError::LengthMismatch {
                left: channel_labels.len(),
                right: channels.len(),
            });
        }
        for (idx, pair) in time.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(AnalysisError::NonUniformTimeAxis { index: idx + 1 });
            }
        }
        for channel in &channels {
            if channel.len() != time.len() {
                return Err(AnalysisError::LengthMismatch {
                    left: time.len(),
                    right: channel.len(),
                });
            }
        }
        Ok(Self {
            time,
            channel_labels,
            channels,
        })
    }
    pub fn len(&self) -> usize {
        self.time.len()
    }
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
    pub fn time(&self) -> &[f64] {
        &self.time
    }
    pub fn channel_labels(&self) -> &[String] {
        &self.channel_labels
    }
    pub fn has_channel(&self, name: &str) -> bool {
        self.channel_labels.iter().any(|label| label == name)
    }
    /// Samples of the named channel.
    pub fn channel(&self, name: &str) -> Result<&[f64], AnalysisError> {
        self.channel_labels
            .iter()
            .position(|label| label == name)
            .map(|idx| self.channels[idx].as_slice())
            .ok_or_else(|| AnalysisError::MissingChannel(name.to_string()))
    }
    /// Sample rate in Hz, `1 / (t[1] - t[0])`.
    ///
    /// Defined only for two or more samples with uniform spacing.
    pub fn sample_rate(&self) -> Result<f64, AnalysisError> {
        if self.time.len() < 2 {
            return Err(AnalysisError::InsufficientSamples {
                required: 2,
                actual: self.time.len(),
            });
        }
        let dt = self.time[1] - self.time[0];
        for (idx, pair) in self.time.windows(2).enumerate().skip(1) {
            let step = pair[1] - pair[0];
            if (step - dt).abs() > UNIFORM_REL_TOL * dt {
                return Err(AnalysisError::NonUniformTimeAxis { index: idx + 1 });
            }
        }
        Ok(1.0 / dt)
    }
    pub fn duration_seconds(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn axis(n: usize, dt: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * dt).collect()
    }
    #[test]
    fn sample_rate_from_first_delta() {
        let series = TimeSeries::new(axis(10, 0.001), vec!["A".into()], vec![vec![0.0; 10]]).unwrap();
        let fs = series.sample_rate().unwrap();
        assert!((fs - 1000.0).abs() < 1e-6);
    }
    #[test]
    fn rejects_non_monotonic_axis() {
        let err = TimeSeries::new(
            vec![0.0, 0.001, 0.0005],
            vec!["A".into()],
            vec![vec![0.0; 3]],
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::NonUniformTimeAxis { index: 2 }));
    }
    #[test]
    fn sample_rate_requires_two_samples() {
        let series = TimeSeries::new(vec![0.0], vec!["A".into()], vec![vec![1.0]]).unwrap();
        assert!(matches!(
            series.sample_rate(),
            Err(AnalysisError::InsufficientSamples { required: 2, actual: 1 })
        ));
    }
    #[test]
    fn sample_rate_rejects_jittered_axis() {
        let series = TimeSeries::new(
            vec![0.0, 0.001, 0.003],
            vec!["A".into()],
            vec![vec![0.0; 3]],
        )
        .unwrap();
        assert!(matches!(
            series.sample_rate(),
            Err(AnalysisError::NonUniformTimeAxis { .. })
        ));
    }
    #[test]
    fn missing_channel_is_an_error() {
        let series = TimeSeries::new(axis(4, 0.5), vec!["A".into()], vec![vec![0.0; 4]]).unwrap();
        assert!(series.has_channel("A"));
        let err = series.channel("B").unwrap_err();
        assert!(matches!(err, AnalysisError::MissingChannel(name) if name == "B"));
    }
    #[test]
    fn channel_length_must_match_axis() {
        let err = TimeSeries::new(axis(4, 0.5), vec!["A".into()], vec![vec![0.0; 3]]).unwrap_err();
        assert!(matches!(err, AnalysisError::LengthMismatch { left: 4, right: 3 }));
    }
}
