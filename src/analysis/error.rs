use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot read record source {}: {message}", path.display())]
    SourceUnavailable { path: PathBuf, message: String },
    #[error("channel '{0}' not present in record source")]
    MissingChannel(String),
    #[error("need at least {required} samples, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },
    #[error("time axis is not uniform and strictly increasing at sample {index}")]
    NonUniformTimeAxis { index: usize },
    #[error("parameter {name} out of range: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("malformed record at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for AnalysisError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        AnalysisError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for AnalysisError {
    fn from(value: image::ImageError) -> Self {
        AnalysisError::Plot(value.to_string())
    }
}
impl From<csv::Error> for AnalysisError {
    fn from(value: csv::Error) -> Self {
        let line = value
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or_default();
        AnalysisError::Parse {
            line,
            message: value.to_string(),
        }
    }
}
