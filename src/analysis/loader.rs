use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use crate::analysis::{AnalysisError, TimeSeries};
/// Load a delimited record file into a [`TimeSeries`].
///
/// The first row is a header naming the columns; `time_column` selects the
/// time axis and every other column becomes a named channel. The generator
/// programs emit both comma-separated files (`Time,Modulating,...`) and
/// tab-separated ones whose header starts with a `# ` marker, so the
/// delimiter is caller-chosen and a leading `#` on the first header cell is
/// stripped.
pub fn load_series(
    path: impl AsRef<Path>,
    delimiter: u8,
    time_column: &str,
) -> Result<TimeSeries, AnalysisError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| AnalysisError::SourceUnavailable {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    read_series(BufReader::new(file), delimiter, time_column)
}
/// Parse records from any reader; see [`load_series`].
pub fn read_series(
    reader: impl Read,
    delimiter: u8,
    time_column: &str,
) -> Result<TimeSeries, AnalysisError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .has_headers(true)
        .from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    let time_index = headers
        .iter()
        .position(|h| h == time_column)
        .ok_or_else(|| AnalysisError::MissingChannel(time_column.to_string()))?;
    let mut time = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        // header line is line 1, first record line 2
        let line = row + 2;
        for (idx, field) in record.iter().enumerate() {
            let value: f64 = field.parse().map_err(|_| AnalysisError::Parse {
                line,
                message: format!("non-numeric value '{field}' in column '{}'", headers[idx]),
            })?;
            if idx == time_index {
                time.push(value);
            } else {
                columns[idx].push(value);
            }
        }
    }
    let mut channel_labels = Vec::new();
    let mut channels = Vec::new();
    for (idx, column) in columns.into_iter().enumerate() {
        if idx != time_index {
            channel_labels.push(headers[idx].clone());
            channels.push(column);
        }
    }
    TimeSeries::new(time, channel_labels, channels)
}
/// Trim a header cell and drop the comment marker the tab-separated
/// generator output carries on its first cell (`# Time(s)`).
fn normalize_header(cell: &str) -> String {
    cell.trim().trim_start_matches('#').trim_start().to_string()
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    #[test]
    fn loads_comma_separated_records() {
        let data = "Time,Modulating,Carrier\n0.0,0.5,1.0\n0.001,0.4,-1.0\n0.002,0.3,1.0\n";
        let series = read_series(Cursor::new(data), b',', "Time").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.channel_labels(), ["Modulating", "Carrier"]);
        assert_eq!(series.channel("Carrier").unwrap()[1], -1.0);
        assert!((series.sample_rate().unwrap() - 1000.0).abs() < 1e-6);
    }
    #[test]
    fn strips_comment_marker_from_header() {
        let data = "# Time(s)\tSignal\n0.0\t0.1\n0.01\t0.2\n";
        let series = read_series(Cursor::new(data), b'\t', "Time(s)").unwrap();
        assert_eq!(series.channel("Signal").unwrap(), [0.1, 0.2]);
    }
    #[test]
    fn missing_time_column_is_an_error() {
        let data = "Stamp,Signal\n0.0,0.1\n";
        let err = read_series(Cursor::new(data), b',', "Time").unwrap_err();
        assert!(matches!(err, AnalysisError::MissingChannel(name) if name == "Time"));
    }
    #[test]
    fn non_numeric_field_reports_line_and_column() {
        let data = "Time,Signal\n0.0,0.1\n0.001,oops\n";
        let err = read_series(Cursor::new(data), b',', "Time").unwrap_err();
        match err {
            AnalysisError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("Signal"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
    #[test]
    fn non_monotonic_time_column_is_rejected() {
        let data = "Time,Signal\n0.0,0.1\n0.001,0.2\n0.0005,0.3\n";
        let err = read_series(Cursor::new(data), b',', "Time").unwrap_err();
        assert!(matches!(err, AnalysisError::NonUniformTimeAxis { .. }));
    }
    #[test]
    fn unreadable_path_is_source_unavailable() {
        let err = load_series("definitely/not/here.csv", b',', "Time").unwrap_err();
        assert!(matches!(err, AnalysisError::SourceUnavailable { .. }));
    }
}
