use super::error::{FieldError, TableKind};
use super::metrics::compute_metrics;
use super::model::{MetricsTable, NumericTable};
use super::parser::parse_table;

/// Result of processing one field: the parsed time series (kept for
/// plotting) and the per-channel kinetics.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReport {
    pub data: NumericTable,
    pub metrics: MetricsTable,
}

/// Process one field from its two pasted text blocks.
///
/// Pure function of its inputs: fields share nothing, so a failure here
/// only withholds this field's result.
pub fn process_field(baseline_text: &str, data_text: &str) -> Result<FieldReport, FieldError> {
    if baseline_text.trim().is_empty() {
        return Err(FieldError::EmptyInput(TableKind::Baseline));
    }
    if data_text.trim().is_empty() {
        return Err(FieldError::EmptyInput(TableKind::Data));
    }

    let baseline = parse_table(baseline_text).map_err(|source| FieldError::Parse {
        table: TableKind::Baseline,
        source,
    })?;
    let data = parse_table(data_text).map_err(|source| FieldError::Parse {
        table: TableKind::Data,
        source,
    })?;

    let metrics = compute_metrics(&baseline, &data)?;

    log::info!(
        "Processed field: {} channels over {} time points",
        metrics.len(),
        data.row_count()
    );

    Ok(FieldReport { data, metrics })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::{MetricsError, ParseError};

    #[test]
    fn test_blank_baseline_is_empty_input() {
        let err = process_field("   \n ", "0 1\n1 2").unwrap_err();
        assert_eq!(err, FieldError::EmptyInput(TableKind::Baseline));
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_blank_data_is_empty_input() {
        let err = process_field("B 1", "").unwrap_err();
        assert_eq!(err, FieldError::EmptyInput(TableKind::Data));
    }

    #[test]
    fn test_mismatch_is_not_empty_input() {
        let err = process_field("B 1 2", "0 1 2 3").unwrap_err();
        assert_eq!(
            err,
            FieldError::Metrics(MetricsError::Alignment {
                expected: 2,
                actual: 3
            })
        );
        assert!(!err.is_empty_input());
        assert_eq!(
            err.to_string(),
            "channel count mismatch: baseline has 2, data has 3"
        );
    }

    #[test]
    fn test_parse_failure_names_table() {
        let err = process_field("B 1", "0 1 2\n1 2").unwrap_err();
        assert_eq!(
            err,
            FieldError::Parse {
                table: TableKind::Data,
                source: ParseError::Ragged {
                    line: 2,
                    expected: 3,
                    found: 2
                }
            }
        );
        assert!(err.to_string().starts_with("failed to parse data text"));
    }

    #[test]
    fn test_ragged_baseline_names_baseline_table() {
        let err = process_field("B 1 2\n3", "0 1 2\n1 2 3").unwrap_err();
        assert!(matches!(
            err,
            FieldError::Parse {
                table: TableKind::Baseline,
                source: ParseError::Ragged { line: 2, .. }
            }
        ));
        assert!(err.to_string().starts_with("failed to parse baseline text"));
    }

    #[test]
    fn test_non_numeric_paste_is_empty_input() {
        let err = process_field("just words", "0 1").unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_report_keeps_parsed_series() {
        let report = process_field("F0 1 1", "0 1 1\n1 3 5\n2 1 2\n").unwrap();
        assert_eq!(report.data.row_count(), 3);
        assert_eq!(report.metrics.len(), 2);
        assert_eq!(report.metrics.channels[1].t50_time, Some(2.0));
    }
}
