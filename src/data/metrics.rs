use super::error::{MetricsError, TableKind};
use super::model::{ChannelMetrics, MetricsTable, NumericTable};

/// Decimal digits kept in the T50 duration.
pub const DURATION_DECIMALS: usize = 7;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Compute the kinetics table for one field.
///
/// The first row of `baseline` provides one baseline value per channel; the
/// first pasted column of `data` is the time axis and every other column is a
/// channel. Channels are paired by position, so both tables must carry the
/// same number of channels.
pub fn compute_metrics(
    baseline: &NumericTable,
    data: &NumericTable,
) -> Result<MetricsTable, MetricsError> {
    if baseline.is_empty() {
        return Err(MetricsError::EmptyTable {
            table: TableKind::Baseline,
        });
    }
    if data.is_empty() {
        return Err(MetricsError::EmptyTable {
            table: TableKind::Data,
        });
    }
    if !data.has_leading_column() {
        return Err(MetricsError::MissingTimeAxis);
    }

    let data_channels = data.channel_columns();
    if data_channels.is_empty() {
        log::warn!("Data table has a time axis but no numeric channel columns");
        return Ok(MetricsTable::default());
    }

    let baseline_channels = baseline.channel_columns();
    if baseline_channels.len() != data_channels.len() {
        return Err(MetricsError::Alignment {
            expected: baseline_channels.len(),
            actual: data_channels.len(),
        });
    }

    let time = data.column(0);
    let channels = baseline_channels
        .iter()
        .zip(&data_channels)
        .map(|(&b_col, &d_col)| {
            channel_metrics(baseline.value(0, b_col), &time, &data.column(d_col))
        })
        .collect();

    Ok(MetricsTable { channels })
}

// ---------------------------------------------------------------------------
// Per-channel kinetics
// ---------------------------------------------------------------------------

/// Kinetics of one channel given its baseline, the shared time axis and its
/// values (index-aligned with `time`).
pub fn channel_metrics(
    baseline: Option<f64>,
    time: &[Option<f64>],
    values: &[Option<f64>],
) -> ChannelMetrics {
    let Some((peak_idx, max)) = first_peak(values) else {
        return ChannelMetrics {
            baseline,
            ..Default::default()
        };
    };

    let delta = baseline.map(|b| max - b);
    let half_delta = delta.map(|d| d / 2.0);
    let t50_value = half_delta.map(|h| max - h);

    let max_time = time_at(time, peak_idx);
    let t50_time = t50_value
        .and_then(|threshold| first_crossing(values, peak_idx, threshold))
        .and_then(|idx| time_at(time, idx));

    let t50_duration = max_time
        .zip(t50_time)
        .map(|(peak, crossing)| round_to(crossing - peak, DURATION_DECIMALS));

    ChannelMetrics {
        baseline,
        max: Some(max),
        delta,
        half_delta,
        t50_value,
        max_time,
        t50_time,
        t50_duration,
    }
}

/// Index and value of the largest number; the earliest row wins on ties.
/// `None` if every value is missing.
pub fn first_peak(values: &[Option<f64>]) -> Option<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .fold(None, |best, (i, v)| match best {
            Some((_, best_v)) if best_v >= v => best,
            _ => Some((i, v)),
        })
}

/// First index at or after `from` whose value is `<= threshold`.
/// Missing values never match.
pub fn first_crossing(values: &[Option<f64>], from: usize, threshold: f64) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, v)| v.is_some_and(|v| v <= threshold))
        .map(|(i, _)| i)
}

fn time_at(time: &[Option<f64>], idx: usize) -> Option<f64> {
    time.get(idx).copied().flatten()
}

/// Round the exact stored value to `digits` decimal places, ties to even.
pub fn round_to(value: f64, digits: usize) -> f64 {
    format!("{value:.digits$}").parse().unwrap_or(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parser::parse_table;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-10)
    }

    fn tables(baseline: &str, data: &str) -> (NumericTable, NumericTable) {
        (parse_table(baseline).unwrap(), parse_table(data).unwrap())
    }

    #[test]
    fn test_two_channel_field() {
        let (b, d) = tables("B 10 20", "0 15 30\n1 25 15\n2 20 10\n");
        let table = compute_metrics(&b, &d).unwrap();
        assert_eq!(table.len(), 2);

        let ch0 = table.channels[0];
        assert!(approx(ch0.baseline, 10.0));
        assert!(approx(ch0.max, 25.0));
        assert!(approx(ch0.delta, 15.0));
        assert!(approx(ch0.half_delta, 7.5));
        assert!(approx(ch0.t50_value, 17.5));
        assert!(approx(ch0.max_time, 1.0));
        // 25 then 20: never at or below 17.5
        assert_eq!(ch0.t50_time, None);
        assert_eq!(ch0.t50_duration, None);

        let ch1 = table.channels[1];
        assert!(approx(ch1.baseline, 20.0));
        assert!(approx(ch1.max, 30.0));
        assert!(approx(ch1.t50_value, 25.0));
        assert!(approx(ch1.max_time, 0.0));
        assert!(approx(ch1.t50_time, 1.0));
        assert!(approx(ch1.t50_duration, 1.0));
    }

    #[test]
    fn test_numeric_label_column_is_not_a_channel() {
        let (b, d) = tables("0 10 20", "0 15 30\n1 25 15\n");
        let table = compute_metrics(&b, &d).unwrap();
        assert!(approx(table.channels[0].baseline, 10.0));
        assert!(approx(table.channels[1].baseline, 20.0));
    }

    #[test]
    fn test_channel_count_mismatch() {
        let (b, d) = tables("B 1 2", "0 1 2 3\n1 4 5 6\n");
        assert_eq!(
            compute_metrics(&b, &d).unwrap_err(),
            MetricsError::Alignment {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_only_channel_pruned_gives_empty_table() {
        let (b, d) = tables("B 10", "0 x\n1 y\n2 z\n");
        let table = compute_metrics(&b, &d).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_tables_rejected() {
        let (b, d) = tables("label", "0 1\n1 2\n");
        assert_eq!(
            compute_metrics(&b, &d).unwrap_err(),
            MetricsError::EmptyTable {
                table: TableKind::Baseline
            }
        );

        let (b, d) = tables("B 1", "");
        assert_eq!(
            compute_metrics(&b, &d).unwrap_err(),
            MetricsError::EmptyTable {
                table: TableKind::Data
            }
        );
    }

    #[test]
    fn test_missing_time_axis() {
        let (b, d) = tables("B 1", "a 1\nb 2\n");
        assert_eq!(
            compute_metrics(&b, &d).unwrap_err(),
            MetricsError::MissingTimeAxis
        );
    }

    #[test]
    fn test_rising_signal_never_decays() {
        let (b, d) = tables("B 0", "0 1\n1 2\n2 3\n3 4\n");
        let ch = compute_metrics(&b, &d).unwrap().channels[0];
        assert!(approx(ch.baseline, 0.0));
        assert!(approx(ch.max, 4.0));
        assert!(approx(ch.delta, 4.0));
        assert!(approx(ch.max_time, 3.0));
        assert_eq!(ch.t50_time, None);
        assert_eq!(ch.t50_duration, None);
    }

    #[test]
    fn test_plateau_peak_uses_first_occurrence() {
        let values = [Some(1.0), Some(5.0), Some(5.0), Some(2.0)];
        assert_eq!(first_peak(&values), Some((1, 5.0)));

        let time = [Some(0.0), Some(0.5), Some(1.0), Some(1.5)];
        let ch = channel_metrics(Some(1.0), &time, &values);
        assert!(approx(ch.max_time, 0.5));
        assert!(approx(ch.t50_time, 1.5));
        assert!(approx(ch.t50_duration, 1.0));
    }

    #[test]
    fn test_all_missing_channel() {
        let time = [Some(0.0), Some(1.0)];
        let ch = channel_metrics(Some(3.0), &time, &[None, None]);
        assert!(approx(ch.baseline, 3.0));
        assert_eq!(ch.max, None);
        assert_eq!(ch.delta, None);
        assert_eq!(ch.half_delta, None);
        assert_eq!(ch.t50_value, None);
        assert_eq!(ch.max_time, None);
        assert_eq!(ch.t50_time, None);
        assert_eq!(ch.t50_duration, None);
    }

    #[test]
    fn test_missing_baseline_propagates() {
        let time = [Some(0.0), Some(1.0), Some(2.0)];
        let values = [Some(1.0), Some(9.0), Some(0.0)];
        let ch = channel_metrics(None, &time, &values);
        assert!(approx(ch.max, 9.0));
        assert!(approx(ch.max_time, 1.0));
        assert_eq!(ch.delta, None);
        assert_eq!(ch.t50_value, None);
        assert_eq!(ch.t50_time, None);
        assert_eq!(ch.t50_duration, None);
    }

    #[test]
    fn test_missing_cells_skipped_in_search() {
        let time = [Some(0.0), Some(1.0), Some(2.0), Some(3.0)];
        let values = [Some(10.0), None, Some(8.0), Some(2.0)];
        let ch = channel_metrics(Some(0.0), &time, &values);
        assert!(approx(ch.t50_value, 5.0));
        assert!(approx(ch.t50_time, 3.0));
    }

    #[test]
    fn test_peak_below_baseline_crosses_at_peak() {
        let time = [Some(0.0), Some(1.0)];
        let values = [Some(2.0), Some(1.0)];
        let ch = channel_metrics(Some(5.0), &time, &values);
        assert!(approx(ch.delta, -3.0));
        assert!(approx(ch.t50_time, 0.0));
        assert!(approx(ch.t50_duration, 0.0));
    }

    #[test]
    fn test_crossing_is_first_row_at_or_below_threshold() {
        let values = [Some(0.0), Some(10.0), Some(7.0), Some(6.0), Some(4.0), Some(3.0)];
        let time: Vec<Option<f64>> = (0..values.len()).map(|i| Some(i as f64)).collect();
        let ch = channel_metrics(Some(0.0), &time, &values);
        let threshold = ch.t50_value.unwrap();
        let idx = first_crossing(&values, 1, threshold).unwrap();
        assert_eq!(idx, 4);
        assert!(values[idx].unwrap() <= threshold);
        assert!(values[2..idx].iter().all(|v| v.unwrap() > threshold));
        assert!(approx(ch.t50_time, 4.0));
    }

    #[test]
    fn test_duration_rounded_to_seven_digits() {
        let time = [Some(0.1), Some(0.2), Some(0.30000000004)];
        let values = [Some(10.0), Some(9.0), Some(1.0)];
        let ch = channel_metrics(Some(0.0), &time, &values);
        let raw = 0.30000000004 - 0.1;
        assert_eq!(ch.t50_duration, Some(round_to(raw, DURATION_DECIMALS)));
        assert!(approx(ch.t50_duration, 0.2));
    }

    #[test]
    fn test_duration_rounding_matches_reference() {
        let cases = [
            (1.5e-7, 1e-7),
            (2.5e-7, 2e-7),
            (3.5e-7, 3e-7),
            (1.00000005, 1.0),
            (0.3000001, 0.3000001),
        ];
        let values = [Some(10.0), Some(0.0)];
        for (elapsed, expected) in cases {
            let time = [Some(0.0), Some(elapsed)];
            let ch = channel_metrics(Some(0.0), &time, &values);
            assert_eq!(ch.t50_duration, Some(expected), "elapsed {elapsed}");
        }
    }

    #[test]
    fn test_row_count_matches_data_channels() {
        let (b, d) = tables("B 1 2 3 4", "0 1 2 3 4\n1 5 6 7 8\n");
        let table = compute_metrics(&b, &d).unwrap();
        assert_eq!(table.len(), d.column_count() - 1);
    }
}
