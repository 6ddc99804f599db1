use super::error::ParseError;
use super::model::NumericTable;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse a block of pasted, whitespace-delimited numbers.
///
/// * Blank lines are skipped; they never become rows.
/// * Each token is coerced on its own; anything that is not a number becomes
///   a missing cell instead of failing the row.
/// * Columns without a single number in any row are dropped. A row that is
///   shorter than the widest row counts as missing in the cells it lacks.
/// * If a short row still lacks a cell in a column that survived pruning,
///   the paste is ragged and [`ParseError::Ragged`] is returned.
///
/// Text with no numeric content yields an empty table, not an error.
pub fn parse_table(text: &str) -> Result<NumericTable, ParseError> {
    let lines: Vec<(usize, Vec<Option<f64>>)> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line.split_whitespace().map(coerce_token).collect()))
        .collect();

    let width = lines.iter().map(|(_, row)| row.len()).max().unwrap_or(0);

    let source_columns: Vec<usize> = (0..width)
        .filter(|&col| {
            lines
                .iter()
                .any(|(_, row)| row.get(col).copied().flatten().is_some())
        })
        .collect();

    if let Some(&last) = source_columns.last() {
        if let Some((line, row)) = lines.iter().find(|(_, row)| row.len() <= last) {
            return Err(ParseError::Ragged {
                line: *line,
                expected: last + 1,
                found: row.len(),
            });
        }
    }

    let rows: Vec<Vec<Option<f64>>> = lines
        .into_iter()
        .map(|(_, row)| source_columns.iter().map(|&col| row[col]).collect())
        .collect();

    log::debug!(
        "Parsed {} rows; kept columns {:?} of {width}",
        rows.len(),
        source_columns
    );

    Ok(NumericTable {
        source_columns,
        rows,
    })
}

/// Numeric coercion of a single token. `nan` is treated like any other
/// non-number so that missing values have exactly one representation.
fn coerce_token(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| !v.is_nan())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
