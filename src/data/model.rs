use serde::Serialize;

// ---------------------------------------------------------------------------
// NumericTable – a pasted block of text after coercion and pruning
// ---------------------------------------------------------------------------

/// A rectangular table of optional numbers.
///
/// `None` marks a token that was not a number. Every row has exactly
/// `source_columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericTable {
    /// For each retained column, its position in the pasted text.
    /// Strictly increasing; columns that were entirely non-numeric are absent.
    pub source_columns: Vec<usize>,
    /// Rows in input order (first non-empty line = row 0).
    pub rows: Vec<Vec<Option<f64>>>,
}

impl NumericTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.source_columns.len()
    }

    /// No rows, or no column with a single number in it.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.source_columns.is_empty()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// All values of one retained column, top to bottom.
    pub fn column(&self, col: usize) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|r| r.get(col).copied().flatten())
            .collect()
    }

    /// Whether the first pasted column (label or time) survived pruning.
    pub fn has_leading_column(&self) -> bool {
        self.source_columns.first() == Some(&0)
    }

    /// Indices of the retained columns that hold channel values, i.e. all
    /// columns except the first pasted one.
    pub fn channel_columns(&self) -> Vec<usize> {
        self.source_columns
            .iter()
            .enumerate()
            .filter(|(_, &src)| src != 0)
            .map(|(i, _)| i)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ChannelMetrics – one row of the result table
// ---------------------------------------------------------------------------

/// Kinetics summary for one channel. `None` means the value is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ChannelMetrics {
    #[serde(rename = "Baseline")]
    pub baseline: Option<f64>,
    #[serde(rename = "Max")]
    pub max: Option<f64>,
    #[serde(rename = "Delta")]
    pub delta: Option<f64>,
    #[serde(rename = "1/2 Delta")]
    pub half_delta: Option<f64>,
    #[serde(rename = "T50 Value")]
    pub t50_value: Option<f64>,
    #[serde(rename = "Max Time")]
    pub max_time: Option<f64>,
    #[serde(rename = "T50 Time")]
    pub t50_time: Option<f64>,
    #[serde(rename = "T50")]
    pub t50_duration: Option<f64>,
}

impl ChannelMetrics {
    /// Cell values in [`MetricsTable::COLUMNS`] order.
    pub fn cells(&self) -> [Option<f64>; 8] {
        [
            self.baseline,
            self.max,
            self.delta,
            self.half_delta,
            self.t50_value,
            self.max_time,
            self.t50_time,
            self.t50_duration,
        ]
    }
}

// ---------------------------------------------------------------------------
// MetricsTable – the per-field result
// ---------------------------------------------------------------------------

/// One [`ChannelMetrics`] per data channel, in data-column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MetricsTable {
    pub channels: Vec<ChannelMetrics>,
}

impl MetricsTable {
    pub const COLUMNS: [&'static str; 8] = [
        "Baseline",
        "Max",
        "Delta",
        "1/2 Delta",
        "T50 Value",
        "Max Time",
        "T50 Time",
        "T50",
    ];

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Render an optional cell for display; missing values show as `NaN`.
pub fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => "NaN".to_string(),
    }
}
