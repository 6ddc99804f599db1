use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Which of the two pasted tables an error refers to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Baseline,
    Data,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Baseline => write!(f, "baseline"),
            TableKind::Data => write!(f, "data"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Structural problems found while turning pasted text into a table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A row is missing a cell in a column that other rows fill with numbers.
    #[error("line {line}: expected at least {expected} values, found {found}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Failures of the kinetics computation on two parsed tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("{table} table has no numeric rows or columns")]
    EmptyTable { table: TableKind },

    /// The first pasted column of the data table held no numbers.
    #[error("data table has no numeric time column")]
    MissingTimeAxis,

    #[error("channel count mismatch: baseline has {expected}, data has {actual}")]
    Alignment { expected: usize, actual: usize },
}

/// Everything that can stop a single field from producing a metrics table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("no {0} values pasted")]
    EmptyInput(TableKind),

    #[error("failed to parse {table} text: {source}")]
    Parse {
        table: TableKind,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

impl FieldError {
    /// True when the field simply has nothing to process, as opposed to
    /// input that was pasted but is inconsistent.
    pub fn is_empty_input(&self) -> bool {
        matches!(
            self,
            FieldError::EmptyInput(_) | FieldError::Metrics(MetricsError::EmptyTable { .. })
        )
    }
}
