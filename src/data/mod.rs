/// Data layer: pasted-text parsing and per-channel kinetics.
///
/// Architecture:
/// ```text
///  baseline text        data text
///        │                  │
///        ▼                  ▼
///   ┌──────────┐      ┌──────────┐
///   │  parser   │      │  parser   │  text → NumericTable
///   └──────────┘      └──────────┘
///        │                  │
///        └───────┬──────────┘
///                ▼
///        ┌──────────────┐
///        │   metrics     │  baseline row + time series → MetricsTable
///        └──────────────┘
///                │
///                ▼
///        ┌──────────────┐
///        │   export      │  MetricsTable → TSV / JSON
///        └──────────────┘
/// ```
///
/// `field::process_field` strings the steps together for one field.

pub mod error;
pub mod export;
pub mod field;
pub mod metrics;
pub mod model;
pub mod parser;
