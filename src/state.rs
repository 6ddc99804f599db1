use anyhow::Result;

use crate::data::error::FieldError;
use crate::data::export;
use crate::data::field::{process_field, FieldReport};

/// Number of coverslip tabs.
pub const COVERSLIP_COUNT: usize = 4;
/// Number of imaging fields on each coverslip.
pub const FIELDS_PER_COVERSLIP: usize = 4;

// ---------------------------------------------------------------------------
// Per-field input and outcome
// ---------------------------------------------------------------------------

/// The two pasted text blocks of one field and the last processing result.
#[derive(Debug, Default)]
pub struct FieldSlot {
    pub baseline_text: String,
    pub data_text: String,
    /// `None` until the field is processed.
    pub outcome: Option<Result<FieldReport, FieldError>>,
}

impl FieldSlot {
    /// Recompute this field from its current text.
    pub fn process(&mut self) -> &Result<FieldReport, FieldError> {
        self.outcome
            .insert(process_field(&self.baseline_text, &self.data_text))
    }

    pub fn clear(&mut self) {
        *self = FieldSlot::default();
    }

    pub fn report(&self) -> Option<&FieldReport> {
        self.outcome.as_ref().and_then(|o| o.as_ref().ok())
    }
}

/// One tab of fields.
#[derive(Debug)]
pub struct Coverslip {
    pub name: String,
    pub fields: Vec<FieldSlot>,
}

impl Coverslip {
    fn new(number: usize) -> Self {
        Self {
            name: format!("Coverslip {number}"),
            fields: (0..FIELDS_PER_COVERSLIP)
                .map(|_| FieldSlot::default())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub coverslips: Vec<Coverslip>,

    /// Index of the coverslip tab being shown.
    pub active_coverslip: usize,

    /// Field of the active coverslip whose traces are plotted.
    pub plotted_field: Option<usize>,

    /// Scale each trace to 0..1 in the plot.
    pub minmax_scaling: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            coverslips: (1..=COVERSLIP_COUNT).map(Coverslip::new).collect(),
            active_coverslip: 0,
            plotted_field: None,
            minmax_scaling: false,
            status_message: None,
        }
    }
}

impl AppState {
    pub fn active(&self) -> &Coverslip {
        &self.coverslips[self.active_coverslip]
    }

    pub fn select_coverslip(&mut self, index: usize) {
        if index < self.coverslips.len() && index != self.active_coverslip {
            self.active_coverslip = index;
            self.plotted_field = None;
        }
    }

    /// Process one field of the active coverslip and report the outcome in
    /// the status line.
    pub fn process_field(&mut self, field: usize) {
        let coverslip = &mut self.coverslips[self.active_coverslip];
        let label = format!("{} / Field {}", coverslip.name, field + 1);
        let Some(slot) = coverslip.fields.get_mut(field) else {
            return;
        };

        self.status_message = match slot.process() {
            Ok(report) => {
                self.plotted_field = Some(field);
                Some(format!("{label}: {} channels processed", report.metrics.len()))
            }
            Err(e) if e.is_empty_input() => {
                log::info!("{label}: nothing to process ({e})");
                Some(format!("{label}: nothing to process"))
            }
            Err(e) => {
                log::warn!("{label}: {e}");
                Some(format!("{label}: {e}"))
            }
        };
    }

    /// Process every field of the active coverslip independently.
    pub fn process_all(&mut self) {
        let coverslip = &mut self.coverslips[self.active_coverslip];
        let mut processed = 0;
        let mut failed = 0;
        let mut empty = 0;

        for (i, slot) in coverslip.fields.iter_mut().enumerate() {
            if slot.baseline_text.trim().is_empty() && slot.data_text.trim().is_empty() {
                continue;
            }
            match slot.process() {
                Ok(_) => processed += 1,
                Err(e) if e.is_empty_input() => {
                    log::info!("{} / Field {}: nothing to process ({e})", coverslip.name, i + 1);
                    empty += 1;
                }
                Err(e) => {
                    log::warn!("{} / Field {}: {e}", coverslip.name, i + 1);
                    failed += 1;
                }
            }
        }

        if self.plotted_field.is_none() {
            self.plotted_field = coverslip.fields.iter().position(|f| f.report().is_some());
        }
        self.status_message = Some(format!(
            "{}: {processed} fields processed, {failed} failed, {empty} with nothing to process",
            coverslip.name
        ));
    }

    pub fn clear_field(&mut self, field: usize) {
        if let Some(slot) = self.coverslips[self.active_coverslip].fields.get_mut(field) {
            slot.clear();
        }
        if self.plotted_field == Some(field) {
            self.plotted_field = None;
        }
    }

    /// Export a processed field's metrics as TSV or JSON text.
    pub fn export_field(&self, field: usize, format: ExportFormat) -> Option<Result<String>> {
        let report = self.active().fields.get(field)?.report()?;
        Some(match format {
            ExportFormat::Tsv => export::to_tsv(&report.metrics),
            ExportFormat::Json => export::to_json(&report.metrics),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Tsv,
    Json,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
