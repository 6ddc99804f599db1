use anyhow::{Context, Result};

use super::model::{format_cell, MetricsTable};

/// Render a metrics table as tab-separated text, ready to paste into a
/// spreadsheet. The first column is the 1-based channel number.
pub fn to_tsv(table: &MetricsTable) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(Vec::new());

    let mut header = vec!["Channel"];
    header.extend(MetricsTable::COLUMNS);
    writer.write_record(&header).context("writing TSV header")?;

    for (i, channel) in table.channels.iter().enumerate() {
        let mut record = vec![(i + 1).to_string()];
        record.extend(channel.cells().into_iter().map(format_cell));
        writer
            .write_record(&record)
            .with_context(|| format!("writing TSV row for channel {}", i + 1))?;
    }

    let bytes = writer.into_inner().context("flushing TSV writer")?;
    String::from_utf8(bytes).context("TSV output is not UTF-8")
}

/// Render a metrics table as pretty-printed JSON. Missing values are `null`.
pub fn to_json(table: &MetricsTable) -> Result<String> {
    serde_json::to_string_pretty(table).context("serializing metrics to JSON")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
