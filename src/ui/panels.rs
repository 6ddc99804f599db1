use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::channel_color;
use crate::data::error::FieldError;
use crate::data::field::FieldReport;
use crate::data::model::{format_cell, MetricsTable};
use crate::state::{AppState, ExportFormat, FieldSlot};

/// Something the user asked for on a field; applied after the field loop so
/// the loop can hold a mutable borrow of the text buffers.
enum FieldAction {
    Process(usize),
    Clear(usize),
    Plot(usize),
    Copy(usize, ExportFormat),
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Fields", |ui: &mut Ui| {
            if ui.button("Process all fields").clicked() {
                state.process_all();
                ui.close_menu();
            }
        });

        ui.separator();

        let processed = state
            .active()
            .fields
            .iter()
            .filter(|f| f.report().is_some())
            .count();
        ui.label(format!(
            "{}: {processed}/{} fields processed",
            state.active().name,
            state.active().fields.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.minmax_scaling, "Min-Max Scaling")
            .clicked()
        {
            state.minmax_scaling = !state.minmax_scaling;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::LIGHT_YELLOW));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – coverslip selector
// ---------------------------------------------------------------------------

/// Render the coverslip list and the legend of the plotted field.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Coverslips");
    ui.separator();

    for i in 0..state.coverslips.len() {
        let label = state.coverslips[i].name.clone();
        if ui
            .selectable_label(state.active_coverslip == i, label)
            .clicked()
        {
            state.select_coverslip(i);
        }
    }

    ui.add_space(8.0);
    ui.heading("Plot");
    ui.separator();

    let current = state
        .plotted_field
        .map(|f| format!("Field {}", f + 1))
        .unwrap_or_else(|| "None".to_string());
    let plottable: Vec<usize> = state
        .active()
        .fields
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.report().is_some())
        .map(|(i, _)| i)
        .collect();

    egui::ComboBox::from_id_salt("plotted_field")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for i in plottable {
                if ui
                    .selectable_label(state.plotted_field == Some(i), format!("Field {}", i + 1))
                    .clicked()
                {
                    state.plotted_field = Some(i);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel – field editors and results
// ---------------------------------------------------------------------------

/// Render the editors and results of every field on the active coverslip.
pub fn fields_panel(ui: &mut Ui, state: &mut AppState) {
    let mut actions = Vec::new();
    let active = state.active_coverslip;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, slot) in state.coverslips[active].fields.iter_mut().enumerate() {
                ui.push_id(("field", active, i), |ui: &mut Ui| {
                    field_editor(ui, i, slot, &mut actions);
                });
                ui.separator();
            }
        });

    for action in actions {
        match action {
            FieldAction::Process(i) => state.process_field(i),
            FieldAction::Clear(i) => state.clear_field(i),
            FieldAction::Plot(i) => state.plotted_field = Some(i),
            FieldAction::Copy(i, format) => match state.export_field(i, format) {
                Some(Ok(text)) => {
                    ui.ctx().copy_text(text);
                    state.status_message = Some(format!("Field {} copied as {format:?}", i + 1));
                }
                Some(Err(e)) => {
                    log::error!("Failed to export field {}: {e:#}", i + 1);
                    state.status_message = Some(format!("Error: {e:#}"));
                }
                None => {}
            },
        }
    }
}

fn field_editor(ui: &mut Ui, index: usize, slot: &mut FieldSlot, actions: &mut Vec<FieldAction>) {
    ui.heading(format!("Field {}", index + 1));

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].label("Baseline (label & values)");
        cols[0].add(
            egui::TextEdit::multiline(&mut slot.baseline_text)
                .code_editor()
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .hint_text("F0 102.5 98.1 110.3"),
        );
        cols[1].label("Data (times & values)");
        cols[1].add(
            egui::TextEdit::multiline(&mut slot.data_text)
                .code_editor()
                .desired_rows(6)
                .desired_width(f32::INFINITY)
                .hint_text("0.0 101.2 97.9 109.8\n0.5 180.4 150.2 160.0"),
        );
    });

    ui.horizontal(|ui: &mut Ui| {
        if ui.button(format!("Process Field {}", index + 1)).clicked() {
            actions.push(FieldAction::Process(index));
        }
        if ui.button("Clear").clicked() {
            actions.push(FieldAction::Clear(index));
        }
        if slot.report().is_some() {
            if ui.button("Plot").clicked() {
                actions.push(FieldAction::Plot(index));
            }
            if ui.button("Copy TSV").clicked() {
                actions.push(FieldAction::Copy(index, ExportFormat::Tsv));
            }
            if ui.button("Copy JSON").clicked() {
                actions.push(FieldAction::Copy(index, ExportFormat::Json));
            }
        }
    });

    match &slot.outcome {
        None => {}
        Some(Ok(report)) => report_view(ui, report),
        Some(Err(e)) => error_view(ui, e),
    }
}

fn report_view(ui: &mut Ui, report: &FieldReport) {
    if report.metrics.is_empty() {
        ui.label(RichText::new("No numeric channel columns in the data.").color(Color32::YELLOW));
        return;
    }
    metrics_table(ui, &report.metrics);
}

fn error_view(ui: &mut Ui, error: &FieldError) {
    if error.is_empty_input() {
        ui.label(
            RichText::new(format!("Invalid or missing input for this field: {error}"))
                .color(Color32::YELLOW),
        );
    } else {
        ui.label(RichText::new(format!("Error: {error}")).color(Color32::RED));
    }
}

/// Result table: one row per channel, channel number tinted with the trace
/// colour.
fn metrics_table(ui: &mut Ui, metrics: &MetricsTable) {
    let count = metrics.len();

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(60.0))
        .columns(Column::auto().at_least(80.0), MetricsTable::COLUMNS.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Channel");
            });
            for name in MetricsTable::COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for (i, channel) in metrics.channels.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(
                            RichText::new(format!("{}", i + 1))
                                .strong()
                                .color(channel_color(i, count)),
                        );
                    });
                    for cell in channel.cells() {
                        row.col(|ui| {
                            ui.label(format_cell(cell));
                        });
                    }
                });
            }
        });
}
