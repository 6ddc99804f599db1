use eframe::egui::Ui;
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, Points};

use crate::color::generate_palette;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Trace plot (bottom panel)
// ---------------------------------------------------------------------------

/// Render the channel traces of the plotted field, with the peak and the
/// half-decay crossing of each channel marked.
pub fn trace_plot(ui: &mut Ui, state: &AppState) {
    let report = match state
        .plotted_field
        .and_then(|f| state.active().fields.get(f))
        .and_then(|slot| slot.report())
    {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Process a field to view its traces");
            });
            return;
        }
    };

    let data = &report.data;
    let time = data.column(0);
    let channels = data.channel_columns();
    let palette = generate_palette(channels.len());

    Plot::new("trace_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Time")
        .y_axis_label(if state.minmax_scaling { "Scaled" } else { "Intensity" })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (ch, &col) in channels.iter().enumerate() {
                let color = palette[ch];
                let name = format!("Channel {}", ch + 1);

                let samples: Vec<[f64; 2]> = time
                    .iter()
                    .zip(data.column(col))
                    .filter_map(|(t, v)| Some([(*t)?, v?]))
                    .collect();

                let (offset, range) = if state.minmax_scaling {
                    minmax_bounds(&samples)
                } else {
                    (0.0, 1.0)
                };
                let scale = |y: f64| (y - offset) / range;

                let points: PlotPoints = samples.iter().map(|&[t, y]| [t, scale(y)]).collect();
                plot_ui.line(Line::new(points).name(&name).color(color).width(1.5));

                let Some(metrics) = report.metrics.channels.get(ch) else {
                    continue;
                };
                let markers: Vec<[f64; 2]> = [
                    metrics.max_time.zip(metrics.max),
                    metrics.t50_time.zip(metrics.t50_value),
                ]
                .into_iter()
                .flatten()
                .map(|(t, y)| [t, scale(y)])
                .collect();

                plot_ui.points(
                    Points::new(markers)
                        .name(&name)
                        .color(color)
                        .shape(MarkerShape::Diamond)
                        .radius(4.0),
                );
            }
        });
}

/// Offset and range that map a trace onto 0..1. Flat traces map to 0.
fn minmax_bounds(samples: &[[f64; 2]]) -> (f64, f64) {
    let min = samples.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
    let max = samples.iter().map(|p| p[1]).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !range.is_finite() || range.abs() < f64::EPSILON {
        (if min.is_finite() { min } else { 0.0 }, 1.0)
    } else {
        (min, range)
    }
}
