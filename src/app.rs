use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct CalciumApp {
    pub state: AppState,
}

impl eframe::App for CalciumApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: coverslips ----
        egui::SidePanel::left("coverslip_panel")
            .default_width(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: traces of the plotted field ----
        egui::TopBottomPanel::bottom("plot_panel")
            .default_height(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                plot::trace_plot(ui, &self.state);
            });

        // ---- Central panel: field editors and results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::fields_panel(ui, &mut self.state);
        });
    }
}
