//! egui widgets: panels around the field editors and the trace plot.

pub mod panels;
pub mod plot;
