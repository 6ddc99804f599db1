use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Channel palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n).map(|i| hue_color(i, n)).collect()
}

/// Colour of channel `index` out of `count`, consistent between the trace
/// plot and the result table.
pub fn channel_color(index: usize, count: usize) -> Color32 {
    if count == 0 {
        return Color32::GRAY;
    }
    hue_color(index % count, count)
}

fn hue_color(i: usize, n: usize) -> Color32 {
    let hue = (i as f32 / n as f32) * 360.0;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
