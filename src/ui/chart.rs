use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::color::ClusterColors;
use crate::data::model::Dataset;
use crate::data::summary::FrequencyTable;

// ---------------------------------------------------------------------------
// Frequency bar chart
// ---------------------------------------------------------------------------

/// Bar chart of per-cluster row counts, one bar per label.
pub fn frequency_bars(
    ui: &mut Ui,
    id: &str,
    dataset: &Dataset,
    column: &str,
    table: &FrequencyTable,
    height: f32,
) {
    let colors = ClusterColors::for_column(dataset, column);

    let bars: Vec<Bar> = table
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Bar::new(i as f64, entry.count as f64)
                .name(&entry.label)
                .fill(colors.color_for(&entry.label))
                .width(0.6)
        })
        .collect();

    let labels: Vec<String> = table.entries.iter().map(|e| e.label.clone()).collect();

    Plot::new(id.to_string())
        .y_axis_label("Count")
        .height(height)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            // Label text on the integer ticks, nothing in between.
            let idx = mark.value.round();
            if idx < 0.0 || (mark.value - idx).abs() > 0.05 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
