use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::ClusterColors;
use crate::data::model::{Dataset, LATITUDE, LONGITUDE};

// ---------------------------------------------------------------------------
// Cluster scatter (the map view)
// ---------------------------------------------------------------------------

/// Scatter of quake positions, one series per cluster label.
///
/// `color_column` is the cluster column driving color and legend; `None`
/// renders a single neutral series (used when the active model's column is
/// absent from the upload).
pub fn cluster_scatter(
    ui: &mut Ui,
    id: &str,
    dataset: &Dataset,
    indices: &[usize],
    color_column: Option<&str>,
    height: f32,
) {
    // Group visible rows by label so each label becomes one legend entry.
    let mut series: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    for &idx in indices {
        let Some(row) = dataset.rows.get(idx) else {
            continue;
        };
        // Rows with non-numeric coordinates cannot be placed; skip them.
        let (Some(lon), Some(lat)) = (row.number(LONGITUDE), row.number(LATITUDE)) else {
            continue;
        };
        let label = color_column
            .and_then(|column| row.label(column))
            .unwrap_or("events")
            .to_string();
        series.entry(label).or_default().push([lon, lat]);
    }

    let colors = color_column.map(|column| ClusterColors::for_column(dataset, column));

    Plot::new(id.to_string())
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .height(height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (label, positions) in &series {
                let color = colors
                    .as_ref()
                    .map(|c| c.color_for(label))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let points: PlotPoints = positions.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(label)
                        .color(color)
                        .radius(2.5),
                );
            }
        });
}
