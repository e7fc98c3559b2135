use eframe::egui::{ScrollArea, Ui};

use crate::data::model::{ClusterModel, Dataset, ValidatedDataset};
use crate::state::{AppState, ViewMode};
use crate::ui::{chart, plot, table};

const MAP_HEIGHT: f32 = 420.0;
const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Central panel composition
// ---------------------------------------------------------------------------

/// Render the central panel: an upload prompt until a renderable dataset is
/// in place, then the three dashboard sections.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.data {
        Some(ValidatedDataset::Ready(dataset)) => dataset,
        Some(ValidatedDataset::Incomplete { missing }) => {
            let message = if missing.is_empty() {
                "The uploaded file has no data rows. Open another CSV (File → Open…).".to_string()
            } else {
                format!(
                    "The uploaded file is missing required column(s): {}.",
                    missing.join(", ")
                )
            };
            prompt(ui, &message);
            return;
        }
        None => {
            prompt(ui, "Open an earthquake CSV to view clusters (File → Open…)");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Spatial distribution");
            match state.mode {
                ViewMode::Compare => {
                    ui.columns(2, |columns: &mut [Ui]| {
                        for (i, model) in ClusterModel::ALL.iter().enumerate() {
                            compare_scatter(&mut columns[i], state, dataset, *model);
                        }
                    });
                }
                ViewMode::Single(model) | ViewMode::DrillDown(model) => {
                    let color_column = dataset
                        .has_column(model.column())
                        .then(|| model.column());
                    plot::cluster_scatter(
                        ui,
                        "quake_map",
                        dataset,
                        &state.visible_indices,
                        color_column,
                        MAP_HEIGHT,
                    );
                }
            }

            ui.separator();
            ui.heading("Cluster frequency");
            match state.mode {
                ViewMode::Compare => {
                    ui.columns(2, |columns: &mut [Ui]| {
                        for (i, model) in ClusterModel::ALL.iter().enumerate() {
                            compare_bars(&mut columns[i], state, dataset, *model);
                        }
                    });
                }
                ViewMode::Single(model) | ViewMode::DrillDown(model) => {
                    if dataset.has_column(model.column()) {
                        let freq = state.frequency(model);
                        chart::frequency_bars(
                            ui,
                            "quake_freq",
                            dataset,
                            model.column(),
                            &freq,
                            CHART_HEIGHT,
                        );
                    }
                }
            }

            ui.separator();
            ui.heading("Raw data");
            table::raw_table(ui, dataset, &state.visible_indices);
        });
}

fn prompt(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(message);
    });
}

/// One half of the compare view's map row.
fn compare_scatter(ui: &mut Ui, state: &AppState, dataset: &Dataset, model: ClusterModel) {
    ui.strong(model.display_name());
    if dataset.has_column(model.column()) {
        plot::cluster_scatter(
            ui,
            &format!("map_{}", model.column()),
            dataset,
            &state.visible_indices,
            Some(model.column()),
            MAP_HEIGHT,
        );
    } else {
        ui.label(format!("Column '{}' not found.", model.column()));
    }
}

/// One half of the compare view's frequency row.
fn compare_bars(ui: &mut Ui, state: &AppState, dataset: &Dataset, model: ClusterModel) {
    if !dataset.has_column(model.column()) {
        return;
    }
    ui.strong(model.display_name());
    let freq = state.frequency(model);
    chart::frequency_bars(
        ui,
        &format!("freq_{}", model.column()),
        dataset,
        model.column(),
        &freq,
        CHART_HEIGHT,
    );
}
