use std::path::Path;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{self, Selection};
use crate::data::model::ClusterModel;
use crate::state::{AppState, ViewMode};

// ---------------------------------------------------------------------------
// Left side panel – mode and filter controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Visualization");
    ui.separator();

    // Owned snapshot of the choice lists so state can be mutated below.
    let available: Vec<(ClusterModel, Vec<String>)> = match state.dataset() {
        Some(dataset) => ClusterModel::ALL
            .iter()
            .copied()
            .filter(|model| dataset.has_column(model.column()))
            .map(|model| (model, filter::distinct_labels(dataset, model.column())))
            .collect(),
        None => {
            ui.label("No renderable dataset. Open a CSV via File → Open…");
            return;
        }
    };

    let current_model = state.mode.active_model().unwrap_or(ClusterModel::KMeans);

    // ---- Mode radio ----
    ui.strong("Mode");
    let mut desired = state.mode;
    ui.radio_value(&mut desired, ViewMode::Single(current_model), "Single model");
    ui.radio_value(&mut desired, ViewMode::Compare, "Compare models");
    ui.radio_value(
        &mut desired,
        ViewMode::DrillDown(current_model),
        "Single cluster",
    );
    if desired != state.mode {
        state.set_mode(desired);
    }

    // ---- Model selector (hidden in compare mode) ----
    if state.mode.active_model().is_some() {
        ui.add_space(4.0);
        ui.strong("Model");
        egui::ComboBox::from_id_salt("model_select")
            .selected_text(current_model.display_name())
            .show_ui(ui, |ui: &mut Ui| {
                for (model, _) in &available {
                    if ui
                        .selectable_label(*model == current_model, model.display_name())
                        .clicked()
                    {
                        let next = match state.mode {
                            ViewMode::DrillDown(_) => ViewMode::DrillDown(*model),
                            _ => ViewMode::Single(*model),
                        };
                        state.set_mode(next);
                    }
                }
            });
    }

    // ---- Cluster filter ----
    match state.mode {
        ViewMode::Single(model) => match available.iter().find(|(m, _)| *m == model) {
            Some((_, labels)) => label_filter(ui, state, model, labels, true),
            None => {
                ui.label(format!("Column '{}' not found.", model.column()));
            }
        },
        ViewMode::DrillDown(model) => match available.iter().find(|(m, _)| *m == model) {
            Some((_, labels)) => label_filter(ui, state, model, labels, false),
            None => {
                ui.label(format!("Column '{}' not found.", model.column()));
            }
        },
        ViewMode::Compare => {
            ui.add_space(4.0);
            ui.label("Compare mode active, filtering disabled.");
        }
    }

    // ---- Row counts ----
    ui.separator();
    ui.label(format!("Rows after filter: {}", state.visible_rows()));
    ui.label(format!("Total rows: {}", state.total_rows()));
}

/// Exact-match selector over one cluster column. `allow_all` adds the
/// wildcard entry; drill-down leaves it out.
fn label_filter(
    ui: &mut Ui,
    state: &mut AppState,
    model: ClusterModel,
    labels: &[String],
    allow_all: bool,
) {
    ui.add_space(4.0);
    ui.strong(format!("Filter by '{}'", model.column()));

    let current = state.selection(model).clone();
    let selected_text = match &current {
        Selection::All => "All".to_string(),
        Selection::Label(label) => label.clone(),
    };

    egui::ComboBox::from_id_salt("label_filter")
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            if allow_all && ui.selectable_label(current.is_all(), "All").clicked() {
                state.set_selection(model, Selection::All);
            }
            for label in labels {
                let is_selected = matches!(&current, Selection::Label(l) if l == label);
                if ui.selectable_label(is_selected, label).clicked() {
                    state.set_selection(model, Selection::Label(label.clone()));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dataset) = state.dataset() {
            ui.label(format!(
                "{} quakes loaded, {} visible",
                dataset.len(),
                state.visible_rows()
            ));
        }

        if state.loading {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open earthquake data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match read_upload(&path) {
            Ok(bytes) => state.ingest(&bytes),
            Err(e) => {
                log::error!("failed to read upload: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn read_upload(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}
