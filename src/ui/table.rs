use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Raw data table
// ---------------------------------------------------------------------------

/// The filtered rows as a scrollable table, columns in upload order.
pub fn raw_table(ui: &mut Ui, dataset: &Dataset, indices: &[usize]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(320.0)
        .columns(Column::auto().at_least(60.0), dataset.columns.len())
        .header(20.0, |mut header| {
            for column in &dataset.columns {
                header.col(|ui| {
                    ui.strong(column);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let Some(&idx) = indices.get(row.index()) else {
                    return;
                };
                let record = &dataset.rows[idx];
                for column in &dataset.columns {
                    row.col(|ui| {
                        if let Some(value) = record.get(column) {
                            ui.label(value.to_string());
                        }
                    });
                }
            });
        });
}
