use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{Dataset, MISSING_LABEL};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.7, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: cluster label → Color32
// ---------------------------------------------------------------------------

/// Maps the normalized labels of one cluster column to distinct colours.
/// `"N/A"` stays gray so noise and unlabeled rows read as background.
#[derive(Debug, Clone)]
pub struct ClusterColors {
    mapping: BTreeMap<String, Color32>,
    missing: Color32,
}

impl ClusterColors {
    /// Build the mapping from a column's distinct-label index. An absent
    /// column yields an empty mapping, so every lookup falls back to gray.
    pub fn for_column(dataset: &Dataset, column: &str) -> Self {
        let labels: Vec<&String> = dataset
            .unique_labels
            .get(column)
            .map(|set| set.iter().filter(|l| l.as_str() != MISSING_LABEL).collect())
            .unwrap_or_default();

        let palette = generate_palette(labels.len());
        let mapping: BTreeMap<String, Color32> = labels
            .into_iter()
            .zip(palette)
            .map(|(label, color)| (label.clone(), color))
            .collect();

        ClusterColors {
            mapping,
            missing: Color32::GRAY,
        }
    }

    /// Look up the colour for a normalized label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(self.missing)
    }
}
