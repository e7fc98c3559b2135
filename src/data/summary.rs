use std::collections::BTreeMap;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// FrequencyTable – per-label row counts for one cluster column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Ordered (label, count) pairs: largest clusters first, ties alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    pub entries: Vec<LabelCount>,
}

impl FrequencyTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total rows counted across all labels.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn count_for(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map_or(0, |e| e.count)
    }
}

/// Count rows per distinct label among `indices`, restricted to `column`.
/// An absent column yields an empty table, never an error. Pure function of
/// its inputs.
pub fn counts(dataset: &Dataset, indices: &[usize], column: &str) -> FrequencyTable {
    if !dataset.has_column(column) {
        return FrequencyTable::default();
    }

    let mut tally: BTreeMap<String, usize> = BTreeMap::new();
    for &idx in indices {
        let Some(row) = dataset.rows.get(idx) else {
            continue;
        };
        let Some(label) = row.label(column) else {
            continue;
        };
        *tally.entry(label.to_string()).or_insert(0) += 1;
    }

    let mut entries: Vec<LabelCount> = tally
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect();
    // Stable sort keeps the BTreeMap's alphabetical order for equal counts.
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    FrequencyTable { entries }
}
