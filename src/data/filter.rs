use super::model::Dataset;

// ---------------------------------------------------------------------------
// Criteria: one exact-match constraint per cluster column
// ---------------------------------------------------------------------------

/// What the user picked for one cluster column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Wildcard: no restriction.
    All,
    /// Exact match on one normalized label.
    Label(String),
}

impl Selection {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// A single column constraint. Criteria across columns compose as AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriterion {
    pub column: String,
    pub selection: Selection,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Distinct normalized labels for a column, sorted ascending and
/// deduplicated. Always computed from the unfiltered dataset so one
/// dimension's choice list never shrinks when another dimension is narrowed.
pub fn distinct_labels(dataset: &Dataset, column: &str) -> Vec<String> {
    dataset
        .unique_labels
        .get(column)
        .map(|labels| labels.iter().cloned().collect())
        .unwrap_or_default()
}

/// Indices of rows satisfying every non-wildcard criterion, input order
/// preserved. Criteria naming columns the dataset does not carry are
/// ignored.
pub fn apply(dataset: &Dataset, criteria: &[FilterCriterion]) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            criteria.iter().all(|criterion| match &criterion.selection {
                Selection::All => true,
                Selection::Label(wanted) => {
                    if !dataset.has_column(&criterion.column) {
                        return true;
                    }
                    row.label(&criterion.column) == Some(wanted.as_str())
                }
            })
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load;

    fn criterion(column: &str, label: &str) -> FilterCriterion {
        FilterCriterion {
            column: column.to_string(),
            selection: Selection::Label(label.to_string()),
        }
    }

    fn sample() -> Dataset {
        let csv = "latitude,longitude,cluster,dbscan_cluster\n\
                   -6.2,106.8,0,0\n\
                   -6.9,107.6,1,-1\n\
                   -7.8,110.4,1,0\n\
                   -8.6,116.1,,1\n\
                   0.8,122.5,2,1\n";
        load(csv.as_bytes()).unwrap()
    }

    #[test]
    fn no_criteria_keeps_every_row_in_order() {
        let dataset = sample();
        assert_eq!(apply(&dataset, &[]), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn wildcard_is_no_restriction() {
        let dataset = sample();
        let criteria = [FilterCriterion {
            column: "cluster".to_string(),
            selection: Selection::All,
        }];
        assert_eq!(apply(&dataset, &criteria), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn concrete_label_keeps_matching_rows_only() {
        let dataset = sample();
        assert_eq!(apply(&dataset, &[criterion("cluster", "1")]), [1, 2]);
        assert_eq!(apply(&dataset, &[criterion("cluster", "N/A")]), [3]);
    }

    #[test]
    fn criteria_compose_conjunctively() {
        let dataset = sample();
        let criteria = [criterion("cluster", "1"), criterion("dbscan_cluster", "0")];
        assert_eq!(apply(&dataset, &criteria), [2]);
    }

    #[test]
    fn apply_is_idempotent() {
        let dataset = sample();
        let criteria = [criterion("dbscan_cluster", "1")];
        let once = apply(&dataset, &criteria);
        let twice = apply(&dataset, &criteria);
        assert_eq!(once, twice);
        assert_eq!(once, [3, 4]);
    }

    #[test]
    fn distinct_labels_are_sorted_and_deduplicated() {
        let dataset = sample();
        assert_eq!(distinct_labels(&dataset, "cluster"), ["0", "1", "2", "N/A"]);
        assert_eq!(
            distinct_labels(&dataset, "dbscan_cluster"),
            ["0", "1", "N/A"]
        );
    }

    #[test]
    fn distinct_labels_ignore_filters_on_other_columns() {
        let dataset = sample();
        let before = distinct_labels(&dataset, "dbscan_cluster");
        // Narrowing the K-Means dimension must not shrink the DBSCAN choices:
        // the choice list is a function of the unfiltered dataset alone.
        let _narrowed = apply(&dataset, &[criterion("cluster", "2")]);
        assert_eq!(distinct_labels(&dataset, "dbscan_cluster"), before);
    }

    #[test]
    fn absent_column_criterion_is_ignored() {
        let csv = "latitude,longitude,cluster\n1.0,2.0,0\n1.1,2.1,1\n";
        let dataset = load(csv.as_bytes()).unwrap();
        let criteria = [criterion("dbscan_cluster", "0")];
        assert_eq!(apply(&dataset, &criteria), [0, 1]);
        assert!(distinct_labels(&dataset, "dbscan_cluster").is_empty());
    }
}
