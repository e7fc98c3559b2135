use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{CellValue, ClusterModel, Dataset, Record, MISSING_LABEL};

/// Sentinel cluster id standing in for anything missing or un-coercible.
const SENTINEL: i64 = -1;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Failures that abort an upload cycle. Anything softer (missing optional
/// columns, no rows) is a `ValidatedDataset::Incomplete` state instead.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Malformed or empty CSV. The message is shown to the user verbatim.
    #[error("failed to parse CSV: {0}")]
    ParseFailure(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse an uploaded CSV into a [`Dataset`].
///
/// Every cell is typed by inspection, then the recognized cluster columns
/// (`cluster`, `dbscan_cluster`) are normalized to text labels: values
/// coerce to integers, anything missing or un-coercible becomes the
/// sentinel, and the sentinel renders as `"N/A"`. Columns the file does not
/// carry are never synthesized.
pub fn load(raw: &[u8]) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(raw);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::ParseFailure(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::ParseFailure(
            "no columns found in input".to_string(),
        ));
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| LoadError::ParseFailure(format!("row {row_no}: {e}")))?;

        let mut values = BTreeMap::new();
        for (idx, raw_value) in record.iter().enumerate() {
            let Some(column) = headers.get(idx) else {
                continue;
            };
            values.insert(column.clone(), parse_cell(raw_value));
        }
        rows.push(Record { values });
    }

    for model in ClusterModel::ALL {
        let column = model.column();
        if headers.iter().any(|h| h == column) {
            normalize_labels(&mut rows, column);
        }
    }

    Ok(Dataset::from_rows(headers, rows))
}

// ---------------------------------------------------------------------------
// Cell typing
// ---------------------------------------------------------------------------

fn parse_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Missing;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Label normalization
// ---------------------------------------------------------------------------

/// Rewrite a cluster column in place so it holds only text labels.
///
/// DBSCAN codes noise as `-1`, so noise rows land on the same `"N/A"` label
/// as truly missing values.
fn normalize_labels(rows: &mut [Record], column: &str) {
    for row in rows.iter_mut() {
        let id = match row.values.get(column) {
            Some(value) => coerce_label(value),
            None => SENTINEL,
        };
        let label = if id == SENTINEL {
            MISSING_LABEL.to_string()
        } else {
            id.to_string()
        };
        row.values.insert(column.to_string(), CellValue::Text(label));
    }
}

/// Coerce one raw cell to a cluster id. Floats truncate; everything the
/// coercion cannot handle collapses to the sentinel.
fn coerce_label(value: &CellValue) -> i64 {
    match value {
        CellValue::Integer(i) => *i,
        CellValue::Float(f) if f.is_finite() => f.trunc() as i64,
        _ => SENTINEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ValidatedDataset;

    fn labels(dataset: &Dataset, column: &str) -> Vec<String> {
        dataset
            .rows
            .iter()
            .map(|row| row.label(column).unwrap_or("<none>").to_string())
            .collect()
    }

    #[test]
    fn normalizes_kmeans_labels_to_text() {
        let csv = "latitude,longitude,cluster\n\
                   -6.2,106.8,0\n\
                   -6.9,107.6,1\n\
                   -7.8,110.4,1\n\
                   -8.6,116.1,\n\
                   0.8,122.5,2\n";
        let dataset = load(csv.as_bytes()).unwrap();
        assert_eq!(labels(&dataset, "cluster"), ["0", "1", "1", "N/A", "2"]);
    }

    #[test]
    fn dbscan_noise_collapses_to_missing_label() {
        let csv = "latitude,longitude,dbscan_cluster\n1.0,2.0,-1\n1.1,2.1,0\n";
        let dataset = load(csv.as_bytes()).unwrap();
        assert_eq!(labels(&dataset, "dbscan_cluster"), ["N/A", "0"]);
    }

    #[test]
    fn uncoercible_labels_become_missing() {
        let csv = "latitude,longitude,cluster\n1.0,2.0,abc\n1.1,2.1,3.0\n1.2,2.2,3.9\n";
        let dataset = load(csv.as_bytes()).unwrap();
        // Text fails coercion; float-coded labels truncate.
        assert_eq!(labels(&dataset, "cluster"), ["N/A", "3", "3"]);
    }

    #[test]
    fn absent_cluster_column_is_not_synthesized() {
        let csv = "latitude,longitude,magnitude\n1.0,2.0,5.5\n";
        let dataset = load(csv.as_bytes()).unwrap();
        assert!(!dataset.has_column("cluster"));
        assert!(dataset.unique_labels.is_empty());
        assert_eq!(dataset.rows[0].get("cluster"), None);
    }

    #[test]
    fn other_columns_pass_through_untouched() {
        let csv = "latitude,longitude,place,magnitude\n-6.2,106.8,Java,5.5\n";
        let dataset = load(csv.as_bytes()).unwrap();
        let row = &dataset.rows[0];
        assert_eq!(row.label("place"), Some("Java"));
        assert_eq!(row.number("magnitude"), Some(5.5));
        assert_eq!(
            dataset.columns,
            ["latitude", "longitude", "place", "magnitude"]
        );
    }

    #[test]
    fn row_order_is_preserved() {
        let csv = "latitude,longitude\n3.0,96.0\n1.0,97.0\n2.0,98.0\n";
        let dataset = load(csv.as_bytes()).unwrap();
        let lats: Vec<f64> = dataset
            .rows
            .iter()
            .map(|row| row.number("latitude").unwrap())
            .collect();
        assert_eq!(lats, [3.0, 1.0, 2.0]);
    }

    #[test]
    fn empty_input_is_a_parse_failure() {
        let err = load(b"").unwrap_err();
        assert!(matches!(err, LoadError::ParseFailure(_)));
    }

    #[test]
    fn ragged_rows_are_a_parse_failure() {
        let csv = "latitude,longitude\n1.0,2.0\n3.0\n";
        let err = load(csv.as_bytes()).unwrap_err();
        let LoadError::ParseFailure(message) = err;
        assert!(message.contains("row 1"), "unexpected message: {message}");
    }

    #[test]
    fn missing_longitude_validates_incomplete() {
        let csv = "latitude,depth\n1.0,10.0\n";
        let dataset = load(csv.as_bytes()).unwrap();
        match dataset.validate() {
            ValidatedDataset::Incomplete { missing } => {
                assert_eq!(missing, vec!["longitude".to_string()]);
            }
            ValidatedDataset::Ready(_) => panic!("must not be renderable"),
        }
    }

    #[test]
    fn headers_only_validates_incomplete() {
        let csv = "latitude,longitude,cluster\n";
        let dataset = load(csv.as_bytes()).unwrap();
        assert!(matches!(
            dataset.validate(),
            ValidatedDataset::Incomplete { .. }
        ));
    }
}
