use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Column conventions
// ---------------------------------------------------------------------------

/// Coordinate columns every upload must carry before anything renders.
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const REQUIRED_COLUMNS: [&str; 2] = [LATITUDE, LONGITUDE];

/// Display label for missing or un-coercible cluster values.
pub const MISSING_LABEL: &str = "N/A";

/// The two clustering results an upload may carry, identified by column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ClusterModel {
    KMeans,
    Dbscan,
}

impl ClusterModel {
    pub const ALL: [ClusterModel; 2] = [ClusterModel::KMeans, ClusterModel::Dbscan];

    /// Column the model's labels arrive in.
    pub fn column(self) -> &'static str {
        match self {
            ClusterModel::KMeans => "cluster",
            ClusterModel::Dbscan => "dbscan_cluster",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ClusterModel::KMeans => "K-Means",
            ClusterModel::Dbscan => "DBSCAN",
        }
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the uploaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Uploads have no fixed schema beyond the
/// coordinate columns, so every cell carries its own type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Numeric view, used for the coordinate columns.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Text view, used for normalized cluster labels.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the uploaded table
// ---------------------------------------------------------------------------

/// One uploaded row: column name → cell value.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub values: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    /// Numeric value of a column, if present and numeric.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.values.get(column).and_then(CellValue::as_f64)
    }

    /// Text value of a column, if present and textual.
    pub fn label(&self, column: &str) -> Option<&str> {
        self.values.get(column).and_then(CellValue::as_text)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed upload with a pre-computed label index.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All rows, input order preserved.
    pub rows: Vec<Record>,
    /// Column names in header order.
    pub columns: Vec<String>,
    /// For each cluster column present, the sorted set of normalized labels.
    pub unique_labels: BTreeMap<String, BTreeSet<String>>,
}

impl Dataset {
    /// Build the label index from normalized rows.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Record>) -> Self {
        let mut unique_labels: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for model in ClusterModel::ALL {
            let column = model.column();
            if !columns.iter().any(|c| c == column) {
                continue;
            }
            let labels: BTreeSet<String> = rows
                .iter()
                .filter_map(|row| row.label(column))
                .map(str::to_string)
                .collect();
            unique_labels.insert(column.to_string(), labels);
        }

        Dataset {
            rows,
            columns,
            unique_labels,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Run the coordinate gate once per upload. An incomplete dataset is a
    /// normal "no data yet" state, not an error.
    pub fn validate(self) -> ValidatedDataset {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !self.has_column(col))
            .map(|col| col.to_string())
            .collect();

        if !missing.is_empty() || self.is_empty() {
            return ValidatedDataset::Incomplete { missing };
        }
        ValidatedDataset::Ready(self)
    }
}

// ---------------------------------------------------------------------------
// ValidatedDataset – the gate result every consumer matches on
// ---------------------------------------------------------------------------

/// Outcome of the per-upload validation gate.
#[derive(Debug, Clone)]
pub enum ValidatedDataset {
    /// A coordinate column is absent, or the file carried no data rows.
    /// `missing` lists absent coordinate columns (empty for the no-rows case).
    Incomplete { missing: Vec<String> },
    /// Renderable: both coordinate columns present and at least one row.
    Ready(Dataset),
}
