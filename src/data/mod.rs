/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///   uploaded .csv bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + normalize cluster labels → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ Dataset::validate │  Incomplete | Ready
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  filter   │ ───▶ │ summary  │  criteria → row indices → label counts
///   └──────────┘      └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
