/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (fails on missing columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   Dataset     │  Vec<Record>, distinct values per dimension
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → FilteredView
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
