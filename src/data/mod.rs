/// Data layer: core types, loading, reshaping and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json (wide: one column per year)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate columns → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  reshape  │  melt + numeric coercion → ObservationTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (category, year) → ObservationSubset
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod reshape;
