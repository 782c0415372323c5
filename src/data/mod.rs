/// Data layer: core types, loading, and the view computation.
///
/// Architecture:
/// ```text
///  wildfire .csv      sales .csv
///        │                │
///        ▼                ▼
///   ┌──────────────────────────┐
///   │          loader           │  parse + validate → tables
///   └──────────────────────────┘
///        │                │
///        ▼                ▼
///   ┌──────────┐    ┌───────────┐
///   │ FireTable │    │ SalesTable │  immutable after load
///   └──────────┘    └───────────┘
///        │                │
///        └───────┬────────┘
///                ▼
///          ┌──────────┐
///          │  views    │  filter + group + aggregate → ViewBundle
///          └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod views;
