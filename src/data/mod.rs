/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  ipudata.json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, trim text, parse closing ranks → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   Dataset     │  Vec<Record>, sorted category / quota choices
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Query → eligible indices → sort / refine → displayed rows
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
