/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse sheet → SalesTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  TableCache   │  Arc<SalesTable>, version token
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → matching rows
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  rows → Report (KPIs, grouped totals)
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
