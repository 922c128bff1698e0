//! Data layer: core types, loading, filtering, and aggregation.
//!
//! Architecture:
//! ```text
//!  covid_london.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse rows → CovidDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ CovidDataset  │  Vec<Record>, column titles
//!   └──────────────┘
//!        │
//!        ├─▶ filter   date range / borough / stable sort
//!        │
//!        └─▶ stats    average / total over a filtered slice
//! ```
//!
//! The dataset is loaded once and read-only afterwards; every operation
//! below it is a pure function of the records plus caller parameters, so
//! any front end (CLI, GUI) can drive it synchronously.

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
