//! HeliOps Common Library
//!
//! Shared domain types and fleet math for the HeliOps workspace.
//!
//! # Overview
//!
//! - **Models**: pilots, aircraft, clients, flights, certifications, library
//! - **Fleet math**: name lookups, monthly hours and rate-tier billing,
//!   dashboard statistics and chart series
//! - **Fixture**: an offline demonstration dataset
//! - **Logging**: `tracing` subscriber setup shared by all binaries
//!
//! # Example
//!
//! ```
//! use heliops_common::fixture;
//! use heliops_common::fleet::{pilot_monthly_hours, NoHolidays};
//!
//! let data = fixture::dataset();
//! let report = pilot_monthly_hours(&data, "p1", 2024, 3, &NoHolidays).unwrap();
//! assert_eq!(report.flights, 2);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod fixture;
pub mod fleet;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use error::{HeliopsError, Result};
pub use fleet::FleetData;
