//! Chronicle Filter Engine
//!
//! Selects records by date range, category and actor, and derives the facet
//! values used to populate selection controls. Everything here is a pure
//! function of its inputs.
//!
//! # Examples
//!
//! ```
//! use chronicle_domain::{FilterCriteria, Provenance, Record};
//! use chronicle_filter::{apply_filters, filter_facets};
//! use chrono::NaiveDate;
//!
//! let records = vec![Record::event(
//!     NaiveDate::from_ymd_opt(1990, 3, 1).unwrap(),
//!     "Clash".to_string(),
//!     None,
//!     "Militia".to_string(),
//!     Provenance::new("c1", 5),
//! )];
//!
//! let facets = filter_facets(&records);
//! assert!(facets.actors.contains("Militia"));
//!
//! let criteria = FilterCriteria::spanning(&records).with_actors(["Militia"]);
//! assert_eq!(apply_filters(&records, &criteria).len(), 1);
//! ```

#![warn(missing_docs)]

mod engine;
mod facets;

pub use engine::{apply_filters, matches, FilterSummary};
pub use facets::{filter_facets, Facets};
