//! Chronicle Domain Layer
//!
//! This crate contains the core data model for Chronicle, the timeline
//! explorer for narrative records extracted from a source document. It only
//! depends on `chrono` for calendar dates and defines the value objects and
//! trait interfaces the other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Record**: a flattened, dated entry of one [`Category`]
//! - **Category**: Event, Testimony or Violation
//! - **Provenance**: chunk id, page and headings tying a record to its source
//! - **FilterCriteria**: date range, categories and actors to select records
//!
//! ## Architecture
//!
//! - Pure data and logic only
//! - Loading, filtering and presentation live in other crates
//! - Trait definitions for the loader and the PDF viewer collaborator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod criteria;
pub mod provenance;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use category::Category;
pub use criteria::FilterCriteria;
pub use provenance::Provenance;
pub use record::{Record, ACTOR_SEPARATOR};
pub use traits::{PageRequest, PageViewer, RecordLoader};

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (1950i32..2030, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    proptest! {
        /// Property: spanning criteria always contain every record date
        #[test]
        fn test_spanning_contains_all_dates(dates in prop::collection::vec(arb_date(), 1..20)) {
            let records: Vec<Record> = dates
                .iter()
                .map(|d| Record::event(*d, "e".into(), None, String::new(), Provenance::default()))
                .collect();
            let criteria = FilterCriteria::spanning(&records);
            for record in &records {
                prop_assert!(criteria.date_from <= record.date && record.date <= criteria.date_to);
            }
        }

        /// Property: a record always mentions each of its own actor names
        #[test]
        fn test_record_mentions_own_actors(names in prop::collection::vec("[A-Za-z]{1,8}", 1..5)) {
            let joined = names.join(ACTOR_SEPARATOR);
            let record = Record::event(
                NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                "e".into(),
                None,
                joined,
                Provenance::default(),
            );
            for name in record.actor_names() {
                prop_assert!(record.mentions_any_actor([name]));
            }
        }
    }
}
