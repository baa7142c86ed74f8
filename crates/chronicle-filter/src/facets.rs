//! Facets for populating selection controls

use chronicle_domain::{Category, Record};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Distinct values present in a record set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    /// Categories present
    pub categories: BTreeSet<Category>,

    /// Actor names present, split on commas and trimmed
    pub actors: BTreeSet<String>,

    /// Earliest and latest record date
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

/// Compute facets from the full record set
pub fn filter_facets(records: &[Record]) -> Facets {
    let mut facets = Facets::default();

    for record in records {
        facets.categories.insert(record.category);
        facets
            .actors
            .extend(record.actor_names().map(str::to_string));
        facets.date_range = Some(match facets.date_range {
            Some((min, max)) => (min.min(record.date), max.max(record.date)),
            None => (record.date, record.date),
        });
    }

    facets
}
