//! Record selection

use chronicle_domain::{Category, FilterCriteria, Record};
use std::collections::BTreeMap;
use tracing::debug;

/// Whether a single record satisfies the criteria
///
/// A record is kept iff its date lies in the inclusive range, its category is
/// selected, and either no actor filter is set or its actor string contains
/// at least one selected name.
pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    if record.date < criteria.date_from || record.date > criteria.date_to {
        return false;
    }
    if !criteria.selected_categories.contains(&record.category) {
        return false;
    }
    if criteria.has_actor_filter() {
        return record.mentions_any_actor(criteria.selected_actors.iter().map(String::as_str));
    }
    true
}

/// Select the records matching `criteria`, sorted ascending by date
///
/// The sort is stable, so records sharing a date keep their input order.
pub fn apply_filters(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    if criteria.is_inverted() {
        debug!(
            "Date range {} > {} selects nothing",
            criteria.date_from, criteria.date_to
        );
        return Vec::new();
    }

    let mut selected: Vec<Record> = records
        .iter()
        .filter(|record| matches(record, criteria))
        .cloned()
        .collect();
    selected.sort_by_key(|record| record.date);

    debug!("Filter kept {} of {} records", selected.len(), records.len());
    selected
}

/// Counts describing one filter pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Records considered
    pub total: usize,

    /// Records kept
    pub matched: usize,

    /// Records kept, per category
    pub by_category: BTreeMap<Category, usize>,
}

impl FilterSummary {
    /// Summarise a filtered result against the full set size
    pub fn new(total: usize, filtered: &[Record]) -> Self {
        let mut by_category = BTreeMap::new();
        for record in filtered {
            *by_category.entry(record.category).or_insert(0) += 1;
        }
        Self {
            total,
            matched: filtered.len(),
            by_category,
        }
    }

    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }
}
