//! Filter criteria value object

use crate::{Category, Record};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Criteria for selecting records
///
/// A plain value: created fresh per interaction and compared by its fields.
/// An empty `selected_actors` set means no actor filter is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive lower date bound
    pub date_from: NaiveDate,

    /// Inclusive upper date bound
    pub date_to: NaiveDate,

    /// Categories to keep
    pub selected_categories: BTreeSet<Category>,

    /// Actor names to match (substring, any-of)
    pub selected_actors: BTreeSet<String>,
}

impl FilterCriteria {
    /// Create criteria for a date range with every category and no actor filter
    pub fn new(date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            date_from,
            date_to,
            selected_categories: Category::ALL.into_iter().collect(),
            selected_actors: BTreeSet::new(),
        }
    }

    /// Criteria that select everything in `records`
    ///
    /// Spans the earliest to latest record date, selects every category present
    /// and applies no actor filter. With no records the range collapses to
    /// the minimum and maximum representable dates.
    pub fn spanning(records: &[Record]) -> Self {
        let date_from = records.iter().map(|r| r.date).min().unwrap_or(NaiveDate::MIN);
        let date_to = records.iter().map(|r| r.date).max().unwrap_or(NaiveDate::MAX);
        let mut criteria = Self::new(date_from, date_to);
        if !records.is_empty() {
            criteria.selected_categories = records.iter().map(|r| r.category).collect();
        }
        criteria
    }

    /// Replace the selected categories
    pub fn with_categories<I: IntoIterator<Item = Category>>(mut self, categories: I) -> Self {
        self.selected_categories = categories.into_iter().collect();
        self
    }

    /// Replace the selected actors
    pub fn with_actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_actors = actors.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the actor filter is active
    pub fn has_actor_filter(&self) -> bool {
        !self.selected_actors.is_empty()
    }

    /// Whether the date range is empty (`date_from > date_to`)
    pub fn is_inverted(&self) -> bool {
        self.date_from > self.date_to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Provenance;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_spanning_covers_records() {
        let records = vec![
            Record::event(date("1992-01-01"), "b".into(), None, String::new(), Provenance::default()),
            Record::violation(date("1990-05-01"), "a".into(), None, None, Provenance::default()),
        ];
        let criteria = FilterCriteria::spanning(&records);
        assert_eq!(criteria.date_from, date("1990-05-01"));
        assert_eq!(criteria.date_to, date("1992-01-01"));
        assert_eq!(
            criteria.selected_categories,
            [Category::Event, Category::Violation].into_iter().collect()
        );
        assert!(!criteria.has_actor_filter());
    }

    #[test]
    fn test_spanning_empty() {
        let criteria = FilterCriteria::spanning(&[]);
        assert!(!criteria.is_inverted());
        assert_eq!(criteria.selected_categories.len(), 3);
    }

    #[test]
    fn test_inverted_range() {
        let criteria = FilterCriteria::new(date("2000-01-02"), date("2000-01-01"));
        assert!(criteria.is_inverted());
    }
}
