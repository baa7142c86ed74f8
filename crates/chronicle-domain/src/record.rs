//! Record module - the flattened unit every other layer operates on

use crate::{Category, Provenance};
use chrono::NaiveDate;

/// Separator used when flattening actor lists into a display string
pub const ACTOR_SEPARATOR: &str = ", ";

/// A dated, categorised entry flattened out of a source chunk
///
/// Records are immutable once created. Only the extractor builds them; the
/// constructors below enforce the per-category field rules (no witness on an
/// event, no actors on a testimony, and so on).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Calendar date of the entry
    pub date: NaiveDate,

    /// Record category
    pub category: Category,

    /// Short display title
    pub label: String,

    /// Free-text body
    pub description: Option<String>,

    /// Comma-joined participant names (`None` for testimonies)
    pub actors: Option<String>,

    /// Location (testimonies only)
    pub location: Option<String>,

    /// Witness name (testimonies only)
    pub witness: Option<String>,

    /// Where in the source document this came from
    pub provenance: Provenance,
}

impl Record {
    /// Create an event record
    pub fn event(
        date: NaiveDate,
        label: String,
        description: Option<String>,
        actors: String,
        provenance: Provenance,
    ) -> Self {
        Self {
            date,
            category: Category::Event,
            label,
            description,
            actors: Some(actors),
            location: None,
            witness: None,
            provenance,
        }
    }

    /// Create a testimony record
    ///
    /// The label is synthesized from the witness name.
    pub fn testimony(
        date: NaiveDate,
        witness: Option<String>,
        excerpt: Option<String>,
        location: Option<String>,
        provenance: Provenance,
    ) -> Self {
        Self {
            date,
            category: Category::Testimony,
            label: testimony_label(witness.as_deref()),
            description: excerpt,
            actors: None,
            location,
            witness,
            provenance,
        }
    }

    /// Create a violation record
    pub fn violation(
        date: NaiveDate,
        label: String,
        description: Option<String>,
        actors: Option<String>,
        provenance: Provenance,
    ) -> Self {
        Self {
            date,
            category: Category::Violation,
            label,
            description,
            actors,
            location: None,
            witness: None,
            provenance,
        }
    }

    /// Individual actor names, split on commas and trimmed
    pub fn actor_names(&self) -> impl Iterator<Item = &str> {
        self.actors
            .as_deref()
            .into_iter()
            .flat_map(|actors| actors.split(','))
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Whether any of `names` occurs as a substring of the actor string
    ///
    /// Records without actors never match.
    pub fn mentions_any_actor<'a, I>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self.actors.as_deref() {
            Some(actors) => names.into_iter().any(|name| actors.contains(name)),
            None => false,
        }
    }

    /// PDF page of the owning chunk, if known
    pub fn page(&self) -> Option<u32> {
        self.provenance.page
    }
}

/// Build the display label for a testimony
pub fn testimony_label(witness: Option<&str>) -> String {
    format!("Testimony - {}", witness.unwrap_or("None"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_testimony_label_synthesized() {
        let record = Record::testimony(
            date("1991-07-12"),
            Some("J. Doe".to_string()),
            Some("...".to_string()),
            Some("Tbilisi".to_string()),
            Provenance::default(),
        );
        assert_eq!(record.label, "Testimony - J. Doe");
        assert_eq!(record.category, Category::Testimony);
        assert!(record.actors.is_none());
    }

    #[test]
    fn test_testimony_label_without_witness() {
        assert_eq!(testimony_label(None), "Testimony - None");
    }

    #[test]
    fn test_actor_names_split_and_trimmed() {
        let record = Record::event(
            date("1990-03-01"),
            "Clash".to_string(),
            None,
            "Militia,  Army , ,Militia".to_string(),
            Provenance::default(),
        );
        let names: Vec<&str> = record.actor_names().collect();
        assert_eq!(names, vec!["Militia", "Army", "Militia"]);
    }

    #[test]
    fn test_mentions_any_actor_is_substring_match() {
        let record = Record::event(
            date("1990-03-01"),
            "Clash".to_string(),
            None,
            "South Ossetian Militia, Army".to_string(),
            Provenance::default(),
        );
        assert!(record.mentions_any_actor(["Militia"]));
        assert!(record.mentions_any_actor(["Navy", "Army"]));
        assert!(!record.mentions_any_actor(["Navy"]));
    }

    #[test]
    fn test_no_actors_never_matches() {
        let record = Record::testimony(
            date("1991-07-12"),
            Some("Militia member".to_string()),
            None,
            None,
            Provenance::default(),
        );
        assert!(!record.mentions_any_actor(["Militia"]));
    }
}
