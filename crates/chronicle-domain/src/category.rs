//! Category module - the fixed kinds of extracted record

use std::fmt;

/// Category of a flattened record
///
/// Every record belongs to exactly one category:
/// - Event: something that happened, with participating actors
/// - Testimony: a witness statement, optionally tied to a location
/// - Violation: a reported violation, attributed to actors or a party
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Narrative event
    Event,

    /// Witness testimony
    Testimony,

    /// Reported violation
    Violation,
}

impl Category {
    /// All categories, in declaration order
    pub const ALL: [Category; 3] = [Category::Event, Category::Testimony, Category::Violation];

    /// Display order used for timeline rows
    pub const TIMELINE_ORDER: [Category; 3] =
        [Category::Event, Category::Violation, Category::Testimony];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Event => "Event",
            Category::Testimony => "Testimony",
            Category::Violation => "Violation",
        }
    }

    /// Parse a category from a string (case-insensitive, plural forms accepted)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "event" | "events" => Some(Category::Event),
            "testimony" | "testimonies" => Some(Category::Testimony),
            "violation" | "violations" => Some(Category::Violation),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}
