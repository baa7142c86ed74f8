//! Source document shapes and extraction results

use chronicle_domain::{Category, Provenance, Record};

/// One addressable unit of the source document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceChunk {
    /// Opaque chunk identifier
    pub chunk_id: Option<String>,

    /// PDF page the chunk originates from
    pub page: Option<u32>,

    /// Part heading
    pub part_title: Option<String>,

    /// Chapter heading
    pub chapter_title: Option<String>,

    /// Section heading
    pub section_title: Option<String>,

    /// Nested entries, in declaration order within each kind
    pub entries: Vec<SourceEntry>,
}

impl SourceChunk {
    /// Provenance shared by every record flattened out of this chunk
    pub fn provenance(&self) -> Provenance {
        Provenance {
            chunk_id: self.chunk_id.clone(),
            page: self.page,
            part_title: self.part_title.clone(),
            chapter_title: self.chapter_title.clone(),
            section_title: self.section_title.clone(),
        }
    }
}

/// A nested entry of one of the three known shapes
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEntry {
    /// Narrative event
    Event(EventSource),
    /// Witness testimony
    Testimony(TestimonySource),
    /// Reported violation
    Violation(ViolationSource),
}

impl SourceEntry {
    /// Category the entry flattens into
    pub fn category(&self) -> Category {
        match self {
            SourceEntry::Event(_) => Category::Event,
            SourceEntry::Testimony(_) => Category::Testimony,
            SourceEntry::Violation(_) => Category::Violation,
        }
    }

    /// Raw, unparsed date value
    pub fn raw_date(&self) -> Option<&str> {
        match self {
            SourceEntry::Event(e) => e.date.as_deref(),
            SourceEntry::Testimony(t) => t.date.as_deref(),
            SourceEntry::Violation(v) => v.date.as_deref(),
        }
    }
}

/// Event as it appears in the source document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSource {
    /// Raw date text
    pub date: Option<String>,
    /// Short title
    pub label: Option<String>,
    /// Body text
    pub description: Option<String>,
    /// Participant names
    pub actors: Vec<String>,
}

/// Testimony as it appears in the source document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestimonySource {
    /// Raw date text
    pub date: Option<String>,
    /// Witness name
    pub witness: Option<String>,
    /// Quoted excerpt
    pub excerpt: Option<String>,
    /// Where the testimony was given or refers to
    pub location: Option<String>,
}

/// Violation as it appears in the source document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViolationSource {
    /// Raw date text
    pub date: Option<String>,
    /// Short title
    pub label: Option<String>,
    /// Body text
    pub description: Option<String>,
    /// Responsible actors (checked first)
    pub actors: Option<ActorField>,
    /// Responsible party (used when `actors` is absent or empty)
    pub party: Option<ActorField>,
}

/// An actor value that the source stores either as a list or as plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorField {
    /// List of names
    List(Vec<String>),
    /// Single free-text value
    Text(String),
}

impl ActorField {
    /// Whether the value carries anything
    pub fn is_empty(&self) -> bool {
        match self {
            ActorField::List(names) => names.is_empty(),
            ActorField::Text(text) => text.is_empty(),
        }
    }

    /// Flatten to the display string
    pub fn to_display(&self) -> String {
        match self {
            ActorField::List(names) => names.join(chronicle_domain::ACTOR_SEPARATOR),
            ActorField::Text(text) => text.clone(),
        }
    }
}

/// Result of flattening a document
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// Records in chunk order, then declaration order
    pub records: Vec<Record>,

    /// Entries dropped because their date did not parse
    pub skipped: Vec<SkippedEntry>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// An entry dropped for an unparseable date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Category of the dropped entry
    pub category: Category,

    /// Chunk it came from
    pub chunk_id: Option<String>,

    /// The date text that failed to parse
    pub raw_date: String,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionMetadata {
    /// Number of chunks processed
    pub chunks: usize,

    /// Entries that carried a date and were considered
    pub entries_dated: usize,

    /// Entries ignored because they had no date at all
    pub entries_undated: usize,
}
