//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::dates::parse_date;
use crate::error::LoadError;
use crate::parser::parse_document;
use crate::types::{
    EventSource, ExtractionMetadata, ExtractionResult, SkippedEntry, SourceChunk, SourceEntry,
    TestimonySource, ViolationSource,
};
use chronicle_domain::{Provenance, Record, ACTOR_SEPARATOR};
use chrono::NaiveDate;
use tracing::{debug, info};

/// The Extractor flattens nested source chunks into uniform records
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Get the extractor configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Parse a JSON document and flatten it
    pub fn extract_document(&self, json: &str) -> Result<ExtractionResult, LoadError> {
        let len = json.len() as u64;
        if len > self.config.max_document_bytes {
            return Err(LoadError::TooLarge(len, self.config.max_document_bytes));
        }
        let chunks = parse_document(json)?;
        Ok(self.extract(&chunks))
    }

    /// Flatten chunks into records
    ///
    /// Output preserves chunk order, then the order entries are listed in each
    /// chunk. Entries without a date are ignored; entries whose date does not
    /// parse are left out of `records` and listed in `skipped`.
    pub fn extract(&self, chunks: &[SourceChunk]) -> ExtractionResult {
        let mut records = Vec::new();
        let mut skipped = Vec::new();
        let mut metadata = ExtractionMetadata {
            chunks: chunks.len(),
            ..Default::default()
        };

        for chunk in chunks {
            let provenance = chunk.provenance();

            for entry in &chunk.entries {
                let Some(raw_date) = entry.raw_date() else {
                    metadata.entries_undated += 1;
                    continue;
                };
                metadata.entries_dated += 1;

                let Some(date) = parse_date(raw_date) else {
                    if self.config.log_skipped {
                        debug!(
                            "Skipping {} in chunk {}: unparseable date '{}'",
                            entry.category(),
                            chunk.chunk_id.as_deref().unwrap_or("<unknown>"),
                            raw_date
                        );
                    }
                    skipped.push(SkippedEntry {
                        category: entry.category(),
                        chunk_id: chunk.chunk_id.clone(),
                        raw_date: raw_date.to_string(),
                    });
                    continue;
                };

                records.push(flatten_entry(entry, date, provenance.clone()));
            }
        }

        info!(
            "Extracted {} records from {} chunks ({} skipped for unparseable dates)",
            records.len(),
            metadata.chunks,
            skipped.len()
        );

        ExtractionResult {
            records,
            skipped,
            metadata,
        }
    }
}

/// Flatten chunks with the default configuration
pub fn extract(chunks: &[SourceChunk]) -> Vec<Record> {
    Extractor::default().extract(chunks).records
}

fn flatten_entry(entry: &SourceEntry, date: NaiveDate, provenance: Provenance) -> Record {
    match entry {
        SourceEntry::Event(event) => flatten_event(event, date, provenance),
        SourceEntry::Testimony(testimony) => flatten_testimony(testimony, date, provenance),
        SourceEntry::Violation(violation) => flatten_violation(violation, date, provenance),
    }
}

fn flatten_event(event: &EventSource, date: NaiveDate, provenance: Provenance) -> Record {
    Record::event(
        date,
        event.label.clone().unwrap_or_default(),
        event.description.clone(),
        event.actors.join(ACTOR_SEPARATOR),
        provenance,
    )
}

fn flatten_testimony(
    testimony: &TestimonySource,
    date: NaiveDate,
    provenance: Provenance,
) -> Record {
    Record::testimony(
        date,
        testimony.witness.clone(),
        testimony.excerpt.clone(),
        testimony.location.clone(),
        provenance,
    )
}

fn flatten_violation(
    violation: &ViolationSource,
    date: NaiveDate,
    provenance: Provenance,
) -> Record {
    // `actors` wins over `party` whenever it carries a value.
    let actors = violation
        .actors
        .as_ref()
        .filter(|field| !field.is_empty())
        .or(violation.party.as_ref())
        .map(|field| field.to_display());

    let label = violation
        .label
        .clone()
        .filter(|label| !label.is_empty())
        .or_else(|| violation.description.clone())
        .unwrap_or_default();

    Record::violation(date, label, violation.description.clone(), actors, provenance)
}
