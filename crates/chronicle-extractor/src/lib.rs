//! Chronicle Extractor
//!
//! Converts the nested source document into the flat record table.
//!
//! # Overview
//!
//! The source document is a JSON array of chunks. Each chunk is tied to a PDF
//! page and carries lists of events, testimonies and violations (normally under
//! a `model_output` object). The Extractor flattens every dated entry into a
//! [`Record`](chronicle_domain::Record) that carries the chunk's provenance.
//!
//! # Architecture
//!
//! ```text
//! JSON file → RecordCache → parser → SourceChunk → Extractor → Vec<Record>
//! ```
//!
//! # Key Features
//!
//! - **Tolerant parsing**: missing or odd sub-fields default to `None`
//! - **One flattening function per entry kind**: events, testimonies, violations
//! - **Lenient dates**: ISO, month-name and reduced-precision forms
//! - **Memoized loading**: keyed by file path and modification time
//!
//! # Example Usage
//!
//! ```no_run
//! use chronicle_domain::RecordLoader;
//! use chronicle_extractor::{Extractor, ExtractorConfig, RecordCache};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), chronicle_extractor::LoadError> {
//! let mut cache = RecordCache::new(Extractor::new(ExtractorConfig::default()));
//! let records = cache.load(Path::new("up_in_flames_graph.json"))?;
//!
//! println!("Loaded {} records", records.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod dates;
mod error;
mod extractor;
mod parser;
mod types;

#[cfg(test)]
mod tests;

pub use cache::{CacheEntry, CacheStats, RecordCache};
pub use config::ExtractorConfig;
pub use dates::parse_date;
pub use error::LoadError;
pub use extractor::{extract, Extractor};
pub use parser::{parse_document, parse_value};
pub use types::{
    ActorField, EventSource, ExtractionMetadata, ExtractionResult, SkippedEntry, SourceChunk,
    SourceEntry, TestimonySource, ViolationSource,
};
