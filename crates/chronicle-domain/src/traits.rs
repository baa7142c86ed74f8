//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Implementations live in other crates.

use crate::Record;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Trait for loading the flattened record table from a source document
///
/// Implemented by the extractor layer (chronicle-extractor)
pub trait RecordLoader {
    /// Error type for load operations
    type Error;

    /// Load (or return the memoized) records for the document at `path`
    fn load(&mut self, path: &Path) -> Result<Arc<Vec<Record>>, Self::Error>;

    /// Forget any memoized state for `path`
    fn invalidate(&mut self, path: &Path);
}

/// A request to display one page of a PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Path to the PDF file
    pub path: PathBuf,

    /// Page to render (1-based)
    pub page: u32,

    /// Rendering width hint (e.g. "100%" or "800")
    pub width: String,
}

/// Trait for the PDF page-rendering collaborator
///
/// Implemented by the presentation layer (chronicle-cli)
pub trait PageViewer {
    /// Error type for rendering
    type Error;

    /// Display the requested page
    fn render_page(&self, request: &PageRequest) -> Result<(), Self::Error>;
}
