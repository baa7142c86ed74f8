//! Exploration session: loaded records, current filters and view state.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::state::ViewState;
use chronicle_domain::{Category, FilterCriteria, PageRequest, Record, RecordLoader};
use chronicle_extractor::{Extractor, RecordCache};
use chronicle_filter::{apply_filters, filter_facets, Facets, FilterSummary};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Wires the record cache, filter criteria and view state together.
///
/// Every interaction mutates the criteria or the view state and then reads
/// the filtered selection again; the record table itself is only rebuilt
/// when the source file changes or a reload is requested.
pub struct Session {
    data_path: PathBuf,
    pdf_path: PathBuf,
    pdf_width: String,
    cache: RecordCache,
    records: Arc<Vec<Record>>,
    skipped: usize,
    criteria: FilterCriteria,
    view: ViewState,
}

impl Session {
    /// Open a session by loading the configured document.
    pub fn open(config: &Config) -> Result<Self> {
        let mut cache = RecordCache::new(Extractor::new(config.extractor.clone()));
        let entry = cache.load_entry(&config.sources.data)?;
        let records = Arc::clone(entry.records());
        let skipped = entry.skipped().len();

        info!(
            "Session opened with {} records ({} skipped)",
            records.len(),
            skipped
        );

        Ok(Self {
            data_path: config.sources.data.clone(),
            pdf_path: config.sources.pdf.clone(),
            pdf_width: config.viewer.width.clone(),
            criteria: FilterCriteria::spanning(&records),
            cache,
            records,
            skipped,
            view: ViewState::new(),
        })
    }

    /// Re-read the document if it changed on disk.
    ///
    /// With `force` the memoized table is dropped first. Criteria are kept.
    pub fn reload(&mut self, force: bool) -> Result<()> {
        if force {
            self.cache.invalidate(&self.data_path);
        }
        let entry = self.cache.load_entry(&self.data_path)?;
        self.records = Arc::clone(entry.records());
        self.skipped = entry.skipped().len();
        Ok(())
    }

    /// Every loaded record, in document order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of entries dropped for unparseable dates.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Facets of the full record set.
    pub fn facets(&self) -> Facets {
        filter_facets(&self.records)
    }

    /// Current filter criteria.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the filter criteria.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Records matching the current criteria, sorted by date.
    pub fn filtered(&self) -> Vec<Record> {
        apply_filters(&self.records, &self.criteria)
    }

    /// Counts for the current selection.
    pub fn summary(&self) -> FilterSummary {
        FilterSummary::new(self.records.len(), &self.filtered())
    }

    /// Set the lower date bound; `None` resets it to the earliest record.
    pub fn set_from(&mut self, date: Option<NaiveDate>) {
        self.criteria.date_from = date.unwrap_or(FilterCriteria::spanning(&self.records).date_from);
    }

    /// Set the upper date bound; `None` resets it to the latest record.
    pub fn set_to(&mut self, date: Option<NaiveDate>) {
        self.criteria.date_to = date.unwrap_or(FilterCriteria::spanning(&self.records).date_to);
    }

    /// Select categories; an empty list selects every category present.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.criteria.selected_categories = if categories.is_empty() {
            FilterCriteria::spanning(&self.records).selected_categories
        } else {
            categories.into_iter().collect()
        };
    }

    /// Select actors; an empty list removes the actor filter.
    pub fn set_actors(&mut self, actors: Vec<String>) {
        self.criteria.selected_actors = actors.into_iter().collect();
    }

    /// Restore the default criteria.
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::spanning(&self.records);
    }

    /// View state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// "View page" action on the `index`-th (1-based) filtered record.
    ///
    /// Returns the record the action applied to. Records without a page leave
    /// the selection unchanged.
    pub fn view_record(&mut self, index: usize) -> Result<Record> {
        let record = index
            .checked_sub(1)
            .and_then(|i| self.filtered().into_iter().nth(i))
            .ok_or(CliError::NoSuchRecord(index))?;
        self.view.view_page(&record);
        Ok(record)
    }

    /// The page request for the current selection, if any.
    pub fn page_request(&self) -> Option<PageRequest> {
        self.view.selected_pdf_page().map(|page| PageRequest {
            path: self.pdf_path.clone(),
            page,
            width: self.pdf_width.clone(),
        })
    }
}
