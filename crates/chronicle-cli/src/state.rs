//! Session view state.

use chronicle_domain::Record;

/// The one piece of mutable presentation state: which PDF page is shown.
///
/// Starts unset. The only transition is [`ViewState::view_page`], triggered by a
/// "view page" action on a displayed record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    selected_pdf_page: Option<u32>,
}

impl ViewState {
    /// Create the initial (unset) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected PDF page.
    pub fn selected_pdf_page(&self) -> Option<u32> {
        self.selected_pdf_page
    }

    /// Select the page of `record`.
    ///
    /// Returns the selected page, or `None` (leaving the state untouched) when
    /// the record carries no page.
    pub fn view_page(&mut self, record: &Record) -> Option<u32> {
        let page = record.page()?;
        self.selected_pdf_page = Some(page);
        Some(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_domain::Provenance;
    use chrono::NaiveDate;

    fn record(provenance: Provenance) -> Record {
        Record::event(
            NaiveDate::from_ymd_opt(1990, 3, 1).unwrap(),
            "Clash".to_string(),
            None,
            String::new(),
            provenance,
        )
    }

    #[test]
    fn test_initially_unset() {
        assert_eq!(ViewState::new().selected_pdf_page(), None);
    }

    #[test]
    fn test_view_page_sets_record_page() {
        let mut state = ViewState::new();
        assert_eq!(state.view_page(&record(Provenance::new("c1", 5))), Some(5));
        assert_eq!(state.selected_pdf_page(), Some(5));

        state.view_page(&record(Provenance::new("c2", 12)));
        assert_eq!(state.selected_pdf_page(), Some(12));
    }

    #[test]
    fn test_record_without_page_keeps_selection() {
        let mut state = ViewState::new();
        state.view_page(&record(Provenance::new("c1", 5)));
        assert_eq!(state.view_page(&record(Provenance::default())), None);
        assert_eq!(state.selected_pdf_page(), Some(5));
    }
}
