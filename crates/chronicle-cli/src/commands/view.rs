//! View command implementation.

use crate::cli::ViewArgs;
use crate::commands::apply_filter_args;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use chronicle_domain::PageViewer;

/// Execute the view command.
///
/// Selects the page of the `index`-th filtered record and hands the
/// resulting request to the viewer.
pub fn execute_view<V>(
    args: ViewArgs,
    session: &mut Session,
    viewer: &V,
    formatter: &Formatter,
) -> Result<()>
where
    V: PageViewer<Error = crate::error::CliError>,
{
    apply_filter_args(&args.filter, session);
    view_record(args.index, session, viewer, formatter)
}

/// Run the "view page" action on one listed record.
pub fn view_record<V>(
    index: usize,
    session: &mut Session,
    viewer: &V,
    formatter: &Formatter,
) -> Result<()>
where
    V: PageViewer<Error = crate::error::CliError>,
{
    let record = session.view_record(index)?;
    println!("{}", formatter.format_record_detail(index, &record));

    if record.page().is_none() {
        println!(
            "{}",
            formatter.warning("This record has no page number; the PDF selection is unchanged")
        );
    }

    match session.page_request() {
        Some(request) => viewer.render_page(&request),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::session;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use chronicle_domain::PageRequest;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingViewer {
        pages: RefCell<Vec<u32>>,
    }

    impl PageViewer for RecordingViewer {
        type Error = CliError;

        fn render_page(&self, request: &PageRequest) -> Result<()> {
            self.pages.borrow_mut().push(request.page);
            Ok(())
        }
    }

    #[test]
    fn test_view_renders_record_page() {
        let (_file, mut session) = session();
        let viewer = RecordingViewer::default();
        let formatter = Formatter::new(OutputFormat::Table, false);

        view_record(1, &mut session, &viewer, &formatter).unwrap();
        view_record(2, &mut session, &viewer, &formatter).unwrap();
        assert_eq!(*viewer.pages.borrow(), vec![11, 5]);
    }

    #[test]
    fn test_view_applies_filters_first() {
        let (_file, mut session) = session();
        let viewer = RecordingViewer::default();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = ViewArgs {
            index: 1,
            filter: crate::cli::FilterArgs {
                actors: vec!["Militia".to_string()],
                ..Default::default()
            },
        };

        execute_view(args, &mut session, &viewer, &formatter).unwrap();
        assert_eq!(*viewer.pages.borrow(), vec![5]);
    }

    #[test]
    fn test_view_unknown_index() {
        let (_file, mut session) = session();
        let viewer = RecordingViewer::default();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = view_record(7, &mut session, &viewer, &formatter);
        assert!(matches!(result, Err(CliError::NoSuchRecord(7))));
        assert!(viewer.pages.borrow().is_empty());
    }
}
