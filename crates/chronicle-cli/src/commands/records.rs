//! Records command implementation.

use crate::cli::RecordsArgs;
use crate::commands::apply_filter_args;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the records command.
pub fn execute_records(
    args: RecordsArgs,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    apply_filter_args(&args.filter, session);
    println!("{}", render_records(session, args.details, formatter)?);
    Ok(())
}

/// Render the current selection as a listing.
pub fn render_records(session: &Session, details: bool, formatter: &Formatter) -> Result<String> {
    let records = session.filtered();

    if formatter.format() != OutputFormat::Table {
        return formatter.format_records(&records);
    }

    let summary = session.summary();
    if summary.is_empty() {
        return Ok(formatter.format_summary(&summary));
    }

    let body = if details {
        formatter.format_record_details(&records)
    } else {
        formatter.format_records(&records)?
    };

    let mut sections = vec![formatter.format_summary(&summary), body];
    if session.skipped() > 0 {
        sections.push(formatter.warning(&format!(
            "{} entries skipped for unreadable dates",
            session.skipped()
        )));
    }
    sections.push(formatter.footer());
    Ok(sections.join("\n\n"))
}
