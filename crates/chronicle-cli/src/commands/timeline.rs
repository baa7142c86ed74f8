//! Timeline command implementation.

use crate::cli::FilterArgs;
use crate::commands::apply_filter_args;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the timeline command.
pub fn execute_timeline(
    args: FilterArgs,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    apply_filter_args(&args, session);
    println!("{}", render_timeline(session, formatter)?);
    Ok(())
}

/// Render the current selection as a chart.
///
/// JSON output carries the plotted points instead of the drawing.
pub fn render_timeline(session: &Session, formatter: &Formatter) -> Result<String> {
    let records = session.filtered();
    match formatter.format() {
        OutputFormat::Table => {
            let summary = session.summary();
            if summary.is_empty() {
                return Ok(formatter.format_summary(&summary));
            }
            Ok(format!(
                "{}\n\n{}",
                formatter.format_summary(&summary),
                formatter.format_timeline(&records)
            ))
        }
        OutputFormat::Json | OutputFormat::Quiet => formatter.format_records(&records),
    }
}
