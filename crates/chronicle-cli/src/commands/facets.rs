//! Facets command implementation.

use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the facets command.
pub fn execute_facets(session: &Session, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_facets(&session.facets())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::commands::test_support::session;
    use crate::config::OutputFormat;
    use crate::output::Formatter;

    #[test]
    fn test_facets_listing() {
        let (_file, session) = session();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_facets(&session.facets()).unwrap();
        assert!(output.contains("Event Types: Event, Testimony, Violation"));
        assert!(output.contains("Date Range: 1989-06-01 → 1991-07-12"));
        assert!(output.contains("Actors (3):"));
        assert!(output.contains("  Army"));
        assert!(output.contains("  Police"));
    }
}
