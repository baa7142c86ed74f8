//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chronicle_domain::{Category, FilterCriteria, Record};
use chronicle_filter::{Facets, FilterSummary};
use chrono::NaiveDate;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Message shown when the current filters select nothing.
pub const EMPTY_RESULT: &str = "No records found for selected filters.";

/// Width of the category label column in the timeline.
const TIMELINE_LABEL_WIDTH: usize = 10;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
    timeline_width: usize,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
            timeline_width: 60,
        }
    }

    /// Set the number of date columns used by the timeline.
    pub fn with_timeline_width(mut self, width: usize) -> Self {
        self.timeline_width = width.max(2);
        self
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a record list.
    pub fn format_records(&self, records: &[Record]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_records_json(records),
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(self.format_records_quiet(records)),
        }
    }

    /// Format records as JSON.
    fn format_records_json(&self, records: &[Record]) -> Result<String> {
        let json_records: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "date": r.date.to_string(),
                    "type": r.category.as_str(),
                    "label": r.label,
                    "description": r.description,
                    "actors": r.actors,
                    "location": r.location,
                    "witness": r.witness,
                    "chunk_id": r.provenance.chunk_id,
                    "page": r.provenance.page,
                    "part": r.provenance.part_title,
                    "chapter": r.provenance.chapter_title,
                    "section": r.provenance.section_title
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_records)?)
    }

    /// Format records as a numbered table.
    fn format_records_table(&self, records: &[Record]) -> String {
        if records.is_empty() {
            return self.colorize(EMPTY_RESULT, "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Date", "Type", "Label", "Actors", "Page"]);

        for (idx, record) in records.iter().enumerate() {
            builder.push_record([
                (idx + 1).to_string(),
                record.date.to_string(),
                record.category.to_string(),
                truncate(&record.label, 48),
                truncate(record.actors.as_deref().unwrap_or(""), 32),
                record.page().map(|p| p.to_string()).unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format records in quiet mode (date and label only).
    fn format_records_quiet(&self, records: &[Record]) -> String {
        records
            .iter()
            .map(|r| format!("{}\t{}", r.date, r.label))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the expanded detail panel of one listed record.
    pub fn format_record_detail(&self, index: usize, record: &Record) -> String {
        let header = format!("[{}] {} – {}", index, record.date, record.label);
        let mut lines = vec![self.colorize(&header, "cyan")];

        if let Some(actors) = record.actors.as_deref().filter(|a| !a.is_empty()) {
            lines.push(format!("    Actors: {}", actors));
        }
        if let Some(witness) = record.witness.as_deref().filter(|w| !w.is_empty()) {
            lines.push(format!("    Witness: {}", witness));
        }
        if let Some(location) = record.location.as_deref().filter(|l| !l.is_empty()) {
            lines.push(format!("    Location: {}", location));
        }
        lines.push(format!(
            "    Description: {}",
            record.description.as_deref().unwrap_or("None")
        ));
        lines.push(format!(
            "    Source: chunk `{}`, page {}",
            record.provenance.chunk_id.as_deref().unwrap_or("None"),
            record
                .page()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "None".to_string())
        ));
        lines.push(format!("    {}", record.provenance.breadcrumb()));
        if let Some(page) = record.page() {
            lines.push(format!("    → 'view {}' shows page {} in the PDF", index, page));
        }

        lines.join("\n")
    }

    /// Format every listed record as a detail panel.
    pub fn format_record_details(&self, records: &[Record]) -> String {
        if records.is_empty() {
            return self.colorize(EMPTY_RESULT, "yellow");
        }
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| self.format_record_detail(idx + 1, record))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Render the selection as a text scatter chart.
    ///
    /// One row per category, columns are equal date buckets between the first
    /// and last record. A cell holding several records shows their count.
    pub fn format_timeline(&self, records: &[Record]) -> String {
        let Some((first, last)) = date_span(records) else {
            return self.colorize(EMPTY_RESULT, "yellow");
        };

        let width = self.timeline_width;
        let span = (last - first).num_days();
        let column = |date: NaiveDate| -> usize {
            if span == 0 {
                0
            } else {
                ((date - first).num_days() * (width as i64 - 1) / span) as usize
            }
        };

        let mut lines = Vec::new();
        for category in Category::TIMELINE_ORDER {
            let mut counts = vec![0usize; width];
            for record in records.iter().filter(|r| r.category == category) {
                counts[column(record.date)] += 1;
            }

            let cells: String = counts
                .iter()
                .map(|count| match count {
                    0 => " ".to_string(),
                    1 => self.colorize("●", category_color(category)),
                    2..=9 => self.colorize(&count.to_string(), category_color(category)),
                    _ => self.colorize("+", category_color(category)),
                })
                .collect();

            lines.push(format!(
                "{:<width$} │{}",
                category.as_str(),
                cells,
                width = TIMELINE_LABEL_WIDTH
            ));
        }

        lines.push(format!(
            "{:<width$} └{}",
            "",
            "─".repeat(width),
            width = TIMELINE_LABEL_WIDTH
        ));

        let first_label = first.to_string();
        let last_label = last.to_string();
        let gap = (width + 1).saturating_sub(first_label.len() + last_label.len());
        let axis = if span == 0 {
            first_label
        } else {
            format!("{}{}{}", first_label, " ".repeat(gap.max(1)), last_label)
        };
        lines.push(format!(
            "{:<width$}  {}",
            "",
            axis,
            width = TIMELINE_LABEL_WIDTH
        ));

        lines.join("\n")
    }

    /// Format facets for the selection controls.
    pub fn format_facets(&self, facets: &Facets) -> Result<String> {
        if self.format == OutputFormat::Json {
            let json = serde_json::json!({
                "categories": facets.categories.iter().map(Category::as_str).collect::<Vec<_>>(),
                "actors": facets.actors,
                "date_range": facets.date_range.map(|(from, to)| {
                    serde_json::json!({ "from": from.to_string(), "to": to.to_string() })
                }),
            });
            return Ok(serde_json::to_string_pretty(&json)?);
        }

        let categories: Vec<&str> = facets.categories.iter().map(Category::as_str).collect();
        let mut lines = vec![
            format!("Event Types: {}", categories.join(", ")),
            match facets.date_range {
                Some((from, to)) => format!("Date Range: {} → {}", from, to),
                None => "Date Range: (no records)".to_string(),
            },
            format!("Actors ({}):", facets.actors.len()),
        ];
        lines.extend(facets.actors.iter().map(|actor| format!("  {}", actor)));
        Ok(lines.join("\n"))
    }

    /// Describe the active criteria.
    pub fn format_criteria(&self, criteria: &FilterCriteria) -> String {
        let categories: Vec<&str> = criteria
            .selected_categories
            .iter()
            .map(Category::as_str)
            .collect();
        let actors = if criteria.has_actor_filter() {
            criteria
                .selected_actors
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            "(any)".to_string()
        };
        format!(
            "Date Range: {} → {}\nEvent Types: {}\nActors: {}",
            criteria.date_from,
            criteria.date_to,
            if categories.is_empty() {
                "(none)".to_string()
            } else {
                categories.join(", ")
            },
            actors
        )
    }

    /// Format the "N of M" line for a selection.
    pub fn format_summary(&self, summary: &FilterSummary) -> String {
        if summary.is_empty() {
            return self.colorize(EMPTY_RESULT, "yellow");
        }
        let per_category: Vec<String> = summary
            .by_category
            .iter()
            .map(|(category, count)| format!("{} {}", count, category))
            .collect();
        self.info(&format!(
            "{} of {} records ({})",
            summary.matched,
            summary.total,
            per_category.join(", ")
        ))
    }

    /// Footer pointing readers at the source document.
    pub fn footer(&self) -> String {
        self.colorize(
            "Note: To view the full context, open the PDF at the specified page number and locate the chunk ID.",
            "magenta",
        )
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn category_color(category: Category) -> &'static str {
    match category {
        Category::Event => "blue",
        Category::Violation => "red",
        Category::Testimony => "green",
    }
}

fn date_span(records: &[Record]) -> Option<(NaiveDate, NaiveDate)> {
    let first = records.iter().map(|r| r.date).min()?;
    let last = records.iter().map(|r| r.date).max()?;
    Some((first, last))
}

/// Shorten text to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}
