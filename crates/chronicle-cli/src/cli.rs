//! CLI command definitions and argument parsing.

use chronicle_domain::Category;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Chronicle - Explore events, testimonies and violations extracted from a report.
#[derive(Debug, Parser)]
#[command(name = "chronicle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Extracted records document (JSON)
    #[arg(short, long, env = "CHRONICLE_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// Source PDF the records point into
    #[arg(long, env = "CHRONICLE_PDF", global = true)]
    pub pdf: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (date and label only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plot the selected records on a timeline
    Timeline(FilterArgs),

    /// List the selected records
    Records(RecordsArgs),

    /// Show the available categories, actors and date range
    Facets,

    /// Open the PDF page of a listed record
    View(ViewArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Selection filters shared by the listing commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Earliest date to include
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// Latest date to include
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,

    /// Restrict to categories (repeatable)
    #[arg(long = "category", value_enum)]
    pub categories: Vec<CategoryArg>,

    /// Restrict to records naming any of these actors (repeatable)
    #[arg(long = "actor")]
    pub actors: Vec<String>,
}

/// Arguments for the records command.
#[derive(Debug, Args)]
pub struct RecordsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print the full detail panel of every record
    #[arg(long)]
    pub details: bool,
}

/// Arguments for the view command.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Position of the record in the filtered listing (1-based)
    pub index: usize,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Arguments for configuration management.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Category argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CategoryArg {
    /// Dated events
    Event,
    /// Witness testimonies
    Testimony,
    /// Documented violations
    Violation,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<CategoryArg> for Category {
    fn from(category: CategoryArg) -> Self {
        match category {
            CategoryArg::Event => Category::Event,
            CategoryArg::Testimony => Category::Testimony,
            CategoryArg::Violation => Category::Violation,
        }
    }
}

/// Parse a date argument with the same leniency as the document loader.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    chronicle_extractor::parse_date(s).ok_or_else(|| format!("unrecognized date: '{}'", s))
}
