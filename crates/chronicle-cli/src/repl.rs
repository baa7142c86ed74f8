//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Each line either adjusts the selection (dates, categories, actors) or
//! renders it. The session keeps the criteria and the selected PDF page
//! between lines.

use crate::commands;
use crate::commands::records::render_records;
use crate::commands::timeline::render_timeline;
use crate::config::{chronicle_dir, Config};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use crate::viewer::Viewer;
use chronicle_domain::{Category, PageViewer};
use chrono::NaiveDate;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;
use tracing::debug;

/// Run the interactive REPL.
pub fn run_repl(
    session: &mut Session,
    viewer: &Viewer,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    println!(
        "{}",
        formatter.info("Chronicle REPL - Type 'help' for commands, 'exit' to quit")
    );
    println!("{}", formatter.format_summary(&session.summary()));
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = match session.view().selected_pdf_page() {
            Some(page) => format!("chronicle [p.{}]> ", page),
            None => "chronicle> ".to_string(),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, session, viewer, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    Help,
    /// Lower date bound; `None` resets it
    From(Option<NaiveDate>),
    /// Upper date bound; `None` resets it
    To(Option<NaiveDate>),
    /// Selected categories; empty selects all present
    Types(Vec<Category>),
    /// Selected actors; empty clears the actor filter
    Actors(Vec<String>),
    Reset,
    Criteria,
    Timeline,
    Records { details: bool },
    Show(usize),
    Facets,
    View(usize),
    Page,
    Reload,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "from" => parse_bound(rest, "from").map(ReplCommand::From),
        "to" => parse_bound(rest, "to").map(ReplCommand::To),
        "types" => parse_types(rest).map(ReplCommand::Types),
        "actors" => Ok(ReplCommand::Actors(parse_actors(rest))),
        "reset" => Ok(ReplCommand::Reset),
        "criteria" => Ok(ReplCommand::Criteria),
        "timeline" | "t" => Ok(ReplCommand::Timeline),
        "records" | "ls" => match rest {
            "" => Ok(ReplCommand::Records { details: false }),
            "details" | "-d" => Ok(ReplCommand::Records { details: true }),
            other => Err(CliError::InvalidInput(format!(
                "Usage: records [details] (got '{}')",
                other
            ))),
        },
        "show" => parse_index(rest, "show").map(ReplCommand::Show),
        "facets" => Ok(ReplCommand::Facets),
        "view" => parse_index(rest, "view").map(ReplCommand::View),
        "page" => Ok(ReplCommand::Page),
        "reload" => Ok(ReplCommand::Reload),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            head
        ))),
    }
}

/// Execute a REPL command.
fn execute_repl_command(
    cmd: ReplCommand,
    session: &mut Session,
    viewer: &Viewer,
    formatter: &Formatter,
) -> Result<()> {
    debug!("REPL command: {:?}", cmd);

    match cmd {
        ReplCommand::From(date) => {
            session.set_from(date);
            println!("{}", formatter.format_summary(&session.summary()));
        }
        ReplCommand::To(date) => {
            session.set_to(date);
            println!("{}", formatter.format_summary(&session.summary()));
        }
        ReplCommand::Types(categories) => {
            session.set_categories(categories);
            println!("{}", formatter.format_summary(&session.summary()));
        }
        ReplCommand::Actors(actors) => {
            session.set_actors(actors);
            println!("{}", formatter.format_summary(&session.summary()));
        }
        ReplCommand::Reset => {
            session.reset();
            println!("{}", formatter.success("Filters reset"));
        }
        ReplCommand::Criteria => {
            println!("{}", formatter.format_criteria(session.criteria()));
        }
        ReplCommand::Timeline => {
            println!("{}", render_timeline(session, formatter)?);
        }
        ReplCommand::Records { details } => {
            println!("{}", render_records(session, details, formatter)?);
        }
        ReplCommand::Show(index) => {
            let record = index
                .checked_sub(1)
                .and_then(|i| session.filtered().into_iter().nth(i))
                .ok_or(CliError::NoSuchRecord(index))?;
            println!("{}", formatter.format_record_detail(index, &record));
        }
        ReplCommand::Facets => {
            commands::execute_facets(session, formatter)?;
        }
        ReplCommand::View(index) => {
            commands::view::view_record(index, session, viewer, formatter)?;
        }
        ReplCommand::Page => match session.page_request() {
            Some(request) => viewer.render_page(&request)?,
            None => println!("{}", formatter.info("No page selected yet; use 'view <N>'")),
        },
        ReplCommand::Reload => {
            session.reload(true)?;
            println!(
                "{}",
                formatter.success(&format!("Reloaded {} records", session.records().len()))
            );
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

fn parse_bound(arg: &str, name: &str) -> Result<Option<NaiveDate>> {
    match arg {
        "" => Err(CliError::InvalidInput(format!(
            "Usage: {} <date|reset>",
            name
        ))),
        "reset" | "-" => Ok(None),
        raw => chronicle_extractor::parse_date(raw)
            .map(Some)
            .ok_or_else(|| CliError::InvalidInput(format!("Unrecognized date: '{}'", raw))),
    }
}

fn parse_types(arg: &str) -> Result<Vec<Category>> {
    if arg.is_empty() || arg == "all" {
        return Ok(Vec::new());
    }
    arg.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            Category::parse(s)
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown event type: '{}'", s)))
        })
        .collect()
}

/// Actor names are comma-separated so they may contain spaces.
fn parse_actors(arg: &str) -> Vec<String> {
    if arg == "none" {
        return Vec::new();
    }
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_index(arg: &str, name: &str) -> Result<usize> {
    arg.parse()
        .map_err(|_| CliError::InvalidInput(format!("Usage: {} <N>", name)))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = chronicle_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  from <date|reset>             - Set the earliest date shown");
    println!("  to <date|reset>               - Set the latest date shown");
    println!("  types [event testimony ...]   - Select event types (none or 'all' = every type)");
    println!("  actors [name, name ...]       - Select actors (none or 'none' = no actor filter)");
    println!("  reset                         - Restore the default filters");
    println!("  criteria                      - Show the active filters");
    println!("  timeline, t                   - Plot the selection");
    println!("  records [details], ls         - List the selection");
    println!("  show <N>                      - Expand record N of the listing");
    println!("  view <N>                      - Open the PDF page of record N");
    println!("  page                          - Reopen the selected PDF page");
    println!("  facets                        - List event types, actors and dates");
    println!("  reload                        - Re-read the records document");
    println!("  help, ?                       - Show this help");
    println!("  exit, quit, q                 - Exit REPL");
    println!();
}
