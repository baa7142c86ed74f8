//! Chronicle CLI library.
//!
//! Loads the extracted records document, keeps the exploration session
//! (filters and selected PDF page) and renders timelines, listings and
//! record details for the terminal.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;
pub mod session;
pub mod state;
pub mod viewer;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use session::Session;
pub use state::ViewState;
pub use viewer::Viewer;
