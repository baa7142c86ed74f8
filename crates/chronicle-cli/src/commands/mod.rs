//! Command implementations.

pub mod config;
pub mod facets;
pub mod records;
pub mod timeline;
pub mod view;

pub use self::config::execute_config;
pub use self::facets::execute_facets;
pub use self::records::execute_records;
pub use self::timeline::execute_timeline;
pub use self::view::execute_view;

use crate::cli::{Command, FilterArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::repl;
use crate::session::Session;
use crate::viewer::Viewer;
use std::path::Path;

/// Dispatch a parsed command; no command means the REPL.
///
/// The records document is only loaded by commands that read it, so
/// `config` works before any document exists.
pub fn execute(
    command: Option<Command>,
    config: &Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let command = match command {
        Some(Command::Config(args)) => {
            return execute_config(args, config, config_path, formatter);
        }
        Some(command) => command,
        None => Command::Repl,
    };

    let mut session = Session::open(config)?;
    let viewer = Viewer::from_settings(&config.viewer);

    match command {
        Command::Repl => repl::run_repl(&mut session, &viewer, config, formatter),
        Command::Timeline(args) => execute_timeline(args, &mut session, formatter),
        Command::Records(args) => execute_records(args, &mut session, formatter),
        Command::Facets => execute_facets(&session, formatter),
        Command::View(args) => execute_view(args, &mut session, &viewer, formatter),
        Command::Config(args) => execute_config(args, config, config_path, formatter),
    }
}

/// Apply command-line filters on top of the session defaults.
///
/// Unset flags leave the corresponding criterion at its default.
pub fn apply_filter_args(args: &FilterArgs, session: &mut Session) {
    if args.from.is_some() {
        session.set_from(args.from);
    }
    if args.to.is_some() {
        session.set_to(args.to);
    }
    if !args.categories.is_empty() {
        session.set_categories(args.categories.iter().copied().map(Into::into).collect());
    }
    if !args.actors.is_empty() {
        session.set_actors(args.actors.clone());
    }
}


#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::Config;
    use crate::session::Session;
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub const DOCUMENT: &str = r#"[
        {"chunk_id": "c1", "page": 5, "part_title": "Part I", "model_output": {
            "events": [{"date": "1990-03-01", "label": "Clash", "description": "Fighting", "actors": ["Militia", "Army"]}],
            "testimonies": [{"date": "1991-07-12", "witness": "J. Doe", "excerpt": "...", "location": "Tbilisi"}]
        }},
        {"chunk_id": "c2", "page": 11, "model_output": {
            "violations": [{"date": "1989-06-01", "label": "Arrests", "actors": "Police"}],
            "events": [{"date": "unknown", "label": "Rumour"}]
        }}
    ]"#;

    pub fn session() -> (NamedTempFile, Session) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();
        file.flush().unwrap();

        let mut config = Config::default();
        config.sources.data = file.path().to_path_buf();
        let session = Session::open(&config).unwrap();
        (file, session)
    }
}
