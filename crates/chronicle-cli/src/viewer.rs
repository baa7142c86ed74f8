//! PDF page viewers.
//!
//! Rendering PDF pages is left to an external program. The CLI either prints
//! the page request or launches a configured viewer command.

use crate::config::ViewerSettings;
use crate::error::{CliError, Result};
use chronicle_domain::{PageRequest, PageViewer};
use std::cell::RefCell;
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

/// Viewer that only reports the request on stdout.
#[derive(Debug, Default)]
pub struct ConsoleViewer;

impl PageViewer for ConsoleViewer {
    type Error = CliError;

    fn render_page(&self, request: &PageRequest) -> Result<()> {
        println!(
            "Open {} at page {} to view the source.",
            request.path.display(),
            request.page
        );
        Ok(())
    }
}

/// Viewer that spawns an external program per request.
///
/// Viewers run alongside the session. Their handles are kept and reaped once
/// they exit, so closed viewers do not linger as zombies.
#[derive(Debug)]
pub struct CommandViewer {
    template: String,
    children: RefCell<Vec<Child>>,
}

impl CommandViewer {
    /// Create a viewer from a command template.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            children: RefCell::new(Vec::new()),
        }
    }

    /// Reap viewers that have exited; returns how many are still running.
    pub fn reap(&self) -> usize {
        let mut children = self.children.borrow_mut();
        children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!("Viewer {} exited with {}", child.id(), status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("Lost track of viewer {}: {}", child.id(), e);
                false
            }
        });
        children.len()
    }

    /// Expand the template into program and arguments.
    pub fn command_line(&self, request: &PageRequest) -> Result<Vec<String>> {
        let path = request.path.display().to_string();
        let page = request.page.to_string();
        let args: Vec<String> = self
            .template
            .split_whitespace()
            .map(|token| {
                token
                    .replace("{path}", &path)
                    .replace("{page}", &page)
                    .replace("{width}", &request.width)
            })
            .collect();

        if args.is_empty() {
            return Err(CliError::Viewer("viewer command is empty".to_string()));
        }
        Ok(args)
    }
}

impl PageViewer for CommandViewer {
    type Error = CliError;

    fn render_page(&self, request: &PageRequest) -> Result<()> {
        let args = self.command_line(request)?;
        info!("Launching viewer: {}", args.join(" "));

        self.reap();
        let child = Command::new(&args[0])
            .args(&args[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CliError::Viewer(format!("Failed to start '{}': {}", args[0], e)))?;
        self.children.borrow_mut().push(child);
        Ok(())
    }
}

/// Viewer selected from configuration.
#[derive(Debug)]
pub enum Viewer {
    /// Print the request
    Console(ConsoleViewer),
    /// Launch an external program
    Command(CommandViewer),
}

impl Viewer {
    /// Build the viewer described by the settings.
    pub fn from_settings(settings: &ViewerSettings) -> Self {
        match &settings.command {
            Some(template) => Viewer::Command(CommandViewer::new(template.clone())),
            None => Viewer::Console(ConsoleViewer),
        }
    }
}

impl PageViewer for Viewer {
    type Error = CliError;

    fn render_page(&self, request: &PageRequest) -> Result<()> {
        match self {
            Viewer::Console(viewer) => viewer.render_page(request),
            Viewer::Command(viewer) => viewer.render_page(request),
        }
    }
}
