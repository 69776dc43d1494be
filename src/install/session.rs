//! Presenter state for an installation run
//!
//! `InstallSession` is the toolkit-independent half of the installer window:
//! it owns the log, the progress value and the start control's state, and
//! turns [`RunEvent`]s into [`Notice`]s the front-end must show. Both the
//! egui window and the headless CLI drive one of these.

use crate::install::events::{RunEvent, RunOutcome};
use crate::protocol::MAX_PROGRESS;
use crate::utils::error::{InstallerError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Run state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No run started yet; the start control is enabled
    Idle,
    /// The installer is running
    Running,
    /// The installer's output stream has ended
    Finished(RunOutcome),
}

/// Something the front-end must show the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Installer-reported error; does not end the run
    Error(String),
    /// Progress reached 100; the window closes once this is acknowledged
    Complete,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Error(_) => "Error",
            Self::Complete => "Installation Complete",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Error(message) => message,
            Self::Complete => "Installation completed successfully.",
        }
    }
}

#[derive(Debug)]
pub struct InstallSession {
    state: SessionState,
    run_id: Option<Uuid>,
    script: Option<PathBuf>,
    log: Vec<String>,
    progress: u8,
    completed: bool,
}

impl Default for InstallSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            run_id: None,
            script: None,
            log: Vec::new(),
            progress: 0,
            completed: false,
        }
    }

    /// Whether the start control is enabled.
    ///
    /// Only the initial idle state allows a start; a finished run keeps the
    /// control disabled.
    pub fn can_start(&self) -> bool {
        self.state == SessionState::Idle
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Enter the running state for a new run, clearing the log.
    pub fn begin(&mut self, run_id: Uuid, script: &Path) -> Result<()> {
        if !self.can_start() {
            return Err(InstallerError::AlreadyRunning);
        }

        info!("Run {} started: {}", run_id, script.display());
        self.state = SessionState::Running;
        self.run_id = Some(run_id);
        self.script = Some(script.to_path_buf());
        self.log.clear();
        self.progress = 0;
        self.completed = false;
        Ok(())
    }

    /// Fold one event into the session.
    pub fn apply(&mut self, event: RunEvent) -> Option<Notice> {
        if !self.is_running() {
            debug!("Ignoring event outside a run: {:?}", event);
            return None;
        }

        match event {
            RunEvent::LogLine(line) => {
                self.log.push(line);
                None
            }
            RunEvent::Progress(value) => {
                self.progress = value.min(MAX_PROGRESS);
                if self.progress == MAX_PROGRESS && !self.completed {
                    self.completed = true;
                    Some(Notice::Complete)
                } else {
                    None
                }
            }
            RunEvent::Error(message) => {
                warn!("Installer reported an error: {}", message);
                Some(Notice::Error(message))
            }
            RunEvent::StreamEnded(outcome) => {
                self.finish(outcome);
                None
            }
        }
    }

    /// Record the end of the run, appending the summary line.
    pub fn finish(&mut self, outcome: RunOutcome) {
        if let Some(summary) = outcome.summary_line() {
            self.log.push(summary);
        }
        if outcome.is_success() {
            info!("Installation finished successfully");
        } else {
            warn!("Installation did not succeed: {:?}", outcome);
        }
        self.state = SessionState::Finished(outcome);
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        match &self.state {
            SessionState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn run_id(&self) -> Option<Uuid> {
        self.run_id
    }

    pub fn script(&self) -> Option<&Path> {
        self.script.as_deref()
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }
}
