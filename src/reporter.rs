//! Terminal reporting for headless runs
//!
//! The CLI drives the same [`InstallSession`] as the GUI and hands every
//! event to an [`EventReporter`]: `TextReporter` draws an indicatif bar with
//! the log above it, `JsonReporter` writes one JSON object per event.

use crate::config::LaunchConfig;
use crate::install::{start_installation, InstallSession, Notice, RunEvent, RunOutcome};
use crate::utils::error::{InstallerError, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;

/// Receives run events and the notices the session derives from them
pub trait EventReporter {
    fn event(&mut self, event: &RunEvent) -> Result<()>;
    fn notice(&mut self, notice: &Notice) -> Result<()>;
}

/// Run the installer without a window, reporting through `reporter`.
pub fn run_headless(
    config: &LaunchConfig,
    reporter: &mut dyn EventReporter,
) -> Result<RunOutcome> {
    let mut session = InstallSession::new();
    let events = start_installation(&mut session, config.script_path())?;

    for event in events {
        reporter.event(&event)?;
        if let Some(notice) = session.apply(event) {
            reporter.notice(&notice)?;
        }
    }

    session
        .outcome()
        .cloned()
        .ok_or_else(|| InstallerError::Incomplete("installer worker stopped early".to_string()))
}

/// Human-readable output with a progress bar
pub struct TextReporter {
    bar: ProgressBar,
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextReporter {
    pub fn new() -> Self {
        let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let bar = ProgressBar::new(100);
        bar.set_style(style);
        Self { bar }
    }

    // println through suspend so lines survive when the bar is hidden
    fn line(&self, text: impl std::fmt::Display) {
        self.bar.suspend(|| println!("{}", text));
    }
}

impl EventReporter for TextReporter {
    fn event(&mut self, event: &RunEvent) -> Result<()> {
        match event {
            RunEvent::LogLine(line) => self.line(line),
            RunEvent::Progress(value) => self.bar.set_position(u64::from(*value)),
            RunEvent::Error(_) => {}
            RunEvent::StreamEnded(outcome) => {
                self.bar.finish_and_clear();
                if let Some(summary) = outcome.summary_line() {
                    if outcome.is_success() {
                        println!("{}", summary.green());
                    } else {
                        println!("{}", summary.red());
                    }
                }
            }
        }
        Ok(())
    }

    fn notice(&mut self, notice: &Notice) -> Result<()> {
        match notice {
            Notice::Error(message) => {
                self.bar
                    .suspend(|| eprintln!("{} {}", "Error:".red().bold(), message));
            }
            Notice::Complete => self.line(format!("✓ {}", notice.message()).green()),
        }
        Ok(())
    }
}

/// One JSON object per event, newline separated
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventReporter for JsonReporter<W> {
    fn event(&mut self, event: &RunEvent) -> Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn notice(&mut self, _notice: &Notice) -> Result<()> {
        Ok(())
    }
}
