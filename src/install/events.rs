//! Events flowing from the installer worker to the presenter

use crate::protocol::{classify_line, LineKind};
use serde::Serialize;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::ExitStatus;
use tracing::debug;

/// Installation progress message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum RunEvent {
    /// Line for the plain log
    LogLine(String),
    /// Progress percentage, 0 to 100
    Progress(u8),
    /// Error reported by the installer script
    Error(String),
    /// Output stream closed; no further events follow
    StreamEnded(RunOutcome),
}

impl RunEvent {
    /// Turn one trimmed output line into an event.
    ///
    /// `INFO:` lines produce nothing.
    pub fn from_line(line: &str) -> Option<Self> {
        match classify_line(line) {
            LineKind::Progress(value) => Some(Self::Progress(value)),
            LineKind::Error(message) => Some(Self::Error(message.to_string())),
            LineKind::Info(message) => {
                debug!("installer: {}", message);
                None
            }
            LineKind::Plain(text) => Some(Self::LogLine(text.to_string())),
        }
    }
}

/// How an installation run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Exited { code: i32 },
    Signaled { signal: i32 },
    ScriptMissing { path: PathBuf },
    SpawnFailed { path: PathBuf, reason: String },
    Unknown { reason: String },
}

impl RunOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            Self::Exited { code }
        } else if let Some(signal) = status.signal() {
            Self::Signaled { signal }
        } else {
            Self::Unknown {
                reason: status.to_string(),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Exited { code: 0 })
    }

    /// Exit code, when the script ran and exited normally
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exited { code } => Some(*code),
            _ => None,
        }
    }

    /// Status for the CLI to exit with: the script's own code, `128 + N`
    /// for signal N, `1` when the script never ran.
    pub fn process_exit_status(&self) -> u8 {
        match (self.exit_code(), self) {
            (Some(code), _) => u8::try_from(code).unwrap_or(1),
            (None, Self::Signaled { signal }) => u8::try_from(128 + signal).unwrap_or(1),
            (None, _) => 1,
        }
    }

    /// Final log line for the run.
    ///
    /// `None` when the script never started; the worker has already logged why.
    pub fn summary_line(&self) -> Option<String> {
        match self {
            Self::Exited { code: 0 } => Some("Installation completed successfully.".to_string()),
            Self::Exited { code } => Some(format!("Installation failed with code {}.", code)),
            Self::Signaled { signal } => Some(format!(
                "Installation failed: terminated by {}.",
                signal_name(*signal)
            )),
            Self::Unknown { reason } => Some(format!("Installation failed: {}.", reason)),
            Self::ScriptMissing { .. } | Self::SpawnFailed { .. } => None,
        }
    }
}

fn signal_name(signal: i32) -> String {
    nix::sys::signal::Signal::try_from(signal)
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|_| format!("signal {}", signal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_map_to_events() {
        assert_eq!(RunEvent::from_line("PROGRESS:42"), Some(RunEvent::Progress(42)));
        assert_eq!(
            RunEvent::from_line("ERROR:disk full"),
            Some(RunEvent::Error("disk full".to_string()))
        );
        assert_eq!(RunEvent::from_line("INFO:start"), None);
        assert_eq!(
            RunEvent::from_line("Fetching TruckersMP launcher"),
            Some(RunEvent::LogLine("Fetching TruckersMP launcher".to_string()))
        );
        assert_eq!(
            RunEvent::from_line("PROGRESS:lots"),
            Some(RunEvent::LogLine("PROGRESS:lots".to_string()))
        );
    }

    #[test]
    fn summary_lines() {
        assert_eq!(
            RunOutcome::Exited { code: 0 }.summary_line().as_deref(),
            Some("Installation completed successfully.")
        );
        assert_eq!(
            RunOutcome::Exited { code: 1 }.summary_line().as_deref(),
            Some("Installation failed with code 1.")
        );
        assert_eq!(
            RunOutcome::Signaled { signal: 9 }.summary_line().as_deref(),
            Some("Installation failed: terminated by SIGKILL.")
        );
        assert_eq!(
            RunOutcome::ScriptMissing {
                path: PathBuf::from("./usr/bin/install_truckersmp.sh")
            }
            .summary_line(),
            None
        );
    }

    #[test]
    fn only_exit_zero_is_success() {
        assert!(RunOutcome::Exited { code: 0 }.is_success());
        assert!(!RunOutcome::Exited { code: 2 }.is_success());
        assert!(!RunOutcome::Signaled { signal: 15 }.is_success());
    }

    #[test]
    fn exit_status_follows_the_script() {
        assert_eq!(RunOutcome::Exited { code: 0 }.exit_code(), Some(0));
        assert_eq!(RunOutcome::Exited { code: 0 }.process_exit_status(), 0);
        assert_eq!(RunOutcome::Exited { code: 3 }.process_exit_status(), 3);
        assert_eq!(RunOutcome::Signaled { signal: 9 }.exit_code(), None);
        assert_eq!(RunOutcome::Signaled { signal: 9 }.process_exit_status(), 137);
        assert_eq!(
            RunOutcome::ScriptMissing {
                path: PathBuf::from("./usr/bin/install_truckersmp.sh")
            }
            .process_exit_status(),
            1
        );
        assert_eq!(
            RunOutcome::Unknown {
                reason: "lost".to_string()
            }
            .process_exit_status(),
            1
        );
    }

    #[test]
    fn events_serialize_as_tagged_json() {
        let json = serde_json::to_string(&RunEvent::Progress(50)).unwrap();
        assert_eq!(json, r#"{"event":"progress","value":50}"#);

        let json =
            serde_json::to_string(&RunEvent::StreamEnded(RunOutcome::Exited { code: 1 })).unwrap();
        assert_eq!(
            json,
            r#"{"event":"stream_ended","value":{"outcome":"exited","code":1}}"#
        );
    }
}
