//! Background worker driving one installation run

use crate::install::events::{RunEvent, RunOutcome};
use crate::install::process::InstallerProcess;
use crate::install::session::InstallSession;
use crate::utils::error::{InstallerError, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use tracing::{info, info_span, warn};
use uuid::Uuid;

/// Begin a run on `session` and spawn the worker thread for it.
///
/// Events arrive on the returned receiver in the order the script produced
/// them; the last one is always [`RunEvent::StreamEnded`].
pub fn start_installation(
    session: &mut InstallSession,
    script: PathBuf,
) -> Result<Receiver<RunEvent>> {
    let run_id = Uuid::new_v4();
    session.begin(run_id, &script)?;

    let (tx, rx): (Sender<RunEvent>, Receiver<RunEvent>) = channel();

    let spawned = thread::Builder::new()
        .name("installer".to_string())
        .spawn(move || run_installation(run_id, &script, &tx));

    if let Err(e) = spawned {
        session.finish(RunOutcome::Unknown {
            reason: format!("could not start worker thread: {}", e),
        });
        return Err(InstallerError::Io(e));
    }

    Ok(rx)
}

/// Run the installer script to completion, forwarding its output.
///
/// Never fails: every problem is turned into events.
pub fn run_installation(run_id: Uuid, script: &Path, tx: &Sender<RunEvent>) {
    let span = info_span!("run", id = %run_id);
    let _enter = span.enter();

    info!("Starting installer {}", script.display());

    let mut process = match InstallerProcess::spawn(script) {
        Ok(process) => process,
        Err(InstallerError::ScriptNotFound(path)) => {
            warn!("Installer script not found: {}", path.display());
            let _ = tx.send(RunEvent::LogLine(format!("Error: {} not found!", path.display())));
            let _ = tx.send(RunEvent::StreamEnded(RunOutcome::ScriptMissing { path }));
            return;
        }
        Err(e) => {
            warn!("{}", e);
            let _ = tx.send(RunEvent::LogLine(format!("Error: {}", e)));
            let _ = tx.send(RunEvent::StreamEnded(RunOutcome::SpawnFailed {
                path: script.to_path_buf(),
                reason: e.to_string(),
            }));
            return;
        }
    };

    // Keep draining after the receiver is gone so the script never blocks on a full pipe
    for line in process.lines() {
        match line {
            Ok(line) => {
                if let Some(event) = RunEvent::from_line(&line) {
                    let _ = tx.send(event);
                }
            }
            Err(e) => {
                warn!("Failed to read installer output: {}", e);
                break;
            }
        }
    }

    let outcome = match process.wait() {
        Ok(status) => RunOutcome::from_status(status),
        Err(e) => {
            warn!("Failed to wait for installer: {}", e);
            RunOutcome::Unknown {
                reason: e.to_string(),
            }
        }
    };

    info!("Installer finished: {:?}", outcome);
    let _ = tx.send(RunEvent::StreamEnded(outcome));
}
