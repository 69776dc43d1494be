//! Error types for the installer front-end

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("{} not found!", .0.display())]
    ScriptNotFound(PathBuf),

    #[error("Installer script is not executable: {}", .0.display())]
    ScriptNotExecutable(PathBuf),

    #[error("Failed to start {}: {source}", .script.display())]
    SpawnFailed {
        script: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("An installation is already running")]
    AlreadyRunning,

    #[error("Installation did not finish: {0}")]
    Incomplete(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nix error: {0}")]
    Nix(#[from] nix::Error),

    #[error("JSON serialize error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InstallerError>;
