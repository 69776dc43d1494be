//! Installer script execution

mod events;
mod process;
mod session;
mod worker;

pub use events::{RunEvent, RunOutcome};
pub use process::{InstallerProcess, OutputLines};
pub use session::{InstallSession, Notice, SessionState};
pub use worker::{run_installation, start_installation};

#[cfg(test)]
pub(crate) mod test_support {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Fresh empty directory under the system temp dir
    pub fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("truckersmp-installer-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write an executable `/bin/sh` script at `path`
    pub fn write_script(path: &Path, body: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
