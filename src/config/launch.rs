//! Launch configuration: where the installer script lives

use crate::utils::error::{InstallerError, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Environment variable naming the AppImage mount point
pub const APPDIR_ENV: &str = "APPDIR";

/// Installer script location relative to the installation root
pub const SCRIPT_RELATIVE_PATH: &str = "usr/bin/install_truckersmp.sh";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Installation root (`$APPDIR`, or the current directory)
    pub appdir: PathBuf,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            appdir: PathBuf::from("."),
        }
    }
}

impl LaunchConfig {
    pub fn new(appdir: impl Into<PathBuf>) -> Self {
        Self {
            appdir: appdir.into(),
        }
    }

    /// Build from an optional root, as parsed by clap from `--appdir`/`$APPDIR`.
    /// An unset or empty value falls back to the current directory.
    pub fn resolve(appdir: Option<PathBuf>) -> Self {
        appdir
            .filter(|p| !p.as_os_str().is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    /// Full path of the installer script
    pub fn script_path(&self) -> PathBuf {
        self.appdir.join(SCRIPT_RELATIVE_PATH)
    }

    /// Check that the script exists and can be executed.
    pub fn validate(&self) -> Result<PathBuf> {
        let script = self.script_path();
        check_script(&script)?;
        Ok(script)
    }
}

fn check_script(script: &Path) -> Result<()> {
    if !script.is_file() {
        return Err(InstallerError::ScriptNotFound(script.to_path_buf()));
    }

    let mode = std::fs::metadata(script)?.permissions().mode();
    if mode & 0o111 == 0 {
        return Err(InstallerError::ScriptNotExecutable(script.to_path_buf()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::test_support::{scratch_dir, write_script};

    #[test]
    fn unset_or_empty_root_falls_back_to_current_dir() {
        assert_eq!(LaunchConfig::resolve(None).appdir, PathBuf::from("."));
        assert_eq!(
            LaunchConfig::resolve(Some(PathBuf::new())).appdir,
            PathBuf::from(".")
        );
    }

    #[test]
    fn script_path_is_under_usr_bin() {
        let config = LaunchConfig::new("/tmp/.mount_TruckersMP");
        assert_eq!(
            config.script_path(),
            PathBuf::from("/tmp/.mount_TruckersMP/usr/bin/install_truckersmp.sh")
        );
    }

    #[test]
    fn validate_reports_missing_script() {
        let config = LaunchConfig::new(scratch_dir());
        match config.validate() {
            Err(InstallerError::ScriptNotFound(path)) => assert_eq!(path, config.script_path()),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_non_executable_script() {
        let root = scratch_dir();
        let config = LaunchConfig::new(&root);
        let script = config.script_path();
        std::fs::create_dir_all(script.parent().unwrap()).unwrap();
        std::fs::write(&script, "#!/bin/sh\n").unwrap();

        assert!(matches!(
            config.validate(),
            Err(InstallerError::ScriptNotExecutable(_))
        ));
    }

    #[test]
    fn validate_accepts_executable_script() {
        let root = scratch_dir();
        let config = LaunchConfig::new(&root);
        write_script(&config.script_path(), "echo hello");

        assert_eq!(config.validate().unwrap(), config.script_path());
    }
}
