//! Installer subprocess with a merged stdout/stderr stream

use crate::utils::error::{InstallerError, Result};
use nix::fcntl::OFlag;
use nix::unistd::pipe2;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::debug;

/// A running installer script
pub struct InstallerProcess {
    script: PathBuf,
    child: Child,
    output: BufReader<File>,
}

impl InstallerProcess {
    /// Start `script` with no arguments and the inherited environment.
    ///
    /// Both stdout and stderr are connected to the write end of one pipe,
    /// so lines arrive in the order the script wrote them.
    pub fn spawn(script: &Path) -> Result<Self> {
        if !script.is_file() {
            return Err(InstallerError::ScriptNotFound(script.to_path_buf()));
        }

        let (read_end, write_end) = pipe2(OFlag::O_CLOEXEC)?;
        let write_end_err = write_end.try_clone()?;

        let mut command = Command::new(script);
        command
            .stdout(Stdio::from(write_end))
            .stderr(Stdio::from(write_end_err));

        let child = command.spawn().map_err(|source| InstallerError::SpawnFailed {
            script: script.to_path_buf(),
            source,
        })?;
        // Command still owns both write ends; EOF only arrives once they are closed
        drop(command);

        debug!("Spawned {} (pid {})", script.display(), child.id());

        Ok(Self {
            script: script.to_path_buf(),
            child,
            output: BufReader::new(File::from(read_end)),
        })
    }

    /// Output lines until end-of-stream, trimmed and lossily decoded.
    pub fn lines(&mut self) -> OutputLines<'_> {
        OutputLines {
            reader: &mut self.output,
            buf: Vec::new(),
            done: false,
        }
    }

    /// Wait for the script to exit.
    pub fn wait(mut self) -> Result<ExitStatus> {
        let status = self.child.wait()?;
        debug!("{} exited with {}", self.script.display(), status);
        Ok(status)
    }
}

/// Iterator over the lines of an [`InstallerProcess`]
pub struct OutputLines<'a> {
    reader: &'a mut BufReader<File>,
    buf: Vec<u8>,
    done: bool,
}

impl Iterator for OutputLines<'_> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => Some(Ok(String::from_utf8_lossy(&self.buf).trim().to_string())),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
