//! Launching the external editor.
//!
//! The store only needs one capability from the outside world: run a
//! program with the note path, hand it the terminal, and wait for it to
//! finish. [`Launcher`] is that seam; [`ProcessLauncher`] is the real
//! implementation and tests substitute their own.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

/// Outcome of a finished child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitState {
    pub success: bool,
    /// Exit code, `None` when the child was terminated by a signal.
    pub code: Option<i32>,
}

impl ExitState {
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }

    /// Human-readable description of a failed exit.
    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs an editor on a file and blocks until it exits.
pub trait Launcher {
    /// Run `editor` on `path` with inherited standard streams.
    ///
    /// `editor` is a command line; [`split_command`] describes how it is
    /// broken into program and arguments.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the program cannot be started.
    fn launch(&self, editor: &str, path: &Path) -> io::Result<ExitState>;
}

/// Spawns the editor as a real child process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, editor: &str, path: &Path) -> io::Result<ExitState> {
        let (program, args) = split_command(editor).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "editor command is empty")
        })?;

        debug!(program, ?args, path = %path.display(), "spawning editor");
        let status = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        Ok(ExitState {
            success: status.success(),
            code: status.code(),
        })
    }
}

/// Split an editor command line into program and arguments.
///
/// A value naming an existing file is the program as a whole, so paths
/// with spaces work. Otherwise it is split on whitespace:
/// `EDITOR="code --wait"` yields `("code", ["--wait"])`. Quoting is not
/// interpreted. Returns `None` for a blank command.
pub fn split_command(editor: &str) -> Option<(&str, Vec<&str>)> {
    let trimmed = editor.trim();
    if Path::new(trimmed).is_file() {
        return Some((trimmed, Vec::new()));
    }

    let mut words = trimmed.split_whitespace();
    let program = words.next()?;
    Some((program, words.collect()))
}
