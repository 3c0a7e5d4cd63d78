// file: src/executor.rs
// version: 3.0.0
// guid: bb371682-35cb-4f34-b318-8bf69ec125bd

//! Subprocess execution for the multiOTP binary

use crate::error::Result;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Terminal state of a finished subprocess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Build an output from an exit code and stdout
    pub fn new(code: i32, stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            code: Some(code),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Captured output rendered for diagnostics; stdout first, stderr when stdout is empty
    pub fn diagnostic(&self) -> String {
        let stdout = String::from_utf8_lossy(&self.stdout);
        if stdout.trim().is_empty() {
            String::from_utf8_lossy(&self.stderr).trim().to_string()
        } else {
            stdout.trim().to_string()
        }
    }
}

/// Trait for running the external binary
///
/// Spawn failures are errors; any exit code, zero or not, is a successful
/// run whose code the caller classifies.
pub trait CommandRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput> {
        (**self).run(program, args)
    }
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput> {
        debug!("Executing: {} {:?}", program.display(), args);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        };

        debug!(
            "{} exited with {:?} ({} bytes stdout)",
            program.display(),
            result.code,
            result.stdout.len()
        );

        Ok(result)
    }
}
