//! Report producers: the `system_profiler` process, a saved file, stdin, or text.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::PathBuf;
use std::process::Command;

use crate::config::ProfilerSettings;
use crate::error::{Result, SptError};

/// A configured `system_profiler` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilerCommand {
    pub binary: String,
    pub args: Vec<String>,
    /// Skip the run (empty report) when not on macOS.
    pub require_macos: bool,
}

impl ProfilerCommand {
    /// Build `system_profiler [types...] -detailLevel <level>` from settings.
    #[must_use]
    pub fn from_settings(settings: &ProfilerSettings) -> Self {
        let mut args = settings.data_types.clone();
        args.push("-detailLevel".into());
        args.push(settings.detail_level.clone());
        Self {
            binary: settings.binary.clone(),
            args,
            require_macos: settings.require_macos,
        }
    }

    /// Run the command and return its stdout.
    ///
    /// Off macOS (when gated) this returns an empty report without spawning.
    pub fn run(&self) -> Result<Vec<u8>> {
        if self.require_macos && !is_macos() {
            tracing::debug!(os = std::env::consts::OS, "not on macOS, skipping system_profiler");
            return Ok(Vec::new());
        }

        tracing::debug!(binary = %self.binary, args = ?self.args, "running system_profiler");
        let output = Command::new(&self.binary)
            .args(&self.args)
            .output()
            .map_err(|e| SptError::Command {
                program: self.binary.clone(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SptError::Command {
                program: self.binary.clone(),
                detail: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        tracing::debug!(bytes = output.stdout.len(), "system_profiler finished");
        Ok(output.stdout)
    }
}

/// Whether this build targets macOS.
#[must_use]
pub fn is_macos() -> bool {
    cfg!(target_os = "macos")
}

/// Where a report is read from.
#[derive(Debug, Clone)]
pub enum ReportSource {
    Command(ProfilerCommand),
    File(PathBuf),
    Stdin,
    Text(String),
}

impl ReportSource {
    /// Resolve a CLI-style input: none runs the profiler, `-` is stdin, anything
    /// else is a file path.
    #[must_use]
    pub fn from_input(input: Option<&str>, settings: &ProfilerSettings) -> Self {
        match input {
            None => Self::Command(ProfilerCommand::from_settings(settings)),
            Some("-") => Self::Stdin,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }

    /// Short description stored with snapshots.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Command(_) => "system_profiler".into(),
            Self::File(path) => path.to_string_lossy().replace('\\', "/"),
            Self::Stdin => "stdin".into(),
            Self::Text(_) => "text".into(),
        }
    }

    /// Open the report for line-by-line reading.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        Ok(match self {
            Self::Command(cmd) => Box::new(Cursor::new(cmd.run()?)),
            Self::File(path) => Box::new(BufReader::new(File::open(path)?)),
            Self::Stdin => Box::new(io::stdin().lock()),
            Self::Text(text) => Box::new(Cursor::new(text.clone().into_bytes())),
        })
    }

    /// Read the whole report into memory.
    pub fn read_all(&self) -> Result<Vec<u8>> {
        match self {
            Self::Command(cmd) => cmd.run(),
            Self::File(path) => Ok(std::fs::read(path)?),
            Self::Stdin => {
                let mut buf = Vec::new();
                io::stdin().lock().read_to_end(&mut buf)?;
                Ok(buf)
            }
            Self::Text(text) => Ok(text.as_bytes().to_vec()),
        }
    }
}
