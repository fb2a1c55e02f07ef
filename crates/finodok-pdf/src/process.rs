//! Helpers for engines backed by an external executable
//!
//! Input and output go through a scratch directory rather than pipes, so a
//! large document cannot deadlock on a full stdout buffer.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tempfile::TempDir;

use crate::engine::{EngineError, EngineResult};

/// Check that an executable exists and answers `--version`
pub(crate) fn binary_responds(bin: &str) -> bool {
    Command::new(bin)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Run an executable to completion
pub(crate) fn run_tool(bin: &str, args: &[OsString]) -> EngineResult<()> {
    let output = Command::new(bin)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => EngineError::Unavailable(format!("{} not found", bin)),
            _ => EngineError::Io(e),
        })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr.trim();
    Err(EngineError::RenderFailed(if detail.is_empty() {
        format!("{} exited with {}", bin, output.status)
    } else {
        format!("{} exited with {}: {}", bin, output.status, detail)
    }))
}

/// Temporary directory holding one conversion's files
pub(crate) struct Scratch {
    dir: TempDir,
}

impl Scratch {
    pub(crate) fn new() -> EngineResult<Self> {
        Ok(Self {
            dir: tempfile::Builder::new().prefix("finodok-").tempdir()?,
        })
    }

    /// Write the HTML input and return its path
    pub(crate) fn write_html(&self, html: &str) -> EngineResult<PathBuf> {
        let path = self.dir.path().join("report.html");
        fs::write(&path, html)?;
        Ok(path)
    }

    /// Write a stylesheet and return its path
    pub(crate) fn write_css(&self, css: &str) -> EngineResult<PathBuf> {
        let path = self.dir.path().join("extra.css");
        fs::write(&path, css)?;
        Ok(path)
    }

    /// Path the engine should write its PDF to
    pub(crate) fn output_path(&self) -> PathBuf {
        self.dir.path().join("report.pdf")
    }

    /// Read back the produced PDF, rejecting empty or non-PDF output
    pub(crate) fn read_pdf(&self) -> EngineResult<Vec<u8>> {
        let bytes = fs::read(self.output_path()).map_err(|e| match e.kind() {
            ErrorKind::NotFound => EngineError::RenderFailed("no output file written".to_string()),
            _ => EngineError::Io(e),
        })?;

        if !bytes.starts_with(b"%PDF") {
            return Err(EngineError::RenderFailed(format!(
                "output is not a PDF ({} bytes)",
                bytes.len()
            )));
        }
        Ok(bytes)
    }
}
