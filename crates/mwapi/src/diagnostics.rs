//! Diagnostics sink for raw API failure payloads.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use mwapi_core::{ApiError, Payload};

/// Default directory for diagnostics files.
pub const DEFAULT_DIAGNOSTICS_DIR: &str = "logs";

const SINK_NAME: &str = "APIError";

/// Persists the raw payload of the most recent API failure.
///
/// JSON payloads go to `<dir>/APIError.json`, undecodable bodies to
/// `<dir>/APIError.txt`. Each report overwrites the previous one at the
/// same sink. Writing is best effort: a failure is logged and dropped so
/// the error being reported always reaches the caller unchanged.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    dir: Option<PathBuf>,
}

impl ErrorReporter {
    /// Create a reporter writing into `dir`, created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Create a reporter that records nothing.
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    /// Returns the diagnostics directory, if enabled.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Returns the sink used for JSON payloads.
    pub fn json_path(&self) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|d| d.join(format!("{}.json", SINK_NAME)))
    }

    /// Returns the sink used for opaque payloads.
    pub fn text_path(&self) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.join(format!("{}.txt", SINK_NAME)))
    }

    /// Record the payload of an API error, if it carries one.
    pub fn report(&self, error: &ApiError) {
        if let Some(payload) = error.payload() {
            self.record(payload);
        }
    }

    /// Record a payload.
    pub fn record(&self, payload: &Payload) {
        if self.dir.is_none() || payload.is_empty() {
            return;
        }

        match self.write(payload) {
            Ok(path) => debug!(path = %path.display(), "API diagnostics written"),
            Err(e) => warn!(error = %e, "failed to write API diagnostics"),
        }
    }

    fn write(&self, payload: &Payload) -> io::Result<PathBuf> {
        let (path, contents) = match payload {
            Payload::Json(value) => (self.json_path(), serde_json::to_vec(value)?),
            Payload::Raw(bytes) => (
                self.text_path(),
                String::from_utf8_lossy(bytes).into_owned().into_bytes(),
            ),
        };
        let path = path.ok_or_else(|| io::Error::other("diagnostics disabled"))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGNOSTICS_DIR)
    }
}
