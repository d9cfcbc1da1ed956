//! File-based data source.
//!
//! Polls a JSON snapshot bundle on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{DataSource, SourceError, StatusSnapshot};

/// A data source that reads status snapshots from a JSON file.
///
/// The file holds one [`StatusSnapshot`] bundle, for example one written by
/// a cron job mirroring the status API, or a fixture for offline use.
///
/// The source tracks the file's modification time and only returns
/// new data when the file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    force_reload: bool,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
            force_reload: false,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file's modification time.
    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&self) -> Result<StatusSnapshot, SourceError> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<StatusSnapshot> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, keep the last snapshot
            (Some(last), Some(current)) => current > last,
        };

        if !(file_changed || self.force_reload) {
            return None;
        }
        self.force_reload = false;

        match self.read_file() {
            Ok(snapshot) => {
                self.last_error = None;
                self.last_modified = current_modified;
                Some(snapshot)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "snapshot file unreadable");
                self.last_error = Some(e.to_string());
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn request_refresh(&mut self) {
        self.force_reload = true;
    }
}
