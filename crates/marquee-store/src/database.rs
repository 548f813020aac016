//! Flat-file persistence gateway.
//!
//! The whole lineup lives in one UTF-8 text file, one record per line.
//! Every save replaces the full contents atomically: the new contents are
//! written to a temp file in the same directory, synced, renamed over the
//! target, and the directory is synced. The database file is never absent
//! or half-written, even if the process dies mid-save.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use marquee_error::{MarqueeError, Result};
use tracing::info;

use crate::lineup::Lineup;

/// Handle on the movie database file.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Point at a database file. Nothing is read until [`Database::load_lines`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing file into raw lines.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::DatabaseUnavailable`] when the file does not
    /// exist — callers treat that as "start with zero movies" after logging
    /// it, not as a fatal abort — and [`MarqueeError::Io`] for any other
    /// filesystem failure.
    pub fn load_lines(&self) -> Result<Vec<String>> {
        let contents = fs::read_to_string(&self.path).map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                MarqueeError::DatabaseUnavailable {
                    path: self.path.clone(),
                }
            } else {
                MarqueeError::Io(error)
            }
        })?;
        let lines: Vec<String> = contents.lines().map(str::to_owned).collect();
        info!(path = %self.path.display(), lines = lines.len(), "read movie database");
        Ok(lines)
    }

    /// Atomically replace the file contents with the lineup's records.
    ///
    /// Serializes every record, joins with newlines, and trims trailing
    /// blank lines. Temp write -> fsync temp -> rename -> fsync dir.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Io`] for filesystem failures.
    pub fn save(&self, lineup: &Lineup) -> Result<()> {
        let contents = lineup.serialize_lines().join("\n");
        let contents = contents.trim_end();

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0_u128, |d| d.as_nanos());
        let pid = std::process::id();
        let file_name = self.path.file_name().map_or_else(
            || "database".to_owned(),
            |name| name.to_string_lossy().into_owned(),
        );
        let tmp_path = dir.join(format!(".{file_name}.tmp.{pid}.{nanos}"));

        let mut temp = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)?;
        temp.write_all(contents.as_bytes())?;
        temp.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;
        let dir_handle = File::open(dir)?;
        dir_handle.sync_all()?;

        info!(
            path = %self.path.display(),
            movies = lineup.len(),
            "saved movie database"
        );
        Ok(())
    }
}
