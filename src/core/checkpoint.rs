//! Plain-text checkpoint file written while the stopwatch runs.
//!
//! Line format: `<timestamp> => <HH:MM:SS> (<seconds> seconds)`.

use crate::errors::AppResult;
use crate::utils::time::format_hms;
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct CheckpointLog {
    path: PathBuf,
    interval_secs: u64,
    last_logged: u64,
}

pub fn format_line(at: DateTime<Local>, elapsed_secs: u64) -> String {
    format!(
        "{} => {} ({} seconds)\n",
        at.format("%Y-%m-%d %H:%M:%S%.6f"),
        format_hms(elapsed_secs),
        elapsed_secs
    )
}

impl CheckpointLog {
    /// `interval_secs == 0` disables checkpoints.
    pub fn new(path: impl Into<PathBuf>, interval_secs: u64) -> Self {
        Self {
            path: path.into(),
            interval_secs,
            last_logged: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_logged(&self) -> u64 {
        self.last_logged
    }

    /// Called on every tick. Appends a line once elapsed time has moved a
    /// full interval past the previous checkpoint; returns whether it wrote.
    pub fn observe(&mut self, elapsed_secs: u64, at: DateTime<Local>) -> AppResult<bool> {
        if self.interval_secs == 0 || elapsed_secs < self.last_logged + self.interval_secs {
            return Ok(false);
        }

        // marker moves even when the write below fails
        self.last_logged = elapsed_secs;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_line(at, elapsed_secs).as_bytes())?;
        Ok(true)
    }

    /// Forget the previous checkpoint (after a reset or a save).
    pub fn reset(&mut self) {
        self.last_logged = 0;
    }
}
