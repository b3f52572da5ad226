use crate::errors::{AppError, AppResult};
use crate::models::log_entry::LogEntry;
use std::path::Path;

/// Write log entries as pretty-printed JSON.
pub fn write_json(path: &Path, entries: &[LogEntry]) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(entries).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
