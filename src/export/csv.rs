use crate::models::log_entry::LogEntry;
use csv::Writer;
use std::path::Path;

/// Write log entries as CSV.
pub fn write_csv(path: &Path, entries: &[LogEntry]) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["project_id", "project", "used_time", "duration", "created_at"])?;

    for e in entries {
        wtr.write_record(&[
            e.project_id.to_string(),
            e.project_label(),
            e.used_time.to_string(),
            e.duration_hms(),
            e.created_at.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
