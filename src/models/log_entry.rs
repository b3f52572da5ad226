use crate::utils::time::format_hms;
use serde::Serialize;

/// One row of the `logs` table, joined with the project name when the
/// project still exists.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub project_id: i64,
    pub project_name: Option<String>,
    pub used_time: i64,
    pub created_at: String,
}

impl LogEntry {
    /// Project name, or `#<id>` for rows whose project was deleted.
    pub fn project_label(&self) -> String {
        match &self.project_name {
            Some(name) => name.clone(),
            None => format!("#{}", self.project_id),
        }
    }

    pub fn duration_hms(&self) -> String {
        format_hms(self.used_time.max(0) as u64)
    }
}

/// Aggregated time for one project (`list --summary`).
#[derive(Debug, Clone, Serialize)]
pub struct ProjectTotal {
    pub project_id: i64,
    pub project_name: Option<String>,
    pub entries: i64,
    pub total_seconds: i64,
}
