use crate::core::stopwatch::Stopwatch;
use crate::db::log::ttlog;
use crate::db::queries::{find_active_project_id, insert_log};
use crate::utils::time::db_timestamp;
use chrono::Local;
use rusqlite::Connection;
use std::time::Instant;

/// What a save action did. The stopwatch is reset in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Logged { project_id: i64, seconds: u64 },
    /// Less than one whole second elapsed.
    Empty,
    /// No active project carries the selected name.
    UnknownProject,
    /// The insert (or the lookup) failed; nothing was written.
    Failed(String),
}

/// High-level business logic for the save action.
pub struct SaveLogic;

impl SaveLogic {
    pub fn save(conn: &Connection, stopwatch: &mut Stopwatch, project_name: &str) -> SaveOutcome {
        Self::save_at(conn, stopwatch, project_name, Instant::now())
    }

    pub fn save_at(
        conn: &Connection,
        stopwatch: &mut Stopwatch,
        project_name: &str,
        now: Instant,
    ) -> SaveOutcome {
        stopwatch.tick_at(now);
        let outcome = Self::write(conn, stopwatch.elapsed_secs(), project_name);
        stopwatch.reset_at(now);

        // audit rows are best effort
        let _ = match &outcome {
            SaveOutcome::Logged { seconds, .. } => {
                ttlog(conn, "save", project_name, &format!("{} seconds", seconds))
            }
            SaveOutcome::Failed(reason) => ttlog(conn, "save_failed", project_name, reason),
            _ => Ok(()),
        };

        outcome
    }

    fn write(conn: &Connection, seconds: u64, project_name: &str) -> SaveOutcome {
        let project_id = match find_active_project_id(conn, project_name) {
            Ok(Some(id)) => id,
            Ok(None) => return SaveOutcome::UnknownProject,
            Err(e) => return SaveOutcome::Failed(e.to_string()),
        };

        if seconds == 0 {
            return SaveOutcome::Empty;
        }

        let created_at = db_timestamp(Local::now());
        match insert_log(conn, project_id, seconds as i64, &created_at) {
            Ok(()) => SaveOutcome::Logged {
                project_id,
                seconds,
            },
            Err(e) => SaveOutcome::Failed(e.to_string()),
        }
    }
}
