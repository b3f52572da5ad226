use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::load_logs;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::{ExportFormat, csv, json, notify_export_success};
use std::fs;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export log entries (optionally for one project) to `file`.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        project: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        ensure_writable(path, force)?;

        let entries = load_logs(&pool.conn, project)?;

        match format {
            ExportFormat::Csv => {
                csv::write_csv(path, &entries).map_err(|e| AppError::Export(e.to_string()))?;
                notify_export_success("CSV", path, entries.len());
            }
            ExportFormat::Json => {
                json::write_json(path, &entries)?;
                notify_export_success("JSON", path, entries.len());
            }
        }

        ttlog_quiet(
            &pool.conn,
            "export",
            file,
            &format!("{} log entries exported as {}", entries.len(), format.as_str()),
        );

        Ok(entries.len())
    }
}
