use crate::db::pool::DbPool;
use crate::db::queries::{count_logs, count_orphan_logs};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::format_hms;
use rusqlite::{Connection, OptionalExtension};
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) PROJECTS
    //
    let (total, active): (i64, i64) = pool.conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(CASE WHEN is_active = 1 THEN 1 ELSE 0 END), 0) FROM projects",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    println!(
        "{}• Projects:{} {}{}{} ({} active)",
        CYAN, RESET, GREEN, total, RESET, active
    );

    //
    // 3) LOG ENTRIES
    //
    let count = count_logs(&pool.conn)?;
    let seconds: i64 = pool.conn.query_row(
        "SELECT COALESCE(SUM(used_time), 0) FROM logs",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Log entries:{} {}{}{} ({} tracked)",
        CYAN,
        RESET,
        GREEN,
        count,
        RESET,
        format_hms(seconds.max(0) as u64)
    );

    //
    // 4) DATE RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(created_at), MAX(created_at) FROM logs",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}

const REQUIRED_TABLES: &[&str] = &["log", "projects", "logs"];

/// Result of `db --check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub integrity: String,
    pub missing_tables: Vec<&'static str>,
    /// Log rows pointing at deleted projects.
    pub orphan_logs: i64,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.integrity == "ok" && self.missing_tables.is_empty()
    }
}

pub fn check_health(conn: &Connection) -> rusqlite::Result<HealthReport> {
    let integrity: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    let mut missing_tables = Vec::new();
    for table in REQUIRED_TABLES {
        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_none() {
            missing_tables.push(*table);
        }
    }

    let orphan_logs = if missing_tables.contains(&"projects") || missing_tables.contains(&"logs") {
        0
    } else {
        count_orphan_logs(conn)?
    };

    Ok(HealthReport {
        integrity,
        missing_tables,
        orphan_logs,
    })
}
