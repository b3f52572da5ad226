use crate::errors::AppResult;
use crate::models::log_entry::{LogEntry, ProjectTotal};
use crate::models::project::Project;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_project(row: &Row) -> Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        // legacy rows may carry NULL here; NULL counts as active
        is_active: row.get::<_, Option<bool>>("is_active")?.unwrap_or(true),
    })
}

fn map_log_entry(row: &Row) -> Result<LogEntry> {
    Ok(LogEntry {
        project_id: row.get("project_id")?,
        project_name: row.get("name")?,
        used_time: row.get("used_time")?,
        created_at: row.get("created_at")?,
    })
}

/// All projects ordered by id; inactive ones only when requested.
pub fn load_projects(conn: &Connection, include_inactive: bool) -> AppResult<Vec<Project>> {
    let sql = if include_inactive {
        "SELECT id, name, is_active FROM projects ORDER BY id ASC"
    } else {
        "SELECT id, name, is_active FROM projects WHERE is_active = 1 ORDER BY id ASC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map_project)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Names offered by the stopwatch's project selector.
pub fn active_project_names(conn: &Connection) -> AppResult<Vec<String>> {
    Ok(load_projects(conn, false)?
        .into_iter()
        .map(|p| p.name)
        .collect())
}

/// Exact, case-sensitive lookup among active projects.
pub fn find_active_project_id(conn: &Connection, name: &str) -> AppResult<Option<i64>> {
    let mut stmt =
        conn.prepare_cached("SELECT id FROM projects WHERE name = ?1 AND is_active = 1")?;
    let id = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(id)
}

pub fn insert_log(conn: &Connection, project_id: i64, used_time: i64, created_at: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO logs (project_id, used_time, created_at) VALUES (?1, ?2, ?3)",
        params![project_id, used_time, created_at],
    )?;
    Ok(())
}

pub fn insert_project(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO projects (name, is_active) VALUES (?1, 1)",
        params![name],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn rename_project(conn: &Connection, id: i64, name: &str) -> Result<usize> {
    conn.execute(
        "UPDATE projects SET name = ?1 WHERE id = ?2",
        params![name, id],
    )
}

pub fn set_project_active(conn: &Connection, id: i64, active: bool) -> Result<usize> {
    conn.execute(
        "UPDATE projects SET is_active = ?1 WHERE id = ?2",
        params![active, id],
    )
}

/// Log rows referencing the project are left untouched.
pub fn delete_project(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM projects WHERE id = ?1", params![id])
}

/// Log entries, newest first, optionally restricted to one project name.
pub fn load_logs(conn: &Connection, project: Option<&str>) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT l.project_id, p.name, l.used_time, l.created_at
         FROM logs l
         LEFT JOIN projects p ON p.id = l.project_id
         WHERE ?1 IS NULL OR p.name = ?1
         ORDER BY l.created_at DESC, l.rowid DESC",
    )?;

    let rows = stmt.query_map([project], map_log_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Total logged seconds per project id.
pub fn project_totals(conn: &Connection) -> AppResult<Vec<ProjectTotal>> {
    let mut stmt = conn.prepare(
        "SELECT l.project_id, p.name, COUNT(*), COALESCE(SUM(l.used_time), 0)
         FROM logs l
         LEFT JOIN projects p ON p.id = l.project_id
         GROUP BY l.project_id
         ORDER BY l.project_id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ProjectTotal {
            project_id: row.get(0)?,
            project_name: row.get(1)?,
            entries: row.get(2)?,
            total_seconds: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_logs(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))
}

/// Log rows whose project no longer exists.
pub fn count_orphan_logs(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM logs l
         WHERE NOT EXISTS (SELECT 1 FROM projects p WHERE p.id = l.project_id)",
        [],
        |row| row.get(0),
    )
}
