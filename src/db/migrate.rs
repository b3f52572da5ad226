use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the internal `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `projects` table.
fn create_projects_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id        INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            name      VARCHAR(50) UNIQUE NOT NULL CHECK(name != ''),
            is_active BOOLEAN DEFAULT 1
        );
        "#,
    )?;
    Ok(())
}

/// Create the append-only `logs` table and its indexes.
fn create_logs_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS logs (
            project_id INTEGER,
            used_time  INTEGER,
            created_at DATETIME
        );

        CREATE INDEX IF NOT EXISTS idx_project_id ON logs(project_id);
        CREATE INDEX IF NOT EXISTS idx_created_at ON logs(created_at);
        CREATE INDEX IF NOT EXISTS idx_project_id_created_at ON logs(project_id, created_at);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Older project tables were created without the `is_active` flag.
fn migrate_add_is_active_column(conn: &Connection) -> Result<(), Error> {
    let version = "20261017_0001_add_is_active_flag";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !table_has_column(conn, "projects", "is_active")? {
        warning("Adding 'is_active' column to projects table...");

        conn.execute(
            "ALTER TABLE projects ADD COLUMN is_active BOOLEAN DEFAULT 1;",
            [],
        )
        .map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add 'is_active' column: {}", e)),
            )
        })?;

        success(format!(
            "Migration applied: {} → added 'is_active' to projects table",
            version
        ));
    }

    mark_applied(conn, version, "Projects carry an is_active flag")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by `db::initialize::init_db` on every open.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if table_exists(conn, "projects")? {
        migrate_add_is_active_column(conn)?;
    } else {
        create_projects_table(conn)?;
        mark_applied(
            conn,
            "20261017_0001_add_is_active_flag",
            "Created projects table",
        )?;
    }

    create_logs_table(conn)?;

    Ok(())
}
