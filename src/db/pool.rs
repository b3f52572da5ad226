//! SQLite connection wrapper (one connection per process).

use crate::db::initialize::init_db;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database file without touching the schema.
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))
            .map_err(|e| AppError::DbOpen(path.to_string(), e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open the database and make sure every table exists.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = Self::new(path)?;
        init_db(&pool.conn)?;
        Ok(pool)
    }

    /// In-memory database with the full schema (used by tests).
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        func(&mut self.conn)
    }
}
