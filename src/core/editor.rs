//! Project editor with manual submit / revert.
//!
//! The editor keeps a working copy of the `projects` table. Edits only touch
//! the working copy; `submit` writes every difference inside one transaction
//! and `revert` throws the working copy away.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_project, insert_project, load_projects, rename_project, set_project_active,
};
use crate::errors::{AppError, AppResult};
use crate::models::project::Project;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Unchanged,
    New,
    Modified,
    Removed,
}

impl RowState {
    pub fn marker(&self) -> &'static str {
        match self {
            RowState::Unchanged => "",
            RowState::New => "+",
            RowState::Modified => "*",
            RowState::Removed => "-",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorRow {
    pub id: Option<i64>,
    pub name: String,
    pub is_active: bool,
    original: Option<Project>,
    removed: bool,
}

impl EditorRow {
    fn saved(p: Project) -> Self {
        Self {
            id: Some(p.id),
            name: p.name.clone(),
            is_active: p.is_active,
            original: Some(p),
            removed: false,
        }
    }

    pub fn state(&self) -> RowState {
        match &self.original {
            _ if self.removed => RowState::Removed,
            None => RowState::New,
            Some(p) if p.name != self.name || p.is_active != self.is_active => RowState::Modified,
            Some(_) => RowState::Unchanged,
        }
    }
}

pub struct ProjectEditor {
    committed: Vec<Project>,
    rows: Vec<EditorRow>,
}

impl ProjectEditor {
    /// Read path: every project ordered by id, active or not.
    pub fn load(conn: &Connection) -> AppResult<Self> {
        let committed = load_projects(conn, true)?;
        let rows = committed.iter().cloned().map(EditorRow::saved).collect();
        Ok(Self { committed, rows })
    }

    pub fn rows(&self) -> &[EditorRow] {
        &self.rows
    }

    pub fn committed(&self) -> &[Project] {
        &self.committed
    }

    pub fn has_pending(&self) -> bool {
        self.rows.iter().any(|r| r.state() != RowState::Unchanged)
    }

    pub fn pending_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.state() != RowState::Unchanged)
            .count()
    }

    /// Row index (0-based) of a saved project.
    pub fn row_of(&self, id: i64) -> AppResult<usize> {
        self.rows
            .iter()
            .position(|r| r.id == Some(id))
            .ok_or(AppError::ProjectNotFound(id))
    }

    fn row_mut(&mut self, row: usize) -> AppResult<&mut EditorRow> {
        match self.rows.get_mut(row) {
            Some(r) if !r.removed => Ok(r),
            _ => Err(AppError::InvalidRow(row + 1)),
        }
    }

    /// Append a pending project; it becomes active on submit. Returns its row.
    pub fn insert(&mut self, name: &str) -> usize {
        self.rows.push(EditorRow {
            id: None,
            name: name.to_string(),
            is_active: true,
            original: None,
            removed: false,
        });
        self.rows.len() - 1
    }

    pub fn rename(&mut self, row: usize, name: &str) -> AppResult<()> {
        self.row_mut(row)?.name = name.to_string();
        Ok(())
    }

    pub fn set_active(&mut self, row: usize, active: bool) -> AppResult<()> {
        self.row_mut(row)?.is_active = active;
        Ok(())
    }

    /// Pending rows disappear at once; saved rows are marked for deletion.
    pub fn remove(&mut self, row: usize) -> AppResult<()> {
        if self.row_mut(row)?.original.is_none() {
            self.rows.remove(row);
        } else {
            self.rows[row].removed = true;
        }
        Ok(())
    }

    /// Discard every pending edit.
    pub fn revert(&mut self) {
        self.rows = self.committed.iter().cloned().map(EditorRow::saved).collect();
    }

    /// Write path: apply all pending edits atomically.
    ///
    /// On failure the transaction is rolled back, the pending edits stay in
    /// place and the store's error text is returned in `AppError::Submit`.
    pub fn submit(&mut self, pool: &mut DbPool) -> AppResult<usize> {
        if !self.has_pending() {
            return Ok(0);
        }

        let rows = &self.rows;
        let applied = pool.with_conn(|conn| {
            let tx = conn.transaction()?;
            match apply_rows(&tx, rows) {
                Ok(n) => {
                    tx.commit()?;
                    Ok(n)
                }
                Err(e) => {
                    tx.rollback()?;
                    Err(AppError::Submit(e.to_string()))
                }
            }
        })?;

        let _ = ttlog(
            &pool.conn,
            "projects",
            "submit",
            &format!("{} project change(s) committed", applied),
        );

        *self = Self::load(&pool.conn)?;
        Ok(applied)
    }
}

/// Deletes first, then updates, then inserts, so a name freed by a removed
/// or renamed row can be reused in the same submit.
fn apply_rows(conn: &Connection, rows: &[EditorRow]) -> rusqlite::Result<usize> {
    let mut applied = 0;

    for r in rows.iter().filter(|r| r.state() == RowState::Removed) {
        if let Some(id) = r.id {
            delete_project(conn, id)?;
            applied += 1;
        }
    }

    for r in rows.iter().filter(|r| r.state() == RowState::Modified) {
        if let (Some(id), Some(orig)) = (r.id, &r.original) {
            if orig.name != r.name {
                rename_project(conn, id, &r.name)?;
            }
            if orig.is_active != r.is_active {
                set_project_active(conn, id, r.is_active)?;
            }
            applied += 1;
        }
    }

    for r in rows.iter().filter(|r| r.state() == RowState::New) {
        let id = insert_project(conn, &r.name)?;
        if !r.is_active {
            set_project_active(conn, id, false)?;
        }
        applied += 1;
    }

    Ok(applied)
}
