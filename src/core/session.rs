//! Interactive session: the stopwatch, the project selector and the flat
//! key → action table, independent of any terminal.

use crate::core::checkpoint::CheckpointLog;
use crate::core::save::{SaveLogic, SaveOutcome};
use crate::core::stopwatch::Stopwatch;
use crate::db::pool::DbPool;
use crate::db::queries::active_project_names;
use crate::errors::AppResult;
use chrono::Local;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartStop,
    Reset,
    Save,
    NextProject,
    PrevProject,
    ManageProjects,
    Quit,
}

/// Key bindings with their help text.
pub const KEYMAP: &[(char, Action, &str)] = &[
    (' ', Action::StartStop, "start/stop"),
    ('r', Action::Reset, "reset"),
    ('s', Action::Save, "save"),
    ('n', Action::NextProject, "next project"),
    ('p', Action::PrevProject, "previous project"),
    ('m', Action::ManageProjects, "manage projects"),
    ('q', Action::Quit, "quit"),
];

pub fn action_for_key(key: char) -> Option<Action> {
    let key = key.to_ascii_lowercase();
    KEYMAP
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, action, _)| *action)
}

/// `space start/stop · r reset · ...`
pub fn key_help() -> String {
    KEYMAP
        .iter()
        .map(|(k, _, label)| match k {
            ' ' => format!("space {}", label),
            other => format!("{} {}", other, label),
        })
        .collect::<Vec<_>>()
        .join(" · ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    OpenEditor,
    Quit,
}

pub struct Session<'a> {
    pool: &'a mut DbPool,
    stopwatch: Stopwatch,
    projects: Vec<String>,
    selected: usize,
    checkpoints: Option<CheckpointLog>,
    last_message: Option<String>,
}

impl<'a> Session<'a> {
    pub fn new(pool: &'a mut DbPool) -> AppResult<Self> {
        let projects = active_project_names(&pool.conn)?;
        Ok(Self {
            pool,
            stopwatch: Stopwatch::new(),
            projects,
            selected: 0,
            checkpoints: None,
            last_message: None,
        })
    }

    pub fn with_checkpoints(mut self, log: CheckpointLog) -> Self {
        self.checkpoints = Some(log);
        self
    }

    pub fn pool(&mut self) -> &mut DbPool {
        &mut *self.pool
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn selected_project(&self) -> Option<&str> {
        self.projects.get(self.selected).map(String::as_str)
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Select a project by exact name. Returns false when it is not listed.
    pub fn select(&mut self, name: &str) -> bool {
        match self.projects.iter().position(|p| p == name) {
            Some(i) => {
                self.selected = i;
                true
            }
            None => false,
        }
    }

    /// Reload active project names; the selection survives when still listed.
    pub fn refresh_projects(&mut self) -> AppResult<()> {
        let previous = self.selected_project().map(str::to_string);
        self.projects = active_project_names(&self.pool.conn)?;
        self.selected = 0;
        if let Some(name) = previous {
            self.select(&name);
        }
        Ok(())
    }

    /// Periodic tick. Never blocks beyond one checkpoint append.
    pub fn tick(&mut self, now: Instant) {
        if !self.stopwatch.is_running() {
            return;
        }
        let secs = self.stopwatch.tick_at(now).as_secs();
        if let Some(log) = self.checkpoints.as_mut() {
            // the checkpoint file is best effort
            let _ = log.observe(secs, Local::now());
        }
    }

    pub fn handle(&mut self, action: Action, now: Instant) -> Flow {
        match action {
            Action::StartStop => {
                self.stopwatch.toggle_at(now);
                self.stopwatch.tick_at(now);
                self.last_message = None;
            }
            Action::Reset => {
                self.stopwatch.reset_at(now);
                self.reset_checkpoints();
                self.last_message = Some("reset".into());
            }
            Action::Save => {
                let name = self.selected_project().unwrap_or("").to_string();
                let outcome = SaveLogic::save_at(&self.pool.conn, &mut self.stopwatch, &name, now);
                self.reset_checkpoints();
                self.last_message = Some(describe_outcome(&outcome, &name));
            }
            Action::NextProject => {
                if !self.projects.is_empty() {
                    self.selected = (self.selected + 1) % self.projects.len();
                }
            }
            Action::PrevProject => {
                if !self.projects.is_empty() {
                    self.selected = (self.selected + self.projects.len() - 1) % self.projects.len();
                }
            }
            Action::ManageProjects => return Flow::OpenEditor,
            Action::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn reset_checkpoints(&mut self) {
        if let Some(log) = self.checkpoints.as_mut() {
            log.reset();
        }
    }

    /// `▶ 00:12:41  Website  (saved 761s)`
    pub fn status_line(&self) -> String {
        let icon = if self.stopwatch.is_running() { "▶" } else { "■" };
        let project = self.selected_project().unwrap_or("<no active project>");
        let mut line = format!("{} {}  {}", icon, self.stopwatch.display(), project);
        if let Some(msg) = &self.last_message {
            line.push_str(&format!("  ({})", msg));
        }
        line
    }
}

fn describe_outcome(outcome: &SaveOutcome, name: &str) -> String {
    match outcome {
        SaveOutcome::Logged { seconds, .. } => format!("saved {}s to {}", seconds, name),
        SaveOutcome::Empty => "nothing to save".into(),
        SaveOutcome::UnknownProject => "no active project selected".into(),
        // insert failures are not reported beyond the internal log
        SaveOutcome::Failed(_) => "reset".into(),
    }
}
