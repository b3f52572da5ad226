use crate::cli::parser::{Commands, ProjectCommand};
use crate::config::Config;
use crate::core::editor::ProjectEditor;
use crate::db::pool::DbPool;
use crate::db::queries::load_projects;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, error, header, info, read_line, success, warning};
use crate::utils::table::Table;
use std::io::{self, BufRead};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Project { action } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        match action {
            ProjectCommand::List { all } => print_projects(&pool, *all)?,

            ProjectCommand::Add { names } => {
                let mut editor = ProjectEditor::load(&pool.conn)?;
                for name in names {
                    editor.insert(name);
                }
                submit(&mut editor, &mut pool)?;
            }

            ProjectCommand::Rename { id, name } => {
                let mut editor = ProjectEditor::load(&pool.conn)?;
                let row = editor.row_of(*id)?;
                editor.rename(row, name)?;
                submit(&mut editor, &mut pool)?;
            }

            ProjectCommand::Activate { ids } => set_active(&mut pool, ids, true)?,
            ProjectCommand::Deactivate { ids } => set_active(&mut pool, ids, false)?,

            ProjectCommand::Del { ids, yes } => {
                let ids = unique_ids(ids);
                let mut editor = ProjectEditor::load(&pool.conn)?;
                for id in &ids {
                    let row = editor.row_of(*id)?;
                    editor.remove(row)?;
                }

                let prompt = format!(
                    "Delete {} project(s)? Their log entries are kept.",
                    ids.len()
                );
                if !*yes && !confirm(prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }
                submit(&mut editor, &mut pool)?;
            }

            ProjectCommand::Edit => {
                let stdin = io::stdin();
                edit_session(&mut pool, &mut stdin.lock())?;
            }
        }
    }

    Ok(())
}

/// Drop repeated ids, keeping the first occurrence.
fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut out: Vec<i64> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}

fn set_active(pool: &mut DbPool, ids: &[i64], active: bool) -> AppResult<()> {
    let mut editor = ProjectEditor::load(&pool.conn)?;
    for id in &unique_ids(ids) {
        let row = editor.row_of(*id)?;
        editor.set_active(row, active)?;
    }
    submit(&mut editor, pool)
}

fn submit(editor: &mut ProjectEditor, pool: &mut DbPool) -> AppResult<()> {
    let applied = editor.submit(pool)?;
    if applied == 0 {
        info("Nothing to change.");
    } else {
        success(format!("{} project change(s) saved.", applied));
    }
    Ok(())
}

fn print_projects(pool: &DbPool, all: bool) -> AppResult<()> {
    let projects = load_projects(&pool.conn, all)?;

    if projects.is_empty() {
        info("No projects. Create one with `rworklog project add <NAME>`.");
        return Ok(());
    }

    let mut table = Table::new(&["PID", "Project", "Active"]);
    for p in &projects {
        table.add_row(vec![
            p.id.to_string(),
            p.name.clone(),
            p.status_label().to_string(),
        ]);
    }

    header("Projects");
    print!("{}", table.render());
    Ok(())
}

fn print_editor(editor: &ProjectEditor) {
    let mut table = Table::new(&["Row", "PID", "Project", "Active", ""]);
    for (i, r) in editor.rows().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            r.id.map(|id| id.to_string()).unwrap_or_default(),
            r.name.clone(),
            if r.is_active { "yes" } else { "no" }.to_string(),
            r.state().marker().to_string(),
        ]);
    }
    print!("{}", table.render());

    if editor.has_pending() {
        println!("{} pending change(s), `submit` or `revert`", editor.pending_count());
    }
}

const EDITOR_HELP: &str = "\
  list                    show projects (+ new, * modified, - removed)
  new <name>              add a project
  rename <row> <name>     rename a project
  active <row> on|off     (de)activate a project
  del <row>               delete a project
  submit                  save all pending changes at once
  revert                  discard all pending changes
  close                   leave the editor (pending changes are dropped)";

/// Rows are shown 1-based.
fn parse_row(arg: Option<&str>) -> AppResult<usize> {
    arg.and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map(|n| n - 1)
        .ok_or_else(|| AppError::Other("expected a row number".into()))
}

/// Run one editor command line. Returns `false` when the editor should close.
fn apply_command(editor: &mut ProjectEditor, pool: &mut DbPool, line: &str) -> AppResult<bool> {
    let line = line.trim();
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match cmd {
        "" => {}
        "list" | "l" => print_editor(editor),
        "new" | "n" => {
            if rest.is_empty() {
                warning("`new` needs a name");
            } else {
                editor.insert(rest);
                print_editor(editor);
            }
        }
        "rename" | "r" => {
            let (row, name) = rest.split_once(' ').unwrap_or((rest, ""));
            editor.rename(parse_row(Some(row))?, name.trim())?;
            print_editor(editor);
        }
        "active" | "a" => {
            let mut parts = rest.split_whitespace();
            let row = parse_row(parts.next())?;
            let active = match parts.next() {
                Some("on" | "yes" | "1" | "true") => true,
                Some("off" | "no" | "0" | "false") => false,
                _ => return Err(AppError::Other("expected on|off".into())),
            };
            editor.set_active(row, active)?;
            print_editor(editor);
        }
        "del" | "d" => {
            editor.remove(parse_row(Some(rest))?)?;
            print_editor(editor);
        }
        "submit" | "s" => {
            submit(editor, pool)?;
            print_editor(editor);
        }
        "revert" => {
            editor.revert();
            info("Pending changes discarded.");
            print_editor(editor);
        }
        "close" | "quit" | "q" => return Ok(false),
        "help" | "?" => println!("{}", EDITOR_HELP),
        other => warning(format!("Unknown command '{}', try `help`", other)),
    }

    Ok(true)
}

/// Line-based project editor. Ends on `close` or end of input.
pub fn edit_session<R: BufRead>(pool: &mut DbPool, input: &mut R) -> AppResult<()> {
    let mut editor = ProjectEditor::load(&pool.conn)?;

    header("Project editor");
    println!("{}\n", EDITOR_HELP);
    print_editor(&editor);

    while let Some(line) = read_line(input, "projects> ")? {
        match apply_command(&mut editor, pool, &line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => error(e),
        }
    }

    if editor.has_pending() {
        warning(format!(
            "{} pending change(s) discarded.",
            editor.pending_count()
        ));
    }

    Ok(())
}
