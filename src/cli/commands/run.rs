use crate::cli::commands::project::edit_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkpoint::CheckpointLog;
use crate::core::session::{Action, Flow, Session, action_for_key, key_help};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, warning};
use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Handle the `run` command: the interactive stopwatch.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Run { project } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        let checkpoints = CheckpointLog::new(&cfg.checkpoint_file, cfg.checkpoint_interval_secs);
        let mut session = Session::new(&mut pool)?.with_checkpoints(checkpoints);

        if let Some(name) = project
            && !session.select(name)
        {
            warning(format!("'{}' is not an active project", name));
        }

        if session.projects().is_empty() {
            info("No active projects yet: press 'm' to create one.");
        }

        header("rworklog");
        println!("{}\n", key_help());

        let tick = Duration::from_millis(cfg.tick_millis.max(1));

        terminal::enable_raw_mode()?;
        let result = event_loop(&mut session, tick);
        terminal::disable_raw_mode()?;
        println!();

        result?;
    }

    Ok(())
}

fn key_to_action(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(c) => action_for_key(c),
        KeyCode::Down | KeyCode::Right => Some(Action::NextProject),
        KeyCode::Up | KeyCode::Left => Some(Action::PrevProject),
        KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Single-threaded loop: wait up to one tick for a key, dispatch it, then
/// tick and redraw.
fn event_loop(session: &mut Session, tick: Duration) -> AppResult<()> {
    let mut stdout = io::stdout();
    draw(&mut stdout, session)?;

    loop {
        if event::poll(tick)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = key_to_action(key)
        {
            match session.handle(action, Instant::now()) {
                Flow::Continue => {}
                Flow::Quit => return Ok(()),
                Flow::OpenEditor => {
                    terminal::disable_raw_mode()?;
                    println!();
                    {
                        let stdin = io::stdin();
                        edit_session(session.pool(), &mut stdin.lock())?;
                    }
                    session.refresh_projects()?;
                    println!("\n{}\n", key_help());
                    terminal::enable_raw_mode()?;
                }
            }
        }

        session.tick(Instant::now());
        draw(&mut stdout, session)?;
    }
}

fn draw<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(session.status_line())
    )?;
    out.flush()
}
