use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{load_logs, project_totals};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;
use crate::utils::time::format_hms;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { project, summary } = cmd {
        let pool = DbPool::open(&cfg.database)?;

        if *summary {
            print_summary(&pool)?;
        } else {
            print_entries(&pool, project.as_deref())?;
        }
    }
    Ok(())
}

fn print_entries(pool: &DbPool, project: Option<&str>) -> AppResult<()> {
    let entries = load_logs(&pool.conn, project)?;

    if entries.is_empty() {
        info("No log entries.");
        return Ok(());
    }

    let mut table = Table::new(&["Created at", "Project", "Duration", "Seconds"]);
    let mut total = 0i64;
    for e in &entries {
        total += e.used_time;
        table.add_row(vec![
            e.created_at.clone(),
            e.project_label(),
            e.duration_hms(),
            e.used_time.to_string(),
        ]);
    }

    header("Log entries");
    print!("{}", table.render());
    println!(
        "\n{} entries, {} total",
        entries.len(),
        format_hms(total.max(0) as u64)
    );
    Ok(())
}

fn print_summary(pool: &DbPool) -> AppResult<()> {
    let totals = project_totals(&pool.conn)?;

    if totals.is_empty() {
        info("No log entries.");
        return Ok(());
    }

    let mut table = Table::new(&["PID", "Project", "Entries", "Total"]);
    for t in &totals {
        table.add_row(vec![
            t.project_id.to_string(),
            t.project_name
                .clone()
                .unwrap_or_else(|| format!("#{}", t.project_id)),
            t.entries.to_string(),
            format_hms(t.total_seconds.max(0) as u64),
        ]);
    }

    header("Time per project");
    print!("{}", table.render());
    Ok(())
}
