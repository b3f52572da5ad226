use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// ANSI colour for each internal log operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "save" => Colour::Green,
        "save_failed" => Colour::Red,
        "projects" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::open(&cfg.database)?;
        print_log(&pool)?;
    }

    Ok(())
}

fn print_log(pool: &DbPool) -> AppResult<()> {
    let mut stmt = pool
        .conn
        .prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        let raw_date: String = row.get(1)?;
        let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
            .map(|dt| dt.format("%F %T").to_string())
            .unwrap_or(raw_date);

        Ok((
            row.get::<_, i64>(0)?,
            date,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }

    println!("📜 Internal log:\n");

    let id_w = entries
        .iter()
        .map(|(id, ..)| id.to_string().len())
        .max()
        .unwrap_or(1);
    let op_w = entries
        .iter()
        .map(|(_, _, op, target, _)| op.len() + target.len() + 3)
        .max()
        .unwrap_or(10)
        .min(60);

    for (id, date, operation, target, message) in entries {
        let plain = if target.is_empty() {
            operation.clone()
        } else {
            format!("{operation} ({target})")
        };
        let padding = " ".repeat(op_w.saturating_sub(plain.len()));
        let coloured = plain.replacen(
            &operation,
            &color_for_operation(&operation).paint(operation.as_str()).to_string(),
            1,
        );

        println!(
            "{:>id_w$}: {} | {}{} => {}",
            id,
            date,
            coloured,
            padding,
            message,
            id_w = id_w
        );
    }

    Ok(())
}
