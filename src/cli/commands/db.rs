use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats::{self, HealthReport};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        // plain open: `--check` must see the schema as it is on disk
        let mut pool = DbPool::new(&cfg.database)?;

        if *migrate {
            println!("{}▶ Bringing the schema up to date…{}", CYAN, RESET);
            run_pending_migrations(&pool.conn)?;
            ttlog_quiet(&pool.conn, "migrate", &cfg.database, "Schema up to date");
            println!("{}✔ projects, logs and log tables ready.{}\n", GREEN, RESET);
        }

        if *info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        if *check {
            println!("{}▶ Checking the time log…{}", CYAN, RESET);
            let report = stats::check_health(&pool.conn)?;
            print_health(&report);
        }

        if *vacuum {
            let before = file_size(&cfg.database);
            pool.conn.execute_batch("VACUUM;")?;
            let after = file_size(&cfg.database);
            println!(
                "{}✔ Vacuum completed:{} {:.1} KB → {:.1} KB\n",
                GREEN,
                RESET,
                before as f64 / 1024.0,
                after as f64 / 1024.0
            );
        }
    }

    Ok(())
}

fn print_health(report: &HealthReport) {
    if report.integrity == "ok" {
        println!("{}✔ Integrity check passed.{}", GREEN, RESET);
    } else {
        println!("{}✘ Integrity check failed:{} {}", RED, RESET, report.integrity);
    }

    if report.missing_tables.is_empty() {
        println!("{}✔ Schema complete.{}", GREEN, RESET);
    } else {
        println!(
            "{}✘ Missing tables:{} {} {}(run `rworklog db --migrate`){}",
            RED,
            RESET,
            report.missing_tables.join(", "),
            GREY,
            RESET
        );
    }

    if report.orphan_logs > 0 {
        println!(
            "{}• {} log entries belong to deleted projects (kept).{}",
            YELLOW, report.orphan_logs, RESET
        );
    }
    println!();
}

fn file_size(path: &str) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
