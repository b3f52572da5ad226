use crate::config::Config;
use crate::db::log;
use crate::errors::AppResult;

use crate::cli::parser::Cli;
use crate::db::pool::DbPool;

/// Handle the `init` command
///
/// This initializes:
///  - the data directory (if missing)
///  - the configuration file (skipped with `--test`)
///  - the SQLite database and its schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rworklog…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    let pool = DbPool::open(&db_path)?;

    println!("✅ Database initialized at {}", &db_path);

    log::ttlog_quiet(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 rworklog initialization completed!");
    Ok(())
}
