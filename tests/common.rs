#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rworklog::db::pool::DbPool;
use rworklog::db::queries::{insert_log, insert_project};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rwl() -> Command {
    cargo_bin_cmd!("rworklog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworklog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworklog_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema through the CLI (no config file written)
pub fn init_db(db_path: &str) {
    rwl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Two projects and three log rows written straight through the library
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    let pool = DbPool::open(db_path).expect("open db");
    let alpha = insert_project(&pool.conn, "Alpha").expect("insert Alpha");
    let beta = insert_project(&pool.conn, "Beta").expect("insert Beta");

    insert_log(&pool.conn, alpha, 90, "2026-10-01 09:00:00").expect("log");
    insert_log(&pool.conn, alpha, 3600, "2026-10-02 09:00:00").expect("log");
    insert_log(&pool.conn, beta, 42, "2026-10-03 09:00:00").expect("log");
}

/// Fresh in-memory database with the full schema
pub fn memory_pool() -> DbPool {
    DbPool::in_memory().expect("in-memory db")
}
