use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rworklog::db::pool::DbPool;
use rworklog::db::queries::{count_logs, load_projects};
use rworklog::db::stats::check_health;
use std::fs;

mod common;
use common::{init_db, init_db_with_data, rwl, setup_test_db, temp_out};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_schema");

    rwl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    let pool = DbPool::new(&db_path).unwrap();
    let tables: Vec<String> = pool
        .conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();

    for t in ["log", "logs", "projects"] {
        assert!(tables.iter().any(|n| n == t), "missing table {t}");
    }

    let indexes: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND tbl_name='logs'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(indexes, 3);
}

#[test]
fn test_init_twice_is_harmless() {
    let db_path = setup_test_db("init_twice");
    init_db(&db_path);
    init_db(&db_path);
}

#[test]
fn test_project_add_and_list() {
    let db_path = setup_test_db("project_add");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "project", "add", "Website", "Backend"])
        .assert()
        .success()
        .stdout(contains("2 project change(s) saved"));

    rwl()
        .args(["--db", &db_path, "project", "list"])
        .assert()
        .success()
        .stdout(contains("Website").and(contains("Backend")));
}

#[test]
fn test_project_add_duplicate_rolls_back() {
    let db_path = setup_test_db("project_dup");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "project", "add", "Fresh", "Twin", "Twin"])
        .assert()
        .failure()
        .stderr(contains("UNIQUE"));

    let pool = DbPool::open(&db_path).unwrap();
    assert!(load_projects(&pool.conn, true).unwrap().is_empty());
}

#[test]
fn test_project_rename_deactivate_delete() {
    let db_path = setup_test_db("project_edit_ops");
    init_db_with_data(&db_path);

    rwl()
        .args(["--db", &db_path, "project", "rename", "1", "Alpha Prime"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "project", "deactivate", "2"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "project", "list"])
        .assert()
        .success()
        .stdout(contains("Alpha Prime").and(contains("Beta").not()));

    rwl()
        .args(["--db", &db_path, "project", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("inactive"));

    rwl()
        .args(["--db", &db_path, "project", "del", "2", "--yes"])
        .assert()
        .success();

    let pool = DbPool::open(&db_path).unwrap();
    assert_eq!(load_projects(&pool.conn, true).unwrap().len(), 1);
    assert_eq!(count_logs(&pool.conn).unwrap(), 3, "log rows survive deletes");
}

#[test]
fn test_project_unknown_id_fails() {
    let db_path = setup_test_db("project_unknown");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "project", "rename", "42", "Ghost"])
        .assert()
        .failure()
        .stderr(contains("Project not found"));
}

#[test]
fn test_project_del_repeated_id() {
    let db_path = setup_test_db("project_del_repeat");
    init_db_with_data(&db_path);

    rwl()
        .args(["--db", &db_path, "project", "del", "1", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("1 project change(s) saved."));

    rwl()
        .args(["--db", &db_path, "project", "deactivate", "2", "2"])
        .assert()
        .success();

    let pool = DbPool::open(&db_path).unwrap();
    let left = load_projects(&pool.conn, true).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].name, "Beta");
    assert!(!left[0].is_active);
}

#[test]
fn test_db_open_failure_message() {
    rwl()
        .args(["--db", "/nonexistent_rworklog_dir/x.sqlite", "list"])
        .assert()
        .code(1)
        .stderr(contains("Unable to establish a database connection"));
}

#[test]
fn test_project_edit_session_from_stdin() {
    let db_path = setup_test_db("project_edit_session");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "project", "edit"])
        .write_stdin("new Docs\nnew Ops\nactive 2 off\nsubmit\nnew Pending\nclose\n")
        .assert()
        .success()
        .stdout(contains("2 project change(s) saved"))
        .stdout(contains("1 pending change(s) discarded"));

    let pool = DbPool::open(&db_path).unwrap();
    let projects = load_projects(&pool.conn, true).unwrap();
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().any(|p| p.name == "Ops" && !p.is_active));
}

#[test]
fn test_project_edit_submit_failure_keeps_pending() {
    let db_path = setup_test_db("project_edit_fail");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "project", "edit"])
        .write_stdin("new Same\nnew Same\nsubmit\nrevert\nsubmit\n")
        .assert()
        .success()
        .stderr(contains("Submit failed"))
        .stdout(contains("Pending changes discarded"));

    let pool = DbPool::open(&db_path).unwrap();
    assert!(load_projects(&pool.conn, true).unwrap().is_empty());
}

#[test]
fn test_list_entries_and_summary() {
    let db_path = setup_test_db("list_entries");
    init_db_with_data(&db_path);

    rwl()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("01:00:00"))
        .stdout(contains("00:01:30"))
        .stdout(contains("3 entries"));

    rwl()
        .args(["--db", &db_path, "list", "--project", "Beta"])
        .assert()
        .success()
        .stdout(contains("1 entries").and(contains("00:00:42")));

    rwl()
        .args(["--db", &db_path, "list", "--summary"])
        .assert()
        .success()
        .stdout(contains("01:01:30"));
}

#[test]
fn test_list_empty() {
    let db_path = setup_test_db("list_empty");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No log entries"));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("export_both");
    init_db_with_data(&db_path);

    let csv_path = temp_out("export_both", "csv");
    rwl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &csv_path, "--force",
        ])
        .assert()
        .success();

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("project_id,project,used_time,duration,created_at"));
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("Alpha,3600,01:00:00"));

    let json_path = temp_out("export_both", "json");
    rwl()
        .args([
            "--db",
            &db_path,
            "export",
            "--format",
            "json",
            "--file",
            &json_path,
            "--project",
            "Alpha",
            "--force",
        ])
        .assert()
        .success();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["project_name"], "Alpha");
}

#[test]
fn test_internal_log_and_db_info() {
    let db_path = setup_test_db("log_info");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "project", "add", "Audit"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("submit")));

    rwl()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Projects").and(contains("Integrity check passed")));
}

#[test]
fn test_db_check_reports_orphan_logs() {
    let db_path = setup_test_db("check_orphans");
    init_db_with_data(&db_path);

    rwl()
        .args(["--db", &db_path, "project", "del", "2", "--yes"])
        .assert()
        .success();

    let pool = DbPool::open(&db_path).unwrap();
    let report = check_health(&pool.conn).unwrap();
    assert!(report.is_healthy());
    assert_eq!(report.orphan_logs, 1);

    rwl()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Schema complete").and(contains("1 log entries belong to deleted projects")));
}

#[test]
fn test_db_check_on_empty_file_lists_missing_tables() {
    let db_path = setup_test_db("check_empty");
    fs::write(&db_path, b"").unwrap();

    rwl()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Missing tables").and(contains("projects")));

    rwl()
        .args(["--db", &db_path, "db", "--migrate", "--check"])
        .assert()
        .success()
        .stdout(contains("Schema complete"));
}
