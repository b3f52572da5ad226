use rworklog::core::save::{SaveLogic, SaveOutcome};
use rworklog::core::stopwatch::Stopwatch;
use rworklog::db::queries::{
    count_logs, insert_project, load_logs, set_project_active,
};
use std::time::{Duration, Instant};

mod common;
use common::memory_pool;

fn running_for(millis: u64) -> (Stopwatch, Instant) {
    let t0 = Instant::now();
    let mut sw = Stopwatch::new();
    sw.start_at(t0).unwrap();
    (sw, t0 + Duration::from_millis(millis))
}

#[test]
fn test_save_writes_one_truncated_row() {
    let pool = memory_pool();
    let id = insert_project(&pool.conn, "P").unwrap();

    let (mut sw, now) = running_for(61_999);
    let outcome = SaveLogic::save_at(&pool.conn, &mut sw, "P", now);

    assert_eq!(
        outcome,
        SaveOutcome::Logged {
            project_id: id,
            seconds: 61
        }
    );

    let logs = load_logs(&pool.conn, None).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].project_id, id);
    assert_eq!(logs[0].used_time, 61);
    assert_eq!(logs[0].project_name.as_deref(), Some("P"));
    assert_eq!(logs[0].created_at.len(), "YYYY-MM-DD HH:MM:SS".len());
}

#[test]
fn test_save_with_zero_seconds_writes_nothing() {
    let pool = memory_pool();
    insert_project(&pool.conn, "P").unwrap();

    let (mut sw, now) = running_for(999);
    let outcome = SaveLogic::save_at(&pool.conn, &mut sw, "P", now);

    assert_eq!(outcome, SaveOutcome::Empty);
    assert_eq!(count_logs(&pool.conn).unwrap(), 0);
    assert_eq!(sw.elapsed(), Duration::ZERO);
}

#[test]
fn test_save_unknown_project_resets_anyway() {
    let pool = memory_pool();
    insert_project(&pool.conn, "P").unwrap();

    let (mut sw, now) = running_for(10_000);
    let outcome = SaveLogic::save_at(&pool.conn, &mut sw, "Nope", now);

    assert_eq!(outcome, SaveOutcome::UnknownProject);
    assert_eq!(count_logs(&pool.conn).unwrap(), 0);
    assert_eq!(sw.elapsed(), Duration::ZERO);
}

#[test]
fn test_save_lookup_is_case_sensitive() {
    let pool = memory_pool();
    insert_project(&pool.conn, "Website").unwrap();

    let (mut sw, now) = running_for(5_000);
    let outcome = SaveLogic::save_at(&pool.conn, &mut sw, "website", now);

    assert_eq!(outcome, SaveOutcome::UnknownProject);
    assert_eq!(count_logs(&pool.conn).unwrap(), 0);
}

#[test]
fn test_save_ignores_inactive_projects() {
    let pool = memory_pool();
    let id = insert_project(&pool.conn, "Archived").unwrap();
    set_project_active(&pool.conn, id, false).unwrap();

    let (mut sw, now) = running_for(5_000);
    let outcome = SaveLogic::save_at(&pool.conn, &mut sw, "Archived", now);

    assert_eq!(outcome, SaveOutcome::UnknownProject);
    assert_eq!(count_logs(&pool.conn).unwrap(), 0);
}

#[test]
fn test_save_failure_is_swallowed_and_resets() {
    let pool = memory_pool();
    insert_project(&pool.conn, "P").unwrap();
    pool.conn.execute_batch("DROP TABLE logs;").unwrap();

    let (mut sw, now) = running_for(5_000);
    let outcome = SaveLogic::save_at(&pool.conn, &mut sw, "P", now);

    assert!(matches!(outcome, SaveOutcome::Failed(_)));
    assert_eq!(sw.elapsed(), Duration::ZERO);

    let failures: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'save_failed'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(failures, 1);
}

#[test]
fn test_save_keeps_running_state() {
    let pool = memory_pool();
    insert_project(&pool.conn, "P").unwrap();

    let (mut sw, now) = running_for(3_000);
    SaveLogic::save_at(&pool.conn, &mut sw, "P", now);

    assert!(sw.is_running());
    assert_eq!(sw.tick_at(now + Duration::from_secs(2)).as_secs(), 2);
}
