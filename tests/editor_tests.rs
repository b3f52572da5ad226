use rworklog::core::editor::{ProjectEditor, RowState};
use rworklog::db::queries::{
    active_project_names, count_logs, insert_log, insert_project, load_projects,
};
use rworklog::errors::AppError;

mod common;
use common::memory_pool;

#[test]
fn test_submit_commits_all_pending_rows() {
    let mut pool = memory_pool();
    let mut editor = ProjectEditor::load(&pool.conn).unwrap();

    editor.insert("Alpha");
    editor.insert("Beta");
    assert!(editor.has_pending());
    assert_eq!(load_projects(&pool.conn, true).unwrap().len(), 0);

    assert_eq!(editor.submit(&mut pool).unwrap(), 2);
    assert!(!editor.has_pending());

    let projects = load_projects(&pool.conn, true).unwrap();
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().all(|p| p.is_active));
    assert_eq!(editor.rows()[0].id, Some(projects[0].id));
}

#[test]
fn test_duplicate_names_roll_back_whole_submit() {
    let mut pool = memory_pool();
    let mut editor = ProjectEditor::load(&pool.conn).unwrap();

    editor.insert("Gamma");
    editor.insert("Dup");
    editor.insert("Dup");

    match editor.submit(&mut pool) {
        Err(AppError::Submit(msg)) => assert!(msg.contains("UNIQUE"), "got: {msg}"),
        other => panic!("expected submit failure, got {:?}", other.map(|_| ())),
    }

    assert!(load_projects(&pool.conn, true).unwrap().is_empty());
    assert_eq!(editor.pending_count(), 3, "pending edits survive a failed submit");

    editor.revert();
    assert!(!editor.has_pending());
    assert!(editor.rows().is_empty());
}

#[test]
fn test_empty_name_is_rejected_by_store() {
    let mut pool = memory_pool();
    let mut editor = ProjectEditor::load(&pool.conn).unwrap();

    editor.insert("");
    assert!(matches!(editor.submit(&mut pool), Err(AppError::Submit(_))));
    assert!(load_projects(&pool.conn, true).unwrap().is_empty());
}

#[test]
fn test_rename_deactivate_and_delete() {
    let mut pool = memory_pool();
    let a = insert_project(&pool.conn, "A").unwrap();
    let b = insert_project(&pool.conn, "B").unwrap();
    let c = insert_project(&pool.conn, "C").unwrap();
    insert_log(&pool.conn, c, 30, "2026-10-01 10:00:00").unwrap();

    let mut editor = ProjectEditor::load(&pool.conn).unwrap();
    editor.rename(editor.row_of(a).unwrap(), "A2").unwrap();
    editor.set_active(editor.row_of(b).unwrap(), false).unwrap();
    editor.remove(editor.row_of(c).unwrap()).unwrap();

    let states: Vec<RowState> = editor.rows().iter().map(|r| r.state()).collect();
    assert_eq!(
        states,
        vec![RowState::Modified, RowState::Modified, RowState::Removed]
    );

    assert_eq!(editor.submit(&mut pool).unwrap(), 3);

    assert_eq!(active_project_names(&pool.conn).unwrap(), vec!["A2"]);
    let all = load_projects(&pool.conn, true).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, a, "ids are stable across renames");

    // deleting a project never touches its log rows
    assert_eq!(count_logs(&pool.conn).unwrap(), 1);
}

#[test]
fn test_deleted_name_can_be_reused_in_same_submit() {
    let mut pool = memory_pool();
    let old = insert_project(&pool.conn, "Reuse").unwrap();

    let mut editor = ProjectEditor::load(&pool.conn).unwrap();
    editor.remove(editor.row_of(old).unwrap()).unwrap();
    editor.insert("Reuse");

    assert_eq!(editor.submit(&mut pool).unwrap(), 2);
    let all = load_projects(&pool.conn, true).unwrap();
    assert_eq!(all.len(), 1);
    assert_ne!(all[0].id, old);
}

#[test]
fn test_removing_pending_row_drops_it() {
    let pool = memory_pool();
    let mut editor = ProjectEditor::load(&pool.conn).unwrap();

    let row = editor.insert("Tmp");
    editor.remove(row).unwrap();
    assert!(editor.rows().is_empty());
    assert!(!editor.has_pending());
}

#[test]
fn test_unknown_ids_and_rows() {
    let pool = memory_pool();
    let mut editor = ProjectEditor::load(&pool.conn).unwrap();

    assert!(matches!(editor.row_of(99), Err(AppError::ProjectNotFound(99))));
    assert!(matches!(editor.rename(0, "x"), Err(AppError::InvalidRow(1))));
}

#[test]
fn test_renaming_back_is_not_pending() {
    let pool = memory_pool();
    let id = insert_project(&pool.conn, "Same").unwrap();

    let mut editor = ProjectEditor::load(&pool.conn).unwrap();
    let row = editor.row_of(id).unwrap();
    editor.rename(row, "Other").unwrap();
    editor.rename(row, "Same").unwrap();

    assert!(!editor.has_pending());
}
