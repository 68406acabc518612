use std::path::PathBuf;
use std::sync::Once;

use docket_core::{
    update, AppState, BatchOutcome, Effect, FileHandle, Msg, NoticeKind, ProcessRecord,
    UploadKind,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(docket_logging::initialize_for_tests);
}

fn record(number: &str) -> ProcessRecord {
    ProcessRecord {
        number: number.to_string(),
        client: "ACME".to_string(),
        area: "Civil".to_string(),
        service: "Filing".to_string(),
        year: "2024".to_string(),
        reference: format!("REF-{number}"),
        path: format!("/archive/{number}"),
    }
}

fn file(name: &str, size: u64, modified_ms: u64) -> FileHandle {
    FileHandle {
        name: name.to_string(),
        size,
        modified_ms,
        path: PathBuf::from(format!("/tmp/{name}")),
    }
}

/// One record in the table, row "7" selected.
fn selected_state() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            seq: 1,
            result: Ok(vec![record("7")]),
        },
    );
    let (state, _) = update(
        state,
        Msg::RowToggled {
            number: "7".to_string(),
        },
    );
    state
}

fn add_files(state: AppState, files: Vec<FileHandle>) -> AppState {
    let (state, effects) = update(state, Msg::FilesAdded { files });
    assert!(effects.is_empty());
    state
}

#[test]
fn exact_duplicates_are_skipped() {
    init_logging();
    let state = add_files(
        AppState::new(),
        vec![file("scan.pdf", 100, 5), file("scan.pdf", 100, 5)],
    );

    let view = state.view();
    assert_eq!(view.queue.len(), 1);
    let stats = view.last_add_stats.expect("add stats");
    assert_eq!(stats.added, 1);
    assert_eq!(stats.skipped, 1);
}

#[test]
fn same_name_with_different_size_is_accepted() {
    init_logging();
    let state = add_files(
        AppState::new(),
        vec![file("scan.pdf", 100, 5), file("scan.pdf", 200, 5)],
    );
    assert_eq!(state.view().queue.len(), 2);
}

#[test]
fn removal_is_by_position_and_bounded() {
    init_logging();
    let state = add_files(
        AppState::new(),
        vec![file("a.pdf", 1, 1), file("b.pdf", 2, 2)],
    );

    let (state, _) = update(state, Msg::FileRemoved { index: 0 });
    let view = state.view();
    assert_eq!(view.queue.len(), 1);
    assert_eq!(view.queue[0].name, "b.pdf");

    let (state, _) = update(state, Msg::FileRemoved { index: 9 });
    assert_eq!(state.view().queue.len(), 1);
}

#[test]
fn submit_without_selection_reports_the_cause() {
    init_logging();
    let state = add_files(AppState::new(), vec![file("a.pdf", 1, 1)]);

    let (state, effects) = update(
        state,
        Msg::SubmitClicked {
            kind: UploadKind::General,
        },
    );

    assert!(effects.is_empty());
    let notice = state.view().notice.expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.contains("select a process"));
}

#[test]
fn submit_with_empty_queue_reports_the_cause() {
    init_logging();
    let (state, effects) = update(
        selected_state(),
        Msg::SubmitClicked {
            kind: UploadKind::General,
        },
    );

    assert!(effects.is_empty());
    let notice = state.view().notice.expect("notice");
    assert!(notice.text.contains("queue is empty"));
}

#[test]
fn submit_snapshots_the_batch() {
    init_logging();
    let state = add_files(
        selected_state(),
        vec![file("a.pdf", 1, 1), file("b.pdf", 2, 2)],
    );

    let (state, effects) = update(
        state,
        Msg::SubmitClicked {
            kind: UploadKind::General,
        },
    );

    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::SubmitBatch {
            batch,
            force_rename,
        } => {
            assert!(!force_rename);
            assert_eq!(batch.target, "7");
            assert_eq!(batch.kind, UploadKind::General);
            assert_eq!(batch.files.len(), 2);
        }
        other => panic!("unexpected effect {other:?}"),
    }
    assert!(state.view().submit_in_flight);

    // Only one batch at a time.
    let (_state, effects) = update(
        state,
        Msg::SubmitClicked {
            kind: UploadKind::General,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn success_clears_the_queue() {
    init_logging();
    let state = add_files(selected_state(), vec![file("a.pdf", 1, 1)]);
    let (state, _) = update(
        state,
        Msg::SubmitClicked {
            kind: UploadKind::General,
        },
    );

    let (state, effects) = update(
        state,
        Msg::BatchCompleted {
            result: Ok(BatchOutcome::Accepted {
                message: "1 file stored".to_string(),
            }),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.queue.is_empty());
    assert!(!view.submit_in_flight);
    let notice = view.notice.expect("notice");
    assert_eq!(notice.kind, NoticeKind::Success);
}

#[test]
fn failure_leaves_the_queue_intact() {
    init_logging();
    let state = add_files(selected_state(), vec![file("a.pdf", 1, 1)]);
    let (state, _) = update(
        state,
        Msg::SubmitClicked {
            kind: UploadKind::General,
        },
    );

    let (state, _) = update(
        state,
        Msg::BatchCompleted {
            result: Err("disk full".to_string()),
        },
    );

    let view = state.view();
    assert_eq!(view.queue.len(), 1);
    assert!(!view.submit_in_flight);
    assert!(view.notice.expect("notice").text.contains("disk full"));
}

#[test]
fn conflict_then_confirm_resubmits_the_same_files() {
    init_logging();
    let state = add_files(
        selected_state(),
        vec![file("a.pdf", 1, 1), file("b.pdf", 2, 2)],
    );
    let (state, effects) = update(
        state,
        Msg::SubmitClicked {
            kind: UploadKind::General,
        },
    );
    let original_files = match &effects[0] {
        Effect::SubmitBatch { batch, .. } => batch.files.clone(),
        other => panic!("unexpected effect {other:?}"),
    };

    let (state, effects) = update(
        state,
        Msg::BatchCompleted {
            result: Ok(BatchOutcome::Exists {
                files: vec!["a.pdf".to_string()],
            }),
        },
    );
    assert!(effects.is_empty());
    let prompt = state.view().rename_prompt.expect("prompt");
    assert_eq!(prompt.existing, vec!["a.pdf"]);
    assert_eq!(prompt.file_count, 2);
    assert_eq!(state.view().queue.len(), 2);

    // Editing the queue while the prompt is open must not change what a
    // confirmed resubmission carries.
    let (state, _) = update(state, Msg::FileRemoved { index: 0 });

    let (state, effects) = update(state, Msg::RenameConfirmed);
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::SubmitBatch {
            batch,
            force_rename,
        } => {
            assert!(force_rename);
            assert_eq!(batch.files, original_files);
        }
        other => panic!("unexpected effect {other:?}"),
    }
    assert!(state.view().submit_in_flight);
}

#[test]
fn conflict_then_decline_keeps_the_queue_and_sends_nothing() {
    init_logging();
    let state = add_files(selected_state(), vec![file("a.pdf", 1, 1)]);
    let (state, _) = update(
        state,
        Msg::SubmitClicked {
            kind: UploadKind::General,
        },
    );
    let (state, _) = update(
        state,
        Msg::BatchCompleted {
            result: Ok(BatchOutcome::Exists {
                files: vec!["a.pdf".to_string()],
            }),
        },
    );

    let (state, effects) = update(state, Msg::RenameDeclined);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.queue.len(), 1);
    assert!(view.rename_prompt.is_none());
    assert!(!view.submit_in_flight);
    assert_eq!(view.notice.expect("notice").kind, NoticeKind::Info);
}

#[test]
fn confirm_without_a_pending_prompt_is_a_noop() {
    init_logging();
    let (_state, effects) = update(AppState::new(), Msg::RenameConfirmed);
    assert!(effects.is_empty());
}

#[test]
fn malformed_due_date_blocks_an_expense_submit() {
    init_logging();
    let state = add_files(selected_state(), vec![file("a.pdf", 1, 1)]);
    let (state, _) = update(
        state,
        Msg::ExpenseDetailsChanged {
            label: "rent".to_string(),
            due_date: "31-12-2024".to_string(),
        },
    );

    let (state, effects) = update(
        state,
        Msg::SubmitClicked {
            kind: UploadKind::Expenses,
        },
    );

    assert!(effects.is_empty());
    assert!(state
        .view()
        .notice
        .expect("notice")
        .text
        .contains("YYYY-MM-DD"));
}

#[test]
fn expense_details_travel_with_an_expense_batch_only() {
    init_logging();
    let state = add_files(selected_state(), vec![file("a.pdf", 1, 1)]);
    let (state, _) = update(
        state,
        Msg::ExpenseDetailsChanged {
            label: "rent".to_string(),
            due_date: "2024-12-31".to_string(),
        },
    );

    let (state, effects) = update(
        state,
        Msg::SubmitClicked {
            kind: UploadKind::Expenses,
        },
    );
    match &effects[0] {
        Effect::SubmitBatch { batch, .. } => {
            assert_eq!(batch.kind, UploadKind::Expenses);
            assert_eq!(batch.expense.label, "rent");
            assert_eq!(batch.expense.due_date, "2024-12-31");
        }
        other => panic!("unexpected effect {other:?}"),
    }

    // A general submit does not carry expense metadata.
    let (state, _) = update(
        state,
        Msg::BatchCompleted {
            result: Err("rejected".to_string()),
        },
    );
    let (_state, effects) = update(
        state,
        Msg::SubmitClicked {
            kind: UploadKind::General,
        },
    );
    match &effects[0] {
        Effect::SubmitBatch { batch, .. } => assert!(batch.expense.is_empty()),
        other => panic!("unexpected effect {other:?}"),
    }
}
