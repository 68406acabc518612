use crate::{AppState, BatchOutcome, Effect, Msg, SubmitPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let seq = state.begin_search();
            vec![
                Effect::FetchClients,
                Effect::Search {
                    seq,
                    filters: state.filters().clone(),
                },
            ]
        }
        Msg::PrefsRestored { page_size, filters } => {
            state.restore_prefs(page_size, filters);
            Vec::new()
        }
        Msg::FilterChanged { field, value } => {
            state.set_filter(field, value);
            Vec::new()
        }
        Msg::FiltersCleared => {
            state.clear_filters();
            let seq = state.begin_search();
            vec![Effect::Search {
                seq,
                filters: state.filters().clone(),
            }]
        }
        Msg::SearchSubmitted => match state.filters().validate() {
            Ok(()) => {
                let seq = state.begin_search();
                vec![Effect::Search {
                    seq,
                    filters: state.filters().clone(),
                }]
            }
            Err(err) => {
                state.set_error(err.to_string());
                Vec::new()
            }
        },
        Msg::SearchCompleted { seq, result } => {
            // A reply from an overtaken request must not clobber newer data.
            if state.is_current_search(seq) {
                match result {
                    Ok(records) => state.apply_search_results(records),
                    Err(message) => state.fail_search(message),
                }
            }
            Vec::new()
        }
        Msg::ClientsLoaded { result } => {
            // On failure the dropdown just stays empty; the platform
            // layer logs it.
            if let Ok(clients) = result {
                state.set_clients(clients);
            }
            Vec::new()
        }
        Msg::SortClicked { column } => {
            state.apply_sort(column);
            Vec::new()
        }
        Msg::PageSizeChanged { size } => {
            state.set_page_size(size);
            Vec::new()
        }
        Msg::PageFirst => {
            state.page_first();
            Vec::new()
        }
        Msg::PagePrev => {
            state.page_prev();
            Vec::new()
        }
        Msg::PageNext => {
            state.page_next();
            Vec::new()
        }
        Msg::PageLast => {
            state.page_last();
            Vec::new()
        }
        Msg::PageJumped { page } => {
            state.page_goto(page);
            Vec::new()
        }
        Msg::RowToggled { number } => {
            state.toggle_selection(number);
            Vec::new()
        }
        Msg::SelectionCleared => {
            state.clear_selection();
            Vec::new()
        }
        Msg::FilesAdded { files } => {
            state.add_files(files);
            Vec::new()
        }
        Msg::FileRemoved { index } => {
            state.remove_file(index);
            Vec::new()
        }
        Msg::ExpenseDetailsChanged { label, due_date } => {
            state.set_expense_details(label, due_date);
            Vec::new()
        }
        Msg::SubmitClicked { kind } => {
            if !matches!(state.submit_phase(), SubmitPhase::Idle) {
                // One batch at a time; a pending prompt must be answered.
                Vec::new()
            } else {
                match state.begin_submit(kind) {
                    Ok(batch) => vec![Effect::SubmitBatch {
                        batch,
                        force_rename: false,
                    }],
                    Err(reason) => {
                        state.set_error(reason);
                        Vec::new()
                    }
                }
            }
        }
        Msg::BatchCompleted { result } => {
            if matches!(state.submit_phase(), SubmitPhase::InFlight { .. }) {
                match result {
                    Ok(BatchOutcome::Accepted { message }) => state.finish_submit_success(message),
                    Ok(BatchOutcome::Exists { files }) => state.await_rename_confirm(files),
                    Err(message) => state.fail_submit(message),
                }
            }
            Vec::new()
        }
        Msg::RenameConfirmed => match state.resume_submit() {
            Some(batch) => vec![Effect::SubmitBatch {
                batch,
                force_rename: true,
            }],
            None => Vec::new(),
        },
        Msg::RenameDeclined => {
            state.decline_rename();
            Vec::new()
        }
        Msg::OpenFolderClicked { number } => {
            if state.is_opening() {
                Vec::new()
            } else {
                match state.record_path(&number).map(str::to_owned) {
                    Some(path) => {
                        state.begin_open(path.clone());
                        vec![Effect::OpenFolder { path }]
                    }
                    None => Vec::new(),
                }
            }
        }
        Msg::FolderOpened { result } => {
            state.finish_open(result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
