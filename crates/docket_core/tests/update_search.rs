use std::sync::Once;

use docket_core::{
    update, AppState, Effect, FilterField, FilterSet, Msg, NoticeKind, ProcessRecord,
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

fn set_filter(state: AppState, field: FilterField, value: &str) -> AppState {
    let (state, effects) = update(
        state,
        Msg::FilterChanged {
            field,
            value: value.to_string(),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn started_fetches_clients_and_runs_initial_search() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);

    assert_eq!(
        effects,
        vec![
            Effect::FetchClients,
            Effect::Search {
                seq: 1,
                filters: FilterSet::default(),
            },
        ]
    );
    assert!(state.view().loading);
}

#[test]
fn inverted_range_blocks_the_query() {
    init_logging();
    let state = set_filter(AppState::new(), FilterField::NumberStart, "10");
    let state = set_filter(state, FilterField::NumberEnd, "2");

    let (state, effects) = update(state, Msg::SearchSubmitted);

    assert!(effects.is_empty());
    let notice = state.view().notice.expect("validation notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.contains("start number"));
    assert!(!state.view().loading);
}

#[test]
fn valid_range_issues_the_search() {
    init_logging();
    let state = set_filter(AppState::new(), FilterField::NumberStart, "2");
    let state = set_filter(state, FilterField::NumberEnd, "10");

    let (state, effects) = update(state, Msg::SearchSubmitted);

    let expected_filters = FilterSet {
        number_start: "2".to_string(),
        number_end: "10".to_string(),
        ..FilterSet::default()
    };
    assert_eq!(
        effects,
        vec![Effect::Search {
            seq: 1,
            filters: expected_filters,
        }]
    );
    assert!(state.view().loading);
}

#[test]
fn unparsable_bounds_do_not_block_the_query() {
    init_logging();
    let state = set_filter(AppState::new(), FilterField::NumberStart, "abc");
    let state = set_filter(state, FilterField::NumberEnd, "2");

    let (_state, effects) = update(state, Msg::SearchSubmitted);

    assert_eq!(effects.len(), 1);
}

#[test]
fn response_replaces_records_and_resets_the_page() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            seq: 1,
            result: Ok(vec![record("1"), record("2"), record("3")]),
        },
    );

    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.total_count, 3);
    assert_eq!(view.current_page, 1);
    assert_eq!(view.rows.len(), 3);

    // A second search starts fresh: back to page one, default sort.
    let (state, _) = update(state, Msg::PageSizeChanged { size: 1 });
    let (state, _) = update(state, Msg::PageNext);
    assert_eq!(state.view().current_page, 2);

    let (state, effects) = update(state, Msg::SearchSubmitted);
    let seq = match &effects[0] {
        Effect::Search { seq, .. } => *seq,
        other => panic!("unexpected effect {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            seq,
            result: Ok(vec![record("7")]),
        },
    );
    let view = state.view();
    assert_eq!(view.current_page, 1);
    assert_eq!(view.total_count, 1);
    assert!(!view.sort.reverse);
}

#[test]
fn stale_response_is_dropped() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    // A second search overtakes the first before it resolves.
    let (state, effects) = update(state, Msg::SearchSubmitted);
    assert_eq!(effects.len(), 1);

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            seq: 1,
            result: Ok(vec![record("1"), record("2")]),
        },
    );
    assert_eq!(state.view().total_count, 0);
    assert!(state.view().loading);

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            seq: 2,
            result: Ok(vec![record("9")]),
        },
    );
    let view = state.view();
    assert_eq!(view.total_count, 1);
    assert!(!view.loading);
}

#[test]
fn server_failure_keeps_prior_records() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            seq: 1,
            result: Ok(vec![record("1")]),
        },
    );

    let (state, _) = update(state, Msg::SearchSubmitted);
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            seq: 2,
            result: Err("index offline".to_string()),
        },
    );

    let view = state.view();
    assert_eq!(view.total_count, 1);
    let notice = view.notice.expect("error notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.contains("index offline"));
}

#[test]
fn clearing_filters_resets_them_and_searches_again() {
    init_logging();
    let state = set_filter(AppState::new(), FilterField::Client, "ACME");
    let (state, effects) = update(state, Msg::FiltersCleared);

    assert!(state.view().filters.is_empty());
    assert_eq!(
        effects,
        vec![Effect::Search {
            seq: 1,
            filters: FilterSet::default(),
        }]
    );
}

#[test]
fn client_list_populates_the_dropdown() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::ClientsLoaded {
            result: Ok(vec!["ACME".to_string(), "Globex".to_string()]),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().clients, vec!["ACME", "Globex"]);

    // A failed fetch leaves the dropdown alone.
    let (state, _) = update(
        state,
        Msg::ClientsLoaded {
            result: Err("unreachable".to_string()),
        },
    );
    assert_eq!(state.view().clients, vec!["ACME", "Globex"]);
}

#[test]
fn restored_prefs_feed_the_first_search() {
    init_logging();
    let filters = FilterSet {
        client: "ACME".to_string(),
        ..FilterSet::default()
    };
    let (state, effects) = update(
        AppState::new(),
        Msg::PrefsRestored {
            page_size: 50,
            filters: filters.clone(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().page_size, 50);

    let (_state, effects) = update(state, Msg::Started);
    assert_eq!(
        effects,
        vec![Effect::FetchClients, Effect::Search { seq: 1, filters }]
    );
}
