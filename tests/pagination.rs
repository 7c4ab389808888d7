mod common;

use std::collections::BTreeMap;

use common::{deliver, expect_request, page_json, respond, state, BASE};
use paperlens::app::{handle_event, Event, Focus, ViewState};
use paperlens::domain::FetchError;

fn type_text(state: &mut paperlens::AppState, field: Focus, text: &str) {
    handle_event(state, &Event::FocusField(field)).unwrap();
    for c in text.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
}

#[test]
fn first_load_without_filters_shows_first_page() {
    let mut state = state();
    assert!(state.view().is_loading());

    let request = expect_request(&mut state, &Event::Activated);
    assert_eq!(request.url, format!("{BASE}/api/paper/"));

    assert!(respond(&mut state, &request, 200, &page_json(&[1, 2], 1, 3, 6)));

    let page = state.view().page().unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 3);
}

#[test]
fn search_with_no_hits_is_empty() {
    let mut state = state();
    type_text(&mut state, Focus::Search, "quantum");

    let request = expect_request(&mut state, &Event::TriggerSearch);
    assert_eq!(request.url, format!("{BASE}/api/paper/?search=quantum"));
    assert_eq!(state.focus, Focus::Results);

    respond(&mut state, &request, 200, &page_json(&[], 1, 1, 0));
    assert_eq!(state.view(), &ViewState::Empty);
}

#[test]
fn categories_are_sent_as_codes_in_selection_order() {
    let mut state = state();
    handle_event(&mut state, &Event::FocusField(Focus::Categories)).unwrap();
    handle_event(&mut state, &Event::ToggleCategory).unwrap();
    for _ in 0..4 {
        handle_event(&mut state, &Event::CategoryRight).unwrap();
    }
    handle_event(&mut state, &Event::ToggleCategory).unwrap();

    let request = expect_request(&mut state, &Event::TriggerSearch);
    assert_eq!(request.url, format!("{BASE}/api/paper/?categories=cs,physics"));
}

#[test]
fn next_page_keeps_filters_and_adds_page() {
    let mut state = state();
    type_text(&mut state, Focus::Search, "quantum");
    let first = expect_request(&mut state, &Event::TriggerSearch);
    respond(&mut state, &first, 200, &page_json(&[1, 2], 1, 3, 6));

    let second = expect_request(&mut state, &Event::NextPage);
    assert_eq!(second.url, format!("{BASE}/api/paper/?search=quantum&page=2"));
    assert_eq!(state.filters.criteria().search_text, "quantum");
    assert!(state.view().is_loading());

    respond(&mut state, &second, 200, &page_json(&[3, 4], 2, 3, 6));
    assert_eq!(state.view().page().unwrap().current_page, 2);

    let back = expect_request(&mut state, &Event::PrevPage);
    assert_eq!(back.url, format!("{BASE}/api/paper/?search=quantum&page=1"));
}

#[test]
fn paging_past_either_end_does_nothing() {
    let mut state = state();
    let request = expect_request(&mut state, &Event::Activated);
    respond(&mut state, &request, 200, &page_json(&[1], 1, 1, 1));

    let (render, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
    assert!(!render);
    assert!(actions.is_empty());

    let (_, actions) = handle_event(&mut state, &Event::PrevPage).unwrap();
    assert!(actions.is_empty());
}

#[test]
fn server_error_is_failure_not_empty() {
    let mut state = state();
    let request = expect_request(&mut state, &Event::Activated);
    respond(&mut state, &request, 500, "Internal Server Error");

    assert_eq!(
        state.view(),
        &ViewState::Failed(FetchError::NonSuccessStatus(500))
    );
}

#[test]
fn only_the_latest_search_settles() {
    let mut state = state();
    let first = expect_request(&mut state, &Event::TriggerSearch);
    type_text(&mut state, Focus::Search, "graph");
    let second = expect_request(&mut state, &Event::TriggerSearch);

    assert!(!respond(&mut state, &first, 200, &page_json(&[1], 1, 1, 1)));
    assert!(state.view().is_loading());

    assert!(respond(&mut state, &second, 200, &page_json(&[7, 8], 1, 1, 2)));
    let ids: Vec<i64> = state.view().page().unwrap().items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![7, 8]);

    // A late failure for the superseded request changes nothing either.
    assert!(!respond(&mut state, &first, 500, ""));
    assert!(state.view().page().is_some());
}

#[test]
fn filter_edits_never_fetch() {
    let mut state = state();
    handle_event(&mut state, &Event::FocusField(Focus::Search)).unwrap();
    for event in [
        Event::Char('a'),
        Event::Backspace,
        Event::NextField,
        Event::ToggleCategory,
        Event::CategoryRight,
        Event::NextField,
        Event::Char('2'),
        Event::ClearFilters,
        Event::FocusResults,
    ] {
        let (_, actions) = handle_event(&mut state, &event).unwrap();
        assert!(actions.is_empty(), "{event:?} issued a request");
    }
}

#[test]
fn date_range_is_applied_on_trigger() {
    let mut state = state();
    type_text(&mut state, Focus::StartDate, "2023-01-01");
    type_text(&mut state, Focus::EndDate, "2023-12-31");

    let request = expect_request(&mut state, &Event::TriggerSearch);
    assert_eq!(
        request.url,
        format!("{BASE}/api/paper/?start_date=2023-01-01&end_date=2023-12-31")
    );
}

#[test]
fn transport_failure_is_network_unreachable() {
    let mut state = state();
    let request = expect_request(&mut state, &Event::Activated);
    deliver(&mut state, &request, 400, &BTreeMap::new(), "connection refused");

    assert_eq!(
        state.view(),
        &ViewState::Failed(FetchError::NetworkUnreachable("connection refused".to_string()))
    );
}

#[test]
fn malformed_body_is_reported() {
    let mut state = state();
    let request = expect_request(&mut state, &Event::Activated);
    respond(&mut state, &request, 200, "<html>oops</html>");

    assert!(matches!(
        state.view(),
        ViewState::Failed(FetchError::MalformedPayload(_))
    ));
}

#[test]
fn new_page_resets_selection() {
    let mut state = state();
    let request = expect_request(&mut state, &Event::Activated);
    respond(&mut state, &request, 200, &page_json(&[1, 2, 3], 1, 2, 6));

    handle_event(&mut state, &Event::KeyDown).unwrap();
    handle_event(&mut state, &Event::KeyDown).unwrap();
    assert_eq!(state.selected_paper().unwrap().id, 3);

    let next = expect_request(&mut state, &Event::NextPage);
    respond(&mut state, &next, 200, &page_json(&[4, 5, 6], 2, 2, 6));
    assert_eq!(state.selected_paper().unwrap().id, 4);
}

#[test]
fn paper_without_link_still_loads() {
    let mut state = state();
    let request = expect_request(&mut state, &Event::Activated);
    let body = page_json(&[1, 2], 1, 1, 2).replace(r#""https://arxiv.org/abs/1""#, "null");
    assert!(body.contains(r#""link":null"#));

    respond(&mut state, &request, 200, &body);
    let page = state.view().page().unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(page.items[0].link.is_empty());

    let (_, actions) = handle_event(&mut state, &Event::OpenLink).unwrap();
    assert!(actions.is_empty());
}

#[test]
fn denial_after_request_discards_late_response() {
    let mut state = state();
    let request = expect_request(&mut state, &Event::TriggerSearch);
    handle_event(&mut state, &Event::AccessDenied).unwrap();

    assert!(!respond(&mut state, &request, 200, &page_json(&[1], 1, 1, 1)));
    assert!(matches!(
        state.view(),
        ViewState::Failed(FetchError::NetworkUnreachable(_))
    ));
}
