#![allow(dead_code)]

use std::collections::BTreeMap;

use paperlens::app::{handle_event, Action, AppState, Event};
use paperlens::fetch::{Endpoints, FetchRequest, HttpResponse, ResponseTicket};
use paperlens::ui::Theme;

pub const BASE: &str = "http://catalog.test";

pub fn state() -> AppState {
    AppState::new(Endpoints::new(BASE), 20, Theme::default())
}

pub fn paper_json(id: i64, title: &str) -> String {
    format!(
        r#"{{"id":{id},"title":"{title}","abstract":"About {title}.","keywords":"graphs, nets","authors":["Ada Lovelace","Alan Turing"],"link":"https://arxiv.org/abs/{id}","categories":"cs.LG","published_date":"2023-08-14"}}"#
    )
}

pub fn page_json(ids: &[i64], current_page: u32, total_pages: u32, total_items: u64) -> String {
    let results: Vec<String> = ids
        .iter()
        .map(|id| paper_json(*id, &format!("Paper {id}")))
        .collect();
    format!(
        r#"{{"status":"success","current_page":{current_page},"total_pages":{total_pages},"total_items":{total_items},"results":[{}]}}"#,
        results.join(",")
    )
}

/// Runs `event` and returns the single web request it must produce.
pub fn expect_request(state: &mut AppState, event: &Event) -> FetchRequest {
    let (_, actions) = handle_event(state, event).unwrap();
    match actions.as_slice() {
        [Action::WebRequest(request)] => request.clone(),
        other => panic!("expected one web request, got {other:?}"),
    }
}

/// Feeds a host response for `request` back through the handler, going
/// through the same context round trip the plugin shim uses.
pub fn respond(state: &mut AppState, request: &FetchRequest, status: u16, body: &str) -> bool {
    let mut headers = BTreeMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    deliver(state, request, status, &headers, body)
}

pub fn deliver(
    state: &mut AppState,
    request: &FetchRequest,
    status: u16,
    headers: &BTreeMap<String, String>,
    body: &str,
) -> bool {
    let ticket = ResponseTicket::from_context(&request.context()).unwrap();
    let response = HttpResponse::from_host(status, headers, body.as_bytes().to_vec());
    let (render, actions) =
        handle_event(state, &Event::WebResponse { ticket, response }).unwrap();
    assert!(actions.is_empty());
    render
}
