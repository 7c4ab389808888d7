//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place application state changes. Each event
//! mutates [`AppState`] and yields a render flag plus the [`Action`]s the shim
//! must execute.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Activated` (permissions granted, first fetch),
//!   `AccessDenied` (permissions refused, listing fails)
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextPage`, `PrevPage`
//! - **Filter editing**: `FocusField`, `NextField`, `FocusResults`, `Char`,
//!   `Backspace`, `CategoryLeft`, `CategoryRight`, `ToggleCategory`,
//!   `ClearFilters`
//! - **Triggers**: `TriggerSearch`, `ShowRelated`, `StartProcessing`,
//!   `OpenLink`
//! - **Host**: `WebResponse`, `LinkOpened`
//!
//! Filter edits never issue a request; only triggers do.
//!
//! # Example
//!
//! ```rust
//! use paperlens::app::{handle_event, Action, AppState, Event};
//! use paperlens::fetch::Endpoints;
//! use paperlens::ui::Theme;
//!
//! let mut state = AppState::new(Endpoints::new("http://localhost:8000"), 10, Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Activated)?;
//! assert!(render);
//! assert!(matches!(&actions[..], [Action::WebRequest(r)] if r.url == "http://localhost:8000/api/paper/"));
//! # Ok::<(), paperlens::PaperLensError>(())
//! ```

use super::modes::Focus;
use crate::app::{Action, AppState};
use crate::domain::error::{FetchError, Result};
use crate::fetch::{HttpResponse, RequestKind, ResponseTicket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Host permissions granted; loads the first page with empty filters.
    Activated,
    /// Host permissions denied; the catalog cannot be reached.
    AccessDenied,

    /// Next card (wraps).
    KeyDown,
    /// Previous card (wraps).
    KeyUp,
    /// Page after the displayed one.
    NextPage,
    /// Page before the displayed one.
    PrevPage,

    /// Moves input focus to a filter field.
    FocusField(Focus),
    /// Moves to the next filter field in Tab order.
    NextField,
    /// Returns focus to the card list without fetching.
    FocusResults,
    /// Character typed into the focused field.
    Char(char),
    Backspace,
    CategoryLeft,
    CategoryRight,
    /// Toggles the category under the chip cursor.
    ToggleCategory,
    /// Resets every filter field. Does not fetch.
    ClearFilters,

    /// Runs the current filters from the first page.
    TriggerSearch,
    /// Opens the related-articles dialog for the selected card.
    ShowRelated,
    CloseDialog,
    /// Asks the server to collect and prepare new papers.
    StartProcessing,
    /// Opens the selected card's link on the host.
    OpenLink,
    CloseFocus,

    /// A web request finished, successfully or not.
    WebResponse {
        /// Routing data recovered from the request context.
        ticket: ResponseTicket,
        /// Host response, or the transport failure it reported.
        response: std::result::Result<HttpResponse, FetchError>,
    },

    /// The link-opening command exited.
    LinkOpened {
        exit_code: Option<i32>,
        stderr: String,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed by the shim in order.
///
/// # Errors
///
/// None of the current events fail; the signature matches the rest of the
/// plugin's fallible layers.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    if state.web_access_denied && needs_web_access(event) {
        tracing::debug!("web access denied, not issuing request");
        state.coordinator.fail(access_denied());
        return Ok((true, vec![]));
    }

    match event {
        Event::Activated => {
            tracing::info!("plugin activated, loading first page");
            state.web_access_denied = false;
            Ok((true, vec![trigger_search(state)]))
        }
        Event::AccessDenied => {
            tracing::warn!("web access denied, catalog unreachable");
            state.web_access_denied = true;
            state.coordinator.fail(access_denied());
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextPage => Ok(state
            .coordinator
            .next_page(&state.filters)
            .map_or((false, vec![]), |request| {
                (true, vec![Action::WebRequest(request)])
            })),
        Event::PrevPage => Ok(state
            .coordinator
            .previous_page(&state.filters)
            .map_or((false, vec![]), |request| {
                (true, vec![Action::WebRequest(request)])
            })),
        Event::FocusField(focus) => {
            state.focus = *focus;
            Ok((true, vec![]))
        }
        Event::NextField => {
            state.focus = state.focus.next_field();
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.focus = Focus::Results;
            Ok((true, vec![]))
        }
        Event::Char(c) => Ok((edit_focused_field(state, Some(*c)), vec![])),
        Event::Backspace => Ok((edit_focused_field(state, None), vec![])),
        Event::CategoryLeft => {
            state.move_category_cursor(false);
            Ok((true, vec![]))
        }
        Event::CategoryRight => {
            state.move_category_cursor(true);
            Ok((true, vec![]))
        }
        Event::ToggleCategory => {
            let category = state.category_at_cursor();
            state.filters.toggle_category(category);
            tracing::debug!(%category, selected = ?state.filters.criteria().categories, "category toggled");
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            state.filters.clear();
            state.start_date = super::modes::DateInput::default();
            state.end_date = super::modes::DateInput::default();
            Ok((true, vec![]))
        }
        Event::TriggerSearch => {
            state.focus = Focus::Results;
            Ok((true, vec![trigger_search(state)]))
        }
        Event::ShowRelated => {
            let Some(paper) = state.selected_paper().cloned() else {
                tracing::debug!("no paper selected");
                return Ok((false, vec![]));
            };
            let request = state.related.open(state.coordinator.endpoints(), &paper);
            Ok((true, vec![Action::WebRequest(request)]))
        }
        Event::CloseDialog => {
            if !state.related.is_open() {
                return Ok((false, vec![]));
            }
            state.related.close();
            Ok((true, vec![]))
        }
        Event::StartProcessing => {
            let request = state.processing.start(
                state.coordinator.endpoints(),
                &state.filters.criteria().categories,
            );
            Ok((true, vec![Action::WebRequest(request)]))
        }
        Event::OpenLink => match state.selected_paper() {
            Some(paper) if !paper.link.is_empty() => {
                tracing::debug!(paper_id = paper.id, link = %paper.link, "opening link");
                Ok((false, vec![Action::OpenLink {
                    url: paper.link.clone(),
                }]))
            }
            _ => Ok((false, vec![])),
        },
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::WebResponse { ticket, response } => {
            let _otel = ticket.trace_context.as_ref().and_then(|t| t.attach());
            let _response_span = tracing::debug_span!(
                "web_response",
                kind = ticket.kind.as_str(),
                generation = %ticket.generation,
                status = response.as_ref().map_or(0, |r| r.status)
            )
            .entered();

            let applied = match ticket.kind {
                RequestKind::Papers => {
                    let applied = state.coordinator.complete(ticket.generation, response.clone());
                    if applied {
                        state.selected_index = 0;
                    }
                    applied
                }
                RequestKind::Related => state.related.complete(ticket.generation, response.clone()),
                RequestKind::Processing => {
                    state.processing.complete(ticket.generation, response.clone())
                }
            };
            Ok((applied, vec![]))
        }
        Event::LinkOpened { exit_code, stderr } => {
            if *exit_code != Some(0) {
                tracing::warn!(exit_code = ?exit_code, stderr = %stderr, "failed to open link");
            }
            Ok((false, vec![]))
        }
    }
}

fn trigger_search(state: &mut AppState) -> Action {
    state.sync_dates();
    Action::WebRequest(state.coordinator.trigger_search(&state.filters))
}

/// Applies a typed character (`Some`) or backspace (`None`) to the focused
/// field. Returns whether anything changed.
fn edit_focused_field(state: &mut AppState, input: Option<char>) -> bool {
    match (state.focus, input) {
        (Focus::Search, Some(c)) => state.filters.push_search_char(c),
        (Focus::Search, None) => state.filters.pop_search_char(),
        (Focus::StartDate, Some(c)) => state.start_date.push(c),
        (Focus::StartDate, None) => state.start_date.pop(),
        (Focus::EndDate, Some(c)) => state.end_date.push(c),
        (Focus::EndDate, None) => state.end_date.pop(),
        (Focus::Categories | Focus::Results, _) => return false,
    }
    state.sync_dates();
    true
}

fn access_denied() -> FetchError {
    FetchError::NetworkUnreachable("web access permission denied".to_string())
}

const fn needs_web_access(event: &Event) -> bool {
    matches!(
        event,
        Event::TriggerSearch
            | Event::NextPage
            | Event::PrevPage
            | Event::ShowRelated
            | Event::StartProcessing
    )
}

/// Event name without payload, for span fields.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Activated => "Activated",
        Event::AccessDenied => "AccessDenied",
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::NextPage => "NextPage",
        Event::PrevPage => "PrevPage",
        Event::FocusField(_) => "FocusField",
        Event::NextField => "NextField",
        Event::FocusResults => "FocusResults",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::CategoryLeft => "CategoryLeft",
        Event::CategoryRight => "CategoryRight",
        Event::ToggleCategory => "ToggleCategory",
        Event::ClearFilters => "ClearFilters",
        Event::TriggerSearch => "TriggerSearch",
        Event::ShowRelated => "ShowRelated",
        Event::CloseDialog => "CloseDialog",
        Event::StartProcessing => "StartProcessing",
        Event::OpenLink => "OpenLink",
        Event::CloseFocus => "CloseFocus",
        Event::WebResponse { .. } => "WebResponse",
        Event::LinkOpened { .. } => "LinkOpened",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Endpoints;
    use crate::ui::Theme;

    fn state() -> AppState {
        AppState::new(Endpoints::new("http://h"), 10, Theme::default())
    }

    #[test]
    fn editing_never_fetches() {
        let mut state = state();
        for event in [
            Event::FocusField(Focus::Search),
            Event::Char('n'),
            Event::Backspace,
            Event::NextField,
            Event::CategoryRight,
            Event::ToggleCategory,
            Event::FocusField(Focus::EndDate),
            Event::Char('2'),
            Event::FocusResults,
            Event::ClearFilters,
        ] {
            let (_, actions) = handle_event(&mut state, &event).unwrap();
            assert!(actions.is_empty(), "{event:?} produced {actions:?}");
        }
    }

    #[test]
    fn typing_only_edits_focused_field() {
        let mut state = state();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        assert_eq!(state.filters.criteria().search_text, "");

        handle_event(&mut state, &Event::FocusField(Focus::Search)).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        assert_eq!(state.filters.criteria().search_text, "x");
        assert_eq!(state.start_date.text(), "");
    }

    #[test]
    fn trigger_search_returns_focus_to_results() {
        let mut state = state();
        handle_event(&mut state, &Event::FocusField(Focus::Search)).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::TriggerSearch).unwrap();
        assert_eq!(state.focus, Focus::Results);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn related_without_selection_is_noop() {
        let mut state = state();
        assert_eq!(
            handle_event(&mut state, &Event::ShowRelated).unwrap(),
            (false, vec![])
        );
    }

    #[test]
    fn denied_access_fails_listing_and_blocks_requests() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::AccessDenied).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(
            state.view(),
            &crate::app::ViewState::Failed(FetchError::NetworkUnreachable(
                "web access permission denied".to_string()
            ))
        );

        for event in [Event::TriggerSearch, Event::NextPage, Event::StartProcessing] {
            let (_, actions) = handle_event(&mut state, &event).unwrap();
            assert!(actions.is_empty(), "{event:?} produced {actions:?}");
        }
        assert!(!state.view().is_loading());

        let (_, actions) = handle_event(&mut state, &Event::Activated).unwrap();
        assert_eq!(actions.len(), 1);
        assert!(state.view().is_loading());
    }
}
