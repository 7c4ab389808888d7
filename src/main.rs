//! Zellij plugin wrapper and entry point.
//!
//! Thin layer between the paperlens library and the Zellij plugin API:
//! host events become library [`Event`]s, and the [`Action`]s returned by
//! [`handle_event`] become host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: request `WebAccess` and `RunCommands`; once granted,
//!    the first page is requested
//! 3. **Update**: map keys and host results to events, execute actions
//! 4. **Render**: delegate to the library renderer
//!
//! # Host Requests
//!
//! - `web_request` carries the request's context map; the matching
//!   `WebRequestResult` returns it untouched, which is how responses are
//!   routed and checked for staleness.
//! - `run_command(["xdg-open", url])` opens a paper link on the host.
//!
//! # Keybindings
//!
//! Card list:
//! - `j`/`k`, `Down`/`Up`: move selection
//! - `n`/`p`, `Right`/`Left`: next / previous page
//! - `/`: search, `c`: categories, `f`: from date, `t`: to date, `Tab`: first field
//! - `s`: run search, `x`: clear filters
//! - `Enter`/`o`: open link, `r`: related articles, `P`: start preprocessing
//! - `q`: close plugin
//!
//! Filter fields:
//! - typing edits the field, `Backspace` deletes
//! - `h`/`l`, `Left`/`Right`, `Space`: move and toggle category chips
//! - `Tab`: next field, `Enter`: run search, `Esc`: back to cards
//!
//! Related dialog: `Esc`, `r` or `q` closes it.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use paperlens::fetch::{HttpMethod, HttpResponse, ResponseTicket};
use paperlens::{handle_event, Action, Config, Event, Focus};

register_plugin!(State);

struct State {
    app: paperlens::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: paperlens::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests permissions and subscribes to events.
    ///
    /// No request is issued until permissions are granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        paperlens::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            base_url = %config.base_url,
            number_of_articles = config.number_of_articles,
            "parsed configuration"
        );
        self.app = paperlens::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Returns `true` if the pane should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                match Self::map_web_result_event(status, &headers, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                Event::LinkOpened {
                    exit_code,
                    stderr: String::from_utf8_lossy(&stderr).into_owned(),
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted");
                    Event::Activated
                }
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - catalog cannot be reached");
                    Event::AccessDenied
                }
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        paperlens::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, focus = ?self.app.focus, "key event");

        if self.app.related.is_open() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Char('r' | 'q') => Some(Event::CloseDialog),
                _ => None,
            };
        }

        match self.app.focus {
            Focus::Results => Self::map_results_key(key),
            Focus::Categories => Some(match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::CategoryLeft,
                BareKey::Right | BareKey::Char('l') => Event::CategoryRight,
                BareKey::Char(' ') => Event::ToggleCategory,
                _ => return Self::map_field_key(key),
            }),
            Focus::Search | Focus::StartDate | Focus::EndDate => Self::map_field_key(key),
        }
    }

    fn map_results_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Right | BareKey::Char('n') => Event::NextPage,
            BareKey::Left | BareKey::Char('p') => Event::PrevPage,
            BareKey::Char('/') => Event::FocusField(Focus::Search),
            BareKey::Char('c') => Event::FocusField(Focus::Categories),
            BareKey::Char('f') => Event::FocusField(Focus::StartDate),
            BareKey::Char('t') => Event::FocusField(Focus::EndDate),
            BareKey::Tab => Event::NextField,
            BareKey::Enter | BareKey::Char('o') => Event::OpenLink,
            BareKey::Char('r') => Event::ShowRelated,
            BareKey::Char('P') => Event::StartProcessing,
            BareKey::Char('x') => Event::ClearFilters,
            BareKey::Char('s') => Event::TriggerSearch,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_field_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Esc => Event::FocusResults,
            BareKey::Tab => Event::NextField,
            BareKey::Enter => Event::TriggerSearch,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Recovers the routing ticket from the echoed context and classifies
    /// the host result. A context that did not come from this plugin is
    /// dropped.
    fn map_web_result_event(
        status: u16,
        headers: &BTreeMap<String, String>,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        match ResponseTicket::from_context(context) {
            Ok(ticket) => {
                tracing::debug!(
                    status,
                    kind = ticket.kind.as_str(),
                    generation = %ticket.generation,
                    body_len = body.len(),
                    "web request result"
                );
                Some(Event::WebResponse {
                    ticket,
                    response: HttpResponse::from_host(status, headers, body),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "dropping web response with unreadable context");
                None
            }
        }
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::WebRequest(request) => {
                let verb = match request.method {
                    HttpMethod::Get => HttpVerb::Get,
                    HttpMethod::Post => HttpVerb::Post,
                };
                tracing::debug!(
                    url = %request.url,
                    kind = request.kind.as_str(),
                    generation = %request.generation,
                    "sending web request"
                );
                web_request(&request.url, verb, BTreeMap::new(), vec![], request.context());
            }
            Action::OpenLink { url } => {
                tracing::debug!(url = %url, "opening link on host");
                run_command(&["xdg-open", url.as_str()], BTreeMap::new());
            }
        }
    }
}
