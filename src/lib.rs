//! PaperLens: a Zellij plugin for browsing a research-paper catalog.
//!
//! The plugin lets a user compose a filter (free-text search, subject
//! categories, publication date range), fetch one page of matching papers
//! from a catalog service over HTTP, and step through the pages. Each trigger
//! supersedes the previous one: a response that arrives after a newer
//! trigger is discarded.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web responses
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - handle_event: Event → (render, Actions)          │
//! │  - PaginationCoordinator, ViewState                 │
//! │  - related dialog, preprocessing trigger            │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Query Layer   │   │ Fetch Layer   │
//! │ (ui/)         │   │ (query/)      │   │ (fetch/)      │
//! │ - Rendering   │   │ - FilterStore │   │ - Endpoints   │
//! │ - Theming     │   │ - QueryBuilder│   │ - Staleness   │
//! │ - Components  │   │               │   │ - Decoding    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) · Paths (infrastructure/)         │
//! │  Observability (observability/)                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: state machine, coordinator and view state
//! - [`domain`]: papers, categories, result pages, errors
//! - [`query`]: filter storage and query-string construction
//! - [`fetch`]: endpoints, request context, response classification
//! - [`ui`]: rendering and themes
//! - [`infrastructure`]: sandbox paths
//! - [`observability`]: tracing setup
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/paperlens.wasm" {
//!         base_url "http://localhost:8000"
//!         number_of_articles "25"
//!         theme "catppuccin-latte"
//!         trace_level "paperlens=debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use paperlens::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Activated)?;
//! for action in &actions {
//!     if let Action::WebRequest(request) = action {
//!         assert!(request.url.ends_with("/api/paper/"));
//!     }
//! }
//! # Ok::<(), paperlens::PaperLensError>(())
//! ```

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod query;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Focus, ViewState};
pub use domain::{PaperLensError, Result};
pub use ui::Theme;

use fetch::Endpoints;
use std::collections::BTreeMap;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_NUMBER_OF_ARTICLES: u32 = 10;
const DEFAULT_TRACE_LEVEL: &str = "info";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog service root, without a trailing `/`.
    pub base_url: String,

    /// Batch size sent with a preprocessing request.
    pub number_of_articles: u32,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for spans and events.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            number_of_articles: DEFAULT_NUMBER_OF_ARTICLES,
            theme_name: None,
            theme_file: None,
            trace_level: DEFAULT_TRACE_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Parses the plugin configuration, falling back to defaults for missing
    /// or unparsable values.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use paperlens::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "https://papers.example.org/".to_string());
    /// map.insert("number_of_articles".to_string(), "many".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.base_url, "https://papers.example.org");
    /// assert_eq!(config.number_of_articles, 10);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let base_url = config.get("base_url").map_or_else(
            || DEFAULT_BASE_URL.to_string(),
            |raw| {
                parse_base_url(raw).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "invalid base_url, using default");
                    DEFAULT_BASE_URL.to_string()
                })
            },
        );

        let number_of_articles = config
            .get("number_of_articles")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_NUMBER_OF_ARTICLES);

        Self {
            base_url,
            number_of_articles,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config
                .get("trace_level")
                .cloned()
                .unwrap_or_else(|| DEFAULT_TRACE_LEVEL.to_string()),
        }
    }
}

fn parse_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(PaperLensError::Config(format!(
            "base_url must start with http:// or https://, got {raw:?}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Builds the initial application state: theme resolved, no request issued.
///
/// The first fetch happens once the host grants permissions
/// ([`Event::Activated`]).
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, "initializing paperlens plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config
                .theme_name
                .as_ref()
                .map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(
        Endpoints::new(&config.base_url),
        config.number_of_articles,
        theme,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("base_url", "https://catalog.test//"),
            ("number_of_articles", " 50 "),
            ("theme", "catppuccin-latte"),
            ("theme_file", "/tmp/theme.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.base_url, "https://catalog.test");
        assert_eq!(config.number_of_articles, 50);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("/tmp/theme.toml"));
        assert_eq!(config.trace_level, "debug");
    }

    #[test]
    fn base_url_without_scheme_falls_back() {
        let config = Config::from_zellij(&map(&[("base_url", "localhost:9000")]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(matches!(
            parse_base_url("ftp://x"),
            Err(PaperLensError::Config(_))
        ));
    }

    #[test]
    fn initialize_uses_named_theme_and_base_url() {
        let config = Config {
            base_url: "http://catalog.test".to_string(),
            theme_name: Some("catppuccin-frappe".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-frappe");
        assert_eq!(state.coordinator.endpoints().base_url(), "http://catalog.test");
    }

    #[test]
    fn initialize_falls_back_on_missing_theme_file() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, Theme::default().name);
    }
}
