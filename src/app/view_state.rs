//! Rendering-facing state of the result list.

use crate::domain::{FetchError, ResultPage};
use crate::fetch::FetchOutcome;

/// What the result area currently shows. Exactly one case is active.
///
/// Starts as `Loading`, returns to `Loading` whenever a query is triggered,
/// and leaves it only through the outcome of the tracked request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Loading,
    Loaded(ResultPage),
    Empty,
    Failed(FetchError),
}

impl ViewState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The displayed page, if any.
    #[must_use]
    pub const fn page(&self) -> Option<&ResultPage> {
        match self {
            Self::Loaded(page) => Some(page),
            _ => None,
        }
    }

    /// Status line for the non-loaded states.
    ///
    /// `Empty` and `Failed` always produce different text.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Loading => Some("Loading papers...".to_string()),
            Self::Loaded(_) => None,
            Self::Empty => Some("No results".to_string()),
            Self::Failed(error) => Some(format!("Request failed: {error}")),
        }
    }
}

impl From<FetchOutcome> for ViewState {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Loaded(page) => Self::Loaded(page),
            FetchOutcome::Empty => Self::Empty,
            FetchOutcome::Failed(error) => Self::Failed(error),
        }
    }
}
