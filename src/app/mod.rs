//! Application layer coordinating state, events, and actions.
//!
//! ```text
//! Key / host events → Event → handle_event → AppState mutation → Actions → host
//!                                                  ↑                   │
//!                                                  └── WebResponse ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the handler
//! - [`coordinator`]: search/page triggers and last-trigger-wins resolution
//! - [`handler`]: event processing
//! - [`modes`]: input focus and date field editing
//! - [`processing`]: the preprocessing trigger
//! - [`related`]: the related-articles dialog
//! - [`state`]: state container and view model computation
//! - [`view_state`]: loading / loaded / empty / failed

pub mod actions;
pub mod coordinator;
pub mod handler;
pub mod modes;
pub mod processing;
pub mod related;
pub mod state;
pub mod view_state;

pub use actions::Action;
pub use coordinator::PaginationCoordinator;
pub use handler::{handle_event, Event};
pub use modes::{DateInput, Focus};
pub use processing::{ProcessingState, ProcessingTrigger};
pub use related::{RelatedLookup, RelatedState};
pub use state::AppState;
pub use view_state::ViewState;
