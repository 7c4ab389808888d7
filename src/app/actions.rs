//! Side effects requested by the event handler.
//!
//! The handler never talks to the host. It returns `Action`s and the plugin
//! shim executes them in order.

use crate::fetch::FetchRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends an HTTP request through the host.
    ///
    /// The response comes back as a web-request event carrying the request's
    /// context map.
    WebRequest(FetchRequest),

    /// Opens a paper's landing page in the host's browser.
    OpenLink {
        url: String,
    },
}
