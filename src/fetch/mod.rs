//! Request lifecycle against the catalog API.
//!
//! The host performs the HTTP call; this module decides what to ask for and
//! what a response means.
//!
//! - [`tracker`]: generation counter enforcing last-trigger-wins
//! - [`request`]: request descriptions, context maps, host responses
//! - [`decode`]: status and payload classification
//! - [`fetcher`]: endpoint URLs and the paper-listing [`ResultFetcher`]

pub mod decode;
pub mod fetcher;
pub mod request;
pub mod tracker;

pub use decode::{decode_page, decode_processing, decode_related};
pub use fetcher::{Endpoints, FetchOutcome, ResultFetcher};
pub use request::{
    FetchRequest, HttpMethod, HttpResponse, RequestKind, ResponseTicket, TraceContext,
};
pub use tracker::{Generation, RequestTracker};
