//! Error types for the paperlens plugin.
//!
//! Two layers of errors live here. [`FetchError`] is the closed set of reasons
//! a catalog request can fail; it is carried inside view states and rendered
//! to the user, so it is cheap to clone and compare. [`PaperLensError`] is the
//! crate-level error returned by fallible plugin operations, with a
//! [`Result`] alias for convenience.

use thiserror::Error;

/// Why a request against the catalog API did not produce usable data.
///
/// Every variant is recoverable: the user re-triggers the search (or the
/// lookup) and a fresh request is issued. Nothing here is retried
/// automatically.
///
/// # Examples
///
/// ```
/// use paperlens::domain::FetchError;
///
/// let err = FetchError::NonSuccessStatus(500);
/// assert_eq!(err.to_string(), "server responded with HTTP 500");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never reached the server (DNS, refused connection, TLS).
    ///
    /// The string is the transport error text reported by the host.
    #[error("catalog server unreachable: {0}")]
    NetworkUnreachable(String),

    /// The server answered with a status outside `200..=299`.
    #[error("server responded with HTTP {0}")]
    NonSuccessStatus(u16),

    /// The body was not the JSON shape the endpoint promises, or it broke a
    /// pagination invariant.
    #[error("malformed response payload: {0}")]
    MalformedPayload(String),
}

/// The main error type for paperlens plugin operations.
#[derive(Debug, Error)]
pub enum PaperLensError {
    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The host delivered a web response whose context map we cannot route.
    ///
    /// Happens when a response lacks the `kind` or `generation` entries that
    /// every outgoing request carries.
    #[error("Request context error: {0}")]
    Context(String),

    /// A catalog request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// A specialized `Result` type for paperlens operations.
pub type Result<T> = std::result::Result<T, PaperLensError>;
