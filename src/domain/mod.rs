//! Domain layer for the paperlens plugin.
//!
//! Core catalog types, independent of Zellij APIs and of how requests are
//! transported.
//!
//! # Organization
//!
//! - [`category`]: the closed arXiv category vocabulary
//! - [`error`]: fetch failure reasons and the crate error type
//! - [`paper`]: paper and result-page models
//!
//! # Examples
//!
//! ```
//! use paperlens::domain::{Category, FetchError};
//!
//! assert_eq!(Category::Physics.code(), "physics");
//! assert_ne!(FetchError::NonSuccessStatus(500), FetchError::NonSuccessStatus(404));
//! ```

pub mod category;
pub mod error;
pub mod paper;

pub use category::Category;
pub use error::{FetchError, PaperLensError, Result};
pub use paper::{Paper, ResultPage};
