//! Query composition: filter accumulation and canonical query building.
//!
//! - [`filters`]: [`FilterCriteria`] and the [`FilterStore`] that holds them
//! - [`builder`]: the pure [`build`] function producing a [`Query`]

pub mod builder;
pub mod filters;

pub use builder::{build, Query, QueryParam};
pub use filters::{FilterCriteria, FilterStore};
