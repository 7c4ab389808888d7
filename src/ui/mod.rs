//! User interface rendering layer.
//!
//! The UI is a pure function of [`AppState`](crate::app::AppState): state is
//! turned into an immutable [`UIViewModel`], which the components print as
//! ANSI text.
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready data for one frame
//! - [`renderer`]: the [`render`] entry point
//! - [`components`]: per-region renderers
//! - [`helpers`]: text wrapping, truncation, highlighting
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CardItem, CategoryChip, FieldInfo, FilterBarInfo, FooterInfo, HeaderInfo, PaginationInfo,
    RelatedDialogInfo, StatusInfo, UIViewModel,
};
