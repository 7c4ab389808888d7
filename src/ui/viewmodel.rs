//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready data only: text is already
//! wrapped and truncated, and highlight ranges are precomputed.

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Search, category and date fields.
    pub filter_bar: FilterBarInfo,

    /// Cards in the visible window.
    pub cards: Vec<CardItem>,

    /// Loading, empty or failure message replacing the cards.
    pub status: Option<StatusInfo>,

    /// `page X of Y (N papers)` line, only for a loaded page.
    pub pagination: Option<PaginationInfo>,

    /// Related-articles dialog drawn over the cards when open.
    pub related: Option<RelatedDialogInfo>,

    pub footer: FooterInfo,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    /// Catalog host the results come from, shown on the right.
    pub source: String,
}

#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub search: FieldInfo,
    pub categories: Vec<CategoryChip>,
    pub categories_focused: bool,
    pub start_date: FieldInfo,
    pub end_date: FieldInfo,
}

/// One editable text field.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub label: &'static str,
    pub text: String,
    pub focused: bool,
    /// Text is present but not accepted (e.g. not a date).
    pub invalid: bool,
}

#[derive(Debug, Clone)]
pub struct CategoryChip {
    pub label: &'static str,
    pub selected: bool,
    pub under_cursor: bool,
}

/// One paper card.
#[derive(Debug, Clone)]
pub struct CardItem {
    pub title: String,

    /// Character ranges of `title` matching the search, `(start, end)`.
    pub highlight_ranges: Vec<(usize, usize)>,

    /// Published date and category.
    pub meta: String,

    /// Authors in citation order, already joined.
    pub authors: String,

    /// Abstract wrapped to the card width.
    pub abstract_lines: Vec<String>,

    pub keywords: Vec<String>,

    pub is_selected: bool,
}

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub message: String,
    pub is_error: bool,
}

#[derive(Debug, Clone)]
pub struct PaginationInfo {
    pub text: String,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone)]
pub struct RelatedDialogInfo {
    pub title: String,
    /// One line per related paper.
    pub lines: Vec<String>,
    /// Loading, empty or failure text instead of `lines`.
    pub status: Option<StatusInfo>,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// `(key, action)` hints for the current focus.
    pub keybindings: Vec<(&'static str, &'static str)>,
    /// State of the preprocessing trigger, if it was used.
    pub notice: Option<StatusInfo>,
}
