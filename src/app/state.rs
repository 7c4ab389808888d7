//! Application state and view model computation.
//!
//! [`AppState`] owns every piece of transient plugin state: the filter
//! store, the coordinator with its view state, the related dialog, the
//! preprocessing trigger, focus and selection. It is mutated only by the
//! event handler; the renderer reads it through [`AppState::compute_viewmodel`].

use super::coordinator::PaginationCoordinator;
use super::modes::{DateInput, Focus};
use super::processing::{ProcessingState, ProcessingTrigger};
use super::related::{RelatedLookup, RelatedState};
use super::view_state::ViewState;
use crate::domain::{Category, Paper};
use crate::fetch::Endpoints;
use crate::query::{FilterStore, QueryParam};
use crate::ui::helpers::{coalesce_ranges, truncate, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, CategoryChip, FieldInfo, FilterBarInfo, FooterInfo, HeaderInfo, PaginationInfo,
    RelatedDialogInfo, StatusInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Lines one card occupies: title, meta, authors, two abstract lines,
/// keywords, spacer.
pub const CARD_HEIGHT: usize = 7;

/// Rows used by everything except the cards.
const CHROME_ROWS: usize = 11;

const ABSTRACT_LINES: usize = 2;

#[derive(Debug, Clone)]
pub struct AppState {
    /// Filter values as last edited; read by every trigger.
    pub filters: FilterStore,

    /// Paper listing requests and the resulting [`ViewState`].
    pub coordinator: PaginationCoordinator,

    pub related: RelatedLookup,

    pub processing: ProcessingTrigger,

    pub focus: Focus,

    /// Index into [`Category::ALL`] of the highlighted chip.
    pub category_cursor: usize,

    pub start_date: DateInput,
    pub end_date: DateInput,

    /// Selected card on the displayed page.
    pub selected_index: usize,

    /// Host refused web access; triggers fail locally until it is granted.
    pub web_access_denied: bool,

    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(endpoints: Endpoints, number_of_articles: u32, theme: Theme) -> Self {
        Self {
            filters: FilterStore::new(),
            coordinator: PaginationCoordinator::new(endpoints),
            related: RelatedLookup::default(),
            processing: ProcessingTrigger::new(number_of_articles),
            focus: Focus::Results,
            category_cursor: 0,
            start_date: DateInput::default(),
            end_date: DateInput::default(),
            selected_index: 0,
            web_access_denied: false,
            theme,
        }
    }

    #[must_use]
    pub const fn view(&self) -> &ViewState {
        self.coordinator.view()
    }

    fn papers(&self) -> &[Paper] {
        self.view()
            .page()
            .map_or(&[][..], |page| page.items.as_slice())
    }

    #[must_use]
    pub fn selected_paper(&self) -> Option<&Paper> {
        self.papers().get(self.selected_index)
    }

    /// Wraps to the first card past the last one.
    pub fn move_selection_down(&mut self) {
        let count = self.papers().len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Wraps to the last card before the first one.
    pub fn move_selection_up(&mut self) {
        let count = self.papers().len();
        if count == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            count - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Category under the chip cursor.
    #[must_use]
    pub fn category_at_cursor(&self) -> Category {
        Category::ALL[self.category_cursor % Category::ALL.len()]
    }

    pub fn move_category_cursor(&mut self, forward: bool) {
        let len = Category::ALL.len();
        self.category_cursor = if forward {
            (self.category_cursor + 1) % len
        } else {
            (self.category_cursor + len - 1) % len
        };
    }

    /// Copies the date fields into the filter store.
    ///
    /// Unparsable text clears the corresponding filter.
    pub fn sync_dates(&mut self) {
        self.filters.set_start_date(self.start_date.date());
        self.filters.set_end_date(self.end_date.date());
    }

    /// Builds the view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let card_width = cols.saturating_sub(4);
        let capacity = (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1);

        let (cards, status, pagination) = match self.view() {
            ViewState::Loaded(page) => {
                let mut visible_start = self.selected_index.saturating_sub(capacity / 2);
                let visible_end = (visible_start + capacity).min(page.items.len());
                if visible_end - visible_start < capacity && page.items.len() >= capacity {
                    visible_start = visible_end.saturating_sub(capacity);
                }
                let visible_start = visible_start.min(visible_end);

                let search = self
                    .coordinator
                    .shown_query()
                    .and_then(|q| q.get(QueryParam::Search))
                    .unwrap_or_default();
                let matcher = (!search.is_empty()).then(SkimMatcherV2::default);

                let cards = page.items[visible_start..visible_end]
                    .iter()
                    .enumerate()
                    .map(|(offset, paper)| {
                        Self::compute_card(
                            paper,
                            visible_start + offset == self.selected_index,
                            card_width,
                            search,
                            matcher.as_ref(),
                        )
                    })
                    .collect();

                let pagination = PaginationInfo {
                    text: format!(
                        "page {} of {} ({} papers)",
                        page.current_page, page.total_pages, page.total_items
                    ),
                    has_previous: page.has_previous(),
                    has_next: page.has_next(),
                };
                (cards, None, Some(pagination))
            }
            other => {
                let status = other.message().map(|message| StatusInfo {
                    message,
                    is_error: matches!(other, ViewState::Failed(_)),
                });
                (vec![], status, None)
            }
        };

        UIViewModel {
            header: HeaderInfo {
                title: "PaperLens".to_string(),
                source: catalog_host(self.coordinator.endpoints().base_url()).to_string(),
            },
            filter_bar: self.compute_filter_bar(),
            cards,
            status,
            pagination,
            related: self.compute_related(card_width),
            footer: self.compute_footer(),
        }
    }

    fn compute_card(
        paper: &Paper,
        is_selected: bool,
        width: usize,
        search: &str,
        matcher: Option<&SkimMatcherV2>,
    ) -> CardItem {
        let title = truncate(&paper.title, width);
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            Self::compute_highlight_ranges(&title, search, m)
        });

        let meta = if paper.category.is_empty() {
            paper.published_date.to_string()
        } else {
            format!("{} | {}", paper.published_date, paper.category)
        };

        CardItem {
            title,
            highlight_ranges,
            meta,
            authors: truncate(&paper.author_line(), width),
            abstract_lines: wrap_text(&paper.abstract_text, width, ABSTRACT_LINES),
            keywords: paper.keywords.clone(),
            is_selected,
        }
    }

    /// Character ranges of `text` matched by any word of `search`.
    ///
    /// Each word is fuzzy-matched separately; the matched indices are merged
    /// and coalesced into contiguous runs.
    fn compute_highlight_ranges(
        text: &str,
        search: &str,
        matcher: &SkimMatcherV2,
    ) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let mut indices: Vec<usize> = search
            .split_whitespace()
            .filter_map(|word| matcher.fuzzy_indices(text, word))
            .flat_map(|(_score, indices)| indices)
            .collect();
        indices.sort_unstable();
        indices.dedup();

        coalesce_ranges(&indices)
    }

    fn compute_filter_bar(&self) -> FilterBarInfo {
        let criteria = self.filters.criteria();
        let categories = Category::ALL
            .iter()
            .enumerate()
            .map(|(idx, category)| CategoryChip {
                label: category.label(),
                selected: criteria.categories.contains(category),
                under_cursor: self.focus == Focus::Categories && idx == self.category_cursor,
            })
            .collect();

        FilterBarInfo {
            search: FieldInfo {
                label: "Search",
                text: criteria.search_text.clone(),
                focused: self.focus == Focus::Search,
                invalid: false,
            },
            categories,
            categories_focused: self.focus == Focus::Categories,
            start_date: FieldInfo {
                label: "From",
                text: self.start_date.text().to_string(),
                focused: self.focus == Focus::StartDate,
                invalid: self.start_date.is_invalid(),
            },
            end_date: FieldInfo {
                label: "To",
                text: self.end_date.text().to_string(),
                focused: self.focus == Focus::EndDate,
                invalid: self.end_date.is_invalid(),
            },
        }
    }

    fn compute_related(&self, width: usize) -> Option<RelatedDialogInfo> {
        let title = format!(
            " Related to: {} ",
            truncate(self.related.source_title().unwrap_or_default(), width.saturating_sub(16))
        );

        let (lines, status) = match self.related.state() {
            RelatedState::Closed => return None,
            RelatedState::Loading => (
                vec![],
                Some(StatusInfo {
                    message: "Loading related papers...".to_string(),
                    is_error: false,
                }),
            ),
            RelatedState::Empty => (
                vec![],
                Some(StatusInfo {
                    message: "No related papers".to_string(),
                    is_error: false,
                }),
            ),
            RelatedState::Failed(error) => (
                vec![],
                Some(StatusInfo {
                    message: format!("Request failed: {error}"),
                    is_error: true,
                }),
            ),
            RelatedState::Loaded(papers) => {
                let lines = papers
                    .iter()
                    .map(|p| {
                        truncate(
                            &format!("{}  {}", p.published_date, p.title),
                            width.saturating_sub(4),
                        )
                    })
                    .collect();
                (lines, None)
            }
        };

        Some(RelatedDialogInfo {
            title,
            lines,
            status,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings: Vec<(&'static str, &'static str)> = if self.related.is_open() {
            vec![("Esc/r", "close")]
        } else {
            match self.focus {
                Focus::Results => vec![
                    ("j/k", "select"),
                    ("n/p", "page"),
                    ("/", "search"),
                    ("c", "categories"),
                    ("f/t", "dates"),
                    ("s", "run"),
                    ("x", "clear"),
                    ("r", "related"),
                    ("o", "open"),
                    ("P", "prepare"),
                    ("q", "quit"),
                ],
                Focus::Search => vec![("Enter", "search"), ("Tab", "next field"), ("Esc", "back")],
                Focus::Categories => vec![
                    ("h/l", "move"),
                    ("Space", "toggle"),
                    ("Enter", "search"),
                    ("Tab", "next field"),
                    ("Esc", "back"),
                ],
                Focus::StartDate | Focus::EndDate => vec![
                    ("YYYY-MM-DD", "format"),
                    ("Enter", "search"),
                    ("Tab", "next field"),
                    ("Esc", "back"),
                ],
            }
        };

        let notice = match self.processing.state() {
            ProcessingState::Idle => None,
            ProcessingState::Starting => Some(StatusInfo {
                message: "Requesting preprocessing...".to_string(),
                is_error: false,
            }),
            ProcessingState::Started(message) => Some(StatusInfo {
                message: message.clone(),
                is_error: false,
            }),
            ProcessingState::Failed(error) => Some(StatusInfo {
                message: format!("Preprocessing failed: {error}"),
                is_error: true,
            }),
        };

        FooterInfo {
            keybindings,
            notice,
        }
    }
}

/// Base URL without its scheme, for the header.
fn catalog_host(base_url: &str) -> &str {
    base_url
        .split_once("://")
        .map_or(base_url, |(_, rest)| rest)
}
