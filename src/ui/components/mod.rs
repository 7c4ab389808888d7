//! Composable UI component renderers.
//!
//! - [`header`]: title bar
//! - [`filter_bar`]: search, category and date fields
//! - [`cards`]: paper cards, status message, pagination line
//! - [`dialog`]: related-articles overlay
//! - [`footer`]: keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Filter bar - 3 lines]
//! [Border]
//! [Cards, or a status message]   <- related dialog drawn over this area
//! [Pagination | notice]
//! [Border]
//! [Footer]
//! ```

mod cards;
mod dialog;
mod filter_bar;
mod footer;
mod header;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use cards::{render_cards, render_pagination, render_status};
use dialog::render_related_dialog;
use filter_bar::render_filter_bar;
use footer::render_footer;
use header::render_header;

/// Renders a horizontal border at `row` and returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole frame.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_filter_bar(current_row, &vm.filter_bar, theme, cols);
    let content_top = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let pagination_row = border_row.saturating_sub(1);
    let content_bottom = pagination_row.saturating_sub(1);

    if let Some(status) = &vm.status {
        let middle = content_top + content_bottom.saturating_sub(content_top) / 2;
        render_status(middle, status, theme, cols);
    } else {
        render_cards(content_top, &vm.cards, theme, cols);
    }

    if let Some(dialog) = &vm.related {
        if content_bottom > content_top + 1 {
            render_related_dialog(content_top, content_bottom, dialog, theme, cols);
        }
    }

    render_pagination(
        pagination_row,
        vm.pagination.as_ref(),
        vm.footer.notice.as_ref(),
        theme,
        cols,
    );
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
