//! Title bar: plugin name on the left, catalog host on the right.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = format!(" {} ", header.title);
    let title_len = char_len(&title);
    let source = truncate(&header.source, cols.saturating_sub(title_len + 2));
    let source_len = char_len(&source);

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}{}{title}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{}", Theme::reset());

    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    let gap = cols.saturating_sub(title_len + source_len + 1);
    print!("{}", " ".repeat(gap));
    print!("{}{source} ", Theme::fg(&theme.colors.text_dim));
    print!("{}", Theme::reset());
    row + 1
}
