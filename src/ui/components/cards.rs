//! Paper card list renderer.

use crate::app::state::CARD_HEIGHT;
use crate::ui::helpers::{self, char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, PaginationInfo, StatusInfo};

/// Renders the visible cards from `row`; returns the next free row.
pub fn render_cards(row: usize, cards: &[CardItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        render_card(current_row, card, theme, cols);
        current_row += CARD_HEIGHT;
    }
    current_row
}

/// One card:
///
/// ```text
/// ▌ Title with matches highlighted
/// ▌ 2023-08-14 | cs.CL
/// ▌ Alice Smith, Bob Johnson
/// ▌ First abstract line
/// ▌ second abstract line...
/// ▌ #keyword #keyword
/// ```
///
/// The bar is only drawn for the selected card.
fn render_card(row: usize, card: &CardItem, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(4);
    let marker = |r: usize| {
        position_cursor(r, 1);
        if card.is_selected {
            print!("{}▌ {}", Theme::fg(&theme.colors.selection_bg), Theme::reset());
        } else {
            print!("  ");
        }
    };

    marker(row);
    if card.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.title_fg));
    }
    helpers::render_highlighted_text(&card.title, &card.highlight_ranges, theme, card.is_selected);
    print!("{}", " ".repeat(width.saturating_sub(char_len(&card.title))));
    print!("{}", Theme::reset());

    marker(row + 1);
    print_padded(&card.meta, &theme.colors.text_dim, width);

    marker(row + 2);
    print_padded(&card.authors, &theme.colors.text_normal, width);

    for offset in 0..2 {
        marker(row + 3 + offset);
        let line = card.abstract_lines.get(offset).map_or("", String::as_str);
        print_padded(line, &theme.colors.text_normal, width);
    }

    marker(row + 5);
    let chips: Vec<String> = card.keywords.iter().map(|k| format!("#{k}")).collect();
    print_padded(&truncate(&chips.join(" "), width), &theme.colors.chip_fg, width);

    position_cursor(row + 6, 1);
    print!("{}", " ".repeat(cols));
}

fn print_padded(text: &str, color: &str, width: usize) {
    print!("{}{text}", Theme::fg(color));
    print!("{}", " ".repeat(width.saturating_sub(char_len(text))));
    print!("{}", Theme::reset());
}

/// Renders a centered loading, empty or failure message at `row`.
pub fn render_status(row: usize, status: &StatusInfo, theme: &Theme, cols: usize) {
    let message = truncate(&status.message, cols);
    let len = char_len(&message);
    let padding = cols.saturating_sub(len) / 2;
    let color = if status.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.status_fg
    };

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}

/// Renders `< page X of Y (N papers) >` on the left and `notice` on the right.
pub fn render_pagination(
    row: usize,
    pagination: Option<&PaginationInfo>,
    notice: Option<&StatusInfo>,
    theme: &Theme,
    cols: usize,
) {
    position_cursor(row, 1);
    let mut used = 0;

    if let Some(info) = pagination {
        let prev = if info.has_previous { "<" } else { " " };
        let next = if info.has_next { ">" } else { " " };
        let text = format!(" {prev} {} {next}", info.text);
        print!("{}{text}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        used = char_len(&text);
    }

    if let Some(notice) = notice {
        let text = truncate(&notice.message, cols.saturating_sub(used + 2));
        let gap = cols.saturating_sub(used + char_len(&text) + 1);
        let color = if notice.is_error {
            &theme.colors.error_fg
        } else {
            &theme.colors.status_fg
        };
        print!("{}", " ".repeat(gap));
        print!("{}{text} {}", Theme::fg(color), Theme::reset());
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    }
}
