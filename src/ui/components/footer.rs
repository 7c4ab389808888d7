//! Keybinding hints, one `key action` pair after another.
//!
//! Pairs that do not fit the pane width are dropped from the end.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

const SEPARATOR: &str = "  ";

pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 2);

    let mut used = 1;
    for (index, (key, action)) in footer.keybindings.iter().enumerate() {
        let sep = if index == 0 { "" } else { SEPARATOR };
        let width = char_len(sep) + char_len(key) + 1 + char_len(action);
        if used + width > cols {
            break;
        }
        used += width;

        print!("{sep}");
        print!("{}{}{key}{}", Theme::bold(), Theme::fg(&theme.colors.field_focus), Theme::reset());
        print!(" {}{action}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    }
    row + 1
}
