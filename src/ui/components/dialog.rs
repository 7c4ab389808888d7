//! Related-articles dialog, drawn as a framed box over the card area.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::RelatedDialogInfo;

const DIALOG_MARGIN: usize = 2;

/// Draws the dialog between `top` and `bottom` (inclusive).
pub fn render_related_dialog(
    top: usize,
    bottom: usize,
    dialog: &RelatedDialogInfo,
    theme: &Theme,
    cols: usize,
) {
    let box_width = cols.saturating_sub(DIALOG_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let body_rows = bottom.saturating_sub(top + 1);

    let title = truncate(&dialog.title, inner_width);
    position_cursor(top, 1);
    print!("{}", " ".repeat(DIALOG_MARGIN));
    print!("{}", Theme::fg(&theme.colors.field_focus));
    print!("┌{title}{}┐", "─".repeat(inner_width.saturating_sub(char_len(&title))));
    print!("{}", Theme::reset());

    let body: Vec<(String, &str)> = dialog.status.as_ref().map_or_else(
        || {
            dialog
                .lines
                .iter()
                .map(|l| (truncate(l, inner_width.saturating_sub(2)), theme.colors.text_normal.as_str()))
                .collect()
        },
        |status| {
            let color = if status.is_error {
                &theme.colors.error_fg
            } else {
                &theme.colors.status_fg
            };
            vec![(truncate(&status.message, inner_width.saturating_sub(2)), color.as_str())]
        },
    );

    for offset in 0..body_rows {
        position_cursor(top + 1 + offset, 1);
        print!("{}", " ".repeat(DIALOG_MARGIN));
        print!("{}│{}", Theme::fg(&theme.colors.field_focus), Theme::reset());

        let (text, color) = body
            .get(offset)
            .map_or(("", theme.colors.text_normal.as_str()), |(t, c)| (t.as_str(), *c));
        print!(" {}{text}{}", Theme::fg(color), Theme::reset());
        print!("{}", " ".repeat(inner_width.saturating_sub(char_len(text) + 1)));

        print!("{}│{}", Theme::fg(&theme.colors.field_focus), Theme::reset());
    }

    position_cursor(bottom, 1);
    print!("{}", " ".repeat(DIALOG_MARGIN));
    print!("{}", Theme::fg(&theme.colors.field_focus));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());
}
