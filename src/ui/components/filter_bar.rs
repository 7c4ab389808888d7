//! Filter bar: search field, category chips, date range.
//!
//! ```text
//!  Search: graph neural_
//!  Categories: [Computer Science] [Mathematics] ...
//!  From: 2023-01-01   To: 2023-1x (invalid)
//! ```

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CategoryChip, FieldInfo, FilterBarInfo};

const DATE_FIELD_WIDTH: usize = 10;

/// Renders the three filter rows starting at `row`; returns the next free row.
pub fn render_filter_bar(row: usize, bar: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let used = render_field(&bar.search, cols.saturating_sub(12), theme);
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    position_cursor(row + 1, 1);
    let used = render_chips(&bar.categories, bar.categories_focused, theme, cols);
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    position_cursor(row + 2, 1);
    let mut used = render_field(&bar.start_date, DATE_FIELD_WIDTH, theme);
    print!("   ");
    used += 3 + render_field(&bar.end_date, DATE_FIELD_WIDTH, theme);
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    row + 3
}

/// Prints ` Label: text` and returns the printed width.
fn render_field(field: &FieldInfo, max_text: usize, theme: &Theme) -> usize {
    let label_color = if field.focused {
        &theme.colors.field_focus
    } else {
        &theme.colors.field_border
    };

    print!("{}", Theme::fg(label_color));
    if field.focused {
        print!("{}", Theme::bold());
    }
    print!(" {}: ", field.label);
    print!("{}", Theme::reset());

    let text = truncate(&field.text, max_text);
    let text_color = if field.invalid {
        &theme.colors.error_fg
    } else {
        &theme.colors.text_normal
    };
    print!("{}{text}", Theme::fg(text_color));

    let mut width = char_len(field.label) + 3 + char_len(&text);
    if field.focused {
        print!("{}_", Theme::fg(&theme.colors.field_focus));
        width += 1;
    }
    if field.invalid {
        print!("{} (invalid)", Theme::fg(&theme.colors.error_fg));
        width += 10;
    }
    print!("{}", Theme::reset());
    width
}

/// Prints the category chips, stopping before the pane edge.
fn render_chips(chips: &[CategoryChip], focused: bool, theme: &Theme, cols: usize) -> usize {
    let label_color = if focused {
        &theme.colors.field_focus
    } else {
        &theme.colors.field_border
    };
    print!("{} Categories: {}", Theme::fg(label_color), Theme::reset());
    let mut width = 13;

    for chip in chips {
        let text = format!("[{}]", chip.label);
        let chip_width = char_len(&text) + 1;
        if width + chip_width > cols {
            break;
        }

        if chip.selected {
            print!("{}", Theme::fg(&theme.colors.chip_selected_fg));
            print!("{}", Theme::bg(&theme.colors.chip_selected_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.chip_fg));
        }
        if chip.under_cursor {
            print!("{}", Theme::bold());
            print!("\u{1b}[4m");
        }
        print!("{text}");
        print!("{} ", Theme::reset());
        width += chip_width;
    }
    width
}
