//! Shared rendering utilities.
//!
//! Text helpers here work on `char` indices, never byte offsets, so titles
//! and abstracts with non-ASCII characters wrap and highlight correctly.

use crate::ui::theme::Theme;

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to `max` characters, ending with `...` when shortened.
///
/// ```rust
/// use paperlens::ui::helpers::truncate;
///
/// assert_eq!(truncate("Attention Is All You Need", 12), "Attention...");
/// assert_eq!(truncate("short", 12), "short");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if char_len(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Greedy word wrap to `width` columns, at most `max_lines` lines.
///
/// The last line is truncated with `...` when text remains. Words longer
/// than `width` are cut.
#[must_use]
pub fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return vec![];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut overflow = false;

    for word in text.split_whitespace() {
        let word = truncate(word, width);
        let needed = if current.is_empty() {
            char_len(&word)
        } else {
            char_len(&current) + 1 + char_len(&word)
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
            continue;
        }

        lines.push(std::mem::take(&mut current));
        if lines.len() == max_lines {
            overflow = true;
            break;
        }
        current = word;
    }

    if !overflow && !current.is_empty() {
        lines.push(current);
    }

    if overflow {
        if let Some(last) = lines.last_mut() {
            let kept: String = last.chars().take(width.saturating_sub(3)).collect();
            *last = format!("{}...", kept.trim_end());
        }
    }

    lines
}

/// Coalesces sorted, deduplicated character indices into `(start, end)` runs.
#[must_use]
pub fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Prints `text` with the given character ranges highlighted.
///
/// Ranges must be sorted and non-overlapping; out-of-bounds parts are
/// ignored. On a selected card the selection colors are restored after
/// every highlighted run.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());

        if is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.title_fg));
        }

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Schrödinger equation", 11), "Schrödin...");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn wrap_respects_width_and_line_limit() {
        let text = "We study the sample complexity of learning sparse parity functions";
        let lines = wrap_text(text, 20, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| char_len(l) <= 20));
        assert!(lines[1].ends_with("..."));
    }

    #[test]
    fn wrap_short_text_is_one_line() {
        assert_eq!(wrap_text("graph  neural\nnets", 40, 3), vec!["graph neural nets"]);
        assert!(wrap_text("", 40, 3).is_empty());
    }

    #[test]
    fn coalesce_joins_consecutive_indices() {
        assert_eq!(coalesce_ranges(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
        assert!(coalesce_ranges(&[]).is_empty());
    }
}
