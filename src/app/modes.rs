//! Input focus and filter-field editing state.
//!
//! Keys are interpreted according to [`Focus`]: on the result list they
//! navigate and trigger, inside a filter field they edit that field only.

use chrono::NaiveDate;

/// Which part of the UI receives typed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Card list; navigation and command keys are active.
    #[default]
    Results,
    /// Free-text search field.
    Search,
    /// Category chips; the cursor marks the chip `Space` toggles.
    Categories,
    StartDate,
    EndDate,
}

impl Focus {
    /// Next filter field in Tab order, wrapping past the end date.
    #[must_use]
    pub const fn next_field(self) -> Self {
        match self {
            Self::Results | Self::EndDate => Self::Search,
            Self::Search => Self::Categories,
            Self::Categories => Self::StartDate,
            Self::StartDate => Self::EndDate,
        }
    }
}

/// Raw text of a date field and what it currently parses to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateInput {
    text: String,
}

impl DateInput {
    const FORMAT: &'static str = "%Y-%m-%d";

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push(&mut self, c: char) {
        if c.is_ascii_digit() || c == '-' {
            self.text.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }

    /// The date entered, or `None` for empty or unparsable text.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.text.trim(), Self::FORMAT).ok()
    }

    /// Non-empty text that is not a calendar date.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.text.trim().is_empty() && self.date().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycles_through_fields() {
        let mut focus = Focus::Results;
        let mut seen = vec![];
        for _ in 0..5 {
            focus = focus.next_field();
            seen.push(focus);
        }
        assert_eq!(
            seen,
            vec![
                Focus::Search,
                Focus::Categories,
                Focus::StartDate,
                Focus::EndDate,
                Focus::Search
            ]
        );
    }

    #[test]
    fn date_input_parses_complete_dates_only() {
        let mut input = DateInput::default();
        assert_eq!(input.date(), None);
        assert!(!input.is_invalid());

        for c in "2023-02-".chars() {
            input.push(c);
        }
        assert!(input.is_invalid());

        input.push('3');
        input.push('0');
        assert!(input.is_invalid());
        input.pop();
        input.pop();
        input.push('2');
        input.push('8');
        assert_eq!(input.date(), NaiveDate::from_ymd_opt(2023, 2, 28));
    }

    #[test]
    fn date_input_ignores_letters() {
        let mut input = DateInput::default();
        input.push('x');
        assert_eq!(input.text(), "");
    }
}
