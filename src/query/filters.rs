//! Filter criteria and the store that accumulates them between searches.
//!
//! Every filter dimension is edited independently and none of the edits
//! issues a request: the store only remembers the latest values until a
//! search or page trigger reads a snapshot.

use crate::domain::Category;
use chrono::NaiveDate;

/// The user's current filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Free-text search, untrimmed exactly as typed.
    pub search_text: String,

    /// Selected categories in selection order, without duplicates.
    pub categories: Vec<Category>,

    /// Earliest publication date (inclusive).
    pub start_date: Option<NaiveDate>,

    /// Latest publication date (inclusive).
    pub end_date: Option<NaiveDate>,
}

/// Holds the latest value of each filter dimension.
///
/// Setters are plain assignments. In particular nothing checks that
/// `start_date <= end_date`; such ranges go to the server unchanged.
///
/// # Example
///
/// ```rust
/// use paperlens::domain::Category;
/// use paperlens::query::FilterStore;
///
/// let mut store = FilterStore::default();
/// store.set_search_text("quantum");
/// store.set_categories([Category::Physics, Category::Physics, Category::ComputerScience]);
///
/// assert_eq!(store.criteria().search_text, "quantum");
/// assert_eq!(store.criteria().categories, vec![Category::Physics, Category::ComputerScience]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    criteria: FilterCriteria,
}

impl FilterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest filter values.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// An owned copy of the latest filter values.
    #[must_use]
    pub fn snapshot(&self) -> FilterCriteria {
        self.criteria.clone()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
    }

    /// Replaces the selection, keeping the first occurrence of each category.
    pub fn set_categories(&mut self, categories: impl IntoIterator<Item = Category>) {
        let mut unique: Vec<Category> = Vec::new();
        for category in categories {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }
        self.criteria.categories = unique;
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.criteria.start_date = date;
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.criteria.end_date = date;
    }

    /// Appends one typed character to the search text.
    pub fn push_search_char(&mut self, c: char) {
        let mut text = self.criteria.search_text.clone();
        text.push(c);
        self.set_search_text(text);
    }

    /// Removes the last character of the search text, if any.
    pub fn pop_search_char(&mut self) {
        let mut text = self.criteria.search_text.clone();
        text.pop();
        self.set_search_text(text);
    }

    /// Selects `category` if unselected, otherwise deselects it.
    ///
    /// A newly selected category goes to the end of the selection order.
    pub fn toggle_category(&mut self, category: Category) {
        let current = &self.criteria.categories;
        let next: Vec<Category> = if current.contains(&category) {
            current.iter().copied().filter(|c| *c != category).collect()
        } else {
            current.iter().copied().chain(std::iter::once(category)).collect()
        };
        self.set_categories(next);
    }

    /// Resets every filter dimension.
    pub fn clear(&mut self) {
        self.set_search_text(String::new());
        self.set_categories([]);
        self.set_start_date(None);
        self.set_end_date(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_replace_values() {
        let mut store = FilterStore::new();
        store.set_search_text("graph");
        store.set_search_text("graph neural");
        let start = NaiveDate::from_ymd_opt(2024, 1, 31);
        store.set_start_date(start);
        store.set_end_date(NaiveDate::from_ymd_opt(2023, 1, 1));

        let criteria = store.snapshot();
        assert_eq!(criteria.search_text, "graph neural");
        assert_eq!(criteria.start_date, start);
        // Reversed ranges are kept as-is.
        assert!(criteria.start_date > criteria.end_date);
    }

    #[test]
    fn toggle_appends_and_removes() {
        let mut store = FilterStore::new();
        store.toggle_category(Category::Physics);
        store.toggle_category(Category::ComputerScience);
        store.toggle_category(Category::Statistics);
        store.toggle_category(Category::Physics);

        assert_eq!(
            store.criteria().categories,
            vec![Category::ComputerScience, Category::Statistics]
        );
    }

    #[test]
    fn search_char_editing() {
        let mut store = FilterStore::new();
        for c in "nlpx".chars() {
            store.push_search_char(c);
        }
        store.pop_search_char();
        assert_eq!(store.criteria().search_text, "nlp");

        store.clear();
        assert_eq!(store.snapshot(), FilterCriteria::default());
    }
}
