//! The closed vocabulary of arXiv top-level categories the catalog filters on.
//!
//! The UI shows human labels ("Computer Science") while the API expects the
//! arXiv archive codes (`cs`). [`Category`] is the single place where the two
//! are mapped.

use std::fmt;

/// An arXiv top-level category offered by the category picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    ComputerScience,
    Mathematics,
    Statistics,
    Economics,
    Physics,
    QuantitativeBiology,
    QuantitativeFinance,
}

impl Category {
    /// Every category in picker order.
    pub const ALL: [Self; 7] = [
        Self::ComputerScience,
        Self::Mathematics,
        Self::Statistics,
        Self::Economics,
        Self::Physics,
        Self::QuantitativeBiology,
        Self::QuantitativeFinance,
    ];

    /// The arXiv archive code sent to the API.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ComputerScience => "cs",
            Self::Mathematics => "math",
            Self::Statistics => "stat",
            Self::Economics => "econ",
            Self::Physics => "physics",
            Self::QuantitativeBiology => "q-bio",
            Self::QuantitativeFinance => "q-fin",
        }
    }

    /// The label shown on chips and in the picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ComputerScience => "Computer Science",
            Self::Mathematics => "Mathematics",
            Self::Statistics => "Statistics",
            Self::Economics => "Economics",
            Self::Physics => "Physics",
            Self::QuantitativeBiology => "Quantitative Biology",
            Self::QuantitativeFinance => "Quantitative Finance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_arxiv_archives() {
        let codes: Vec<&str> = Category::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(
            codes,
            vec!["cs", "math", "stat", "econ", "physics", "q-bio", "q-fin"]
        );
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Category::QuantitativeFinance.to_string(), "Quantitative Finance");
    }
}
