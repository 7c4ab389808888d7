//! Paper and result-page domain models.
//!
//! A [`Paper`] is one catalog entry as served by the API; a [`ResultPage`] is
//! one page of a paginated listing. Both deserialize straight from the wire
//! JSON, including the two shapes the `keywords` field comes in.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A research paper from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// Catalog primary key, also used for the related-papers lookup.
    pub id: i64,

    pub title: String,

    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Keyword chips, trimmed, in server order.
    #[serde(default, deserialize_with = "deserialize_keywords")]
    pub keywords: Vec<String>,

    /// Author names in citation order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Landing page of the paper (arXiv abstract URL). Empty when the
    /// catalog has none; the API sends `null` in that case.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub link: String,

    /// arXiv category string, e.g. `cs.CL` or `quant-ph`.
    #[serde(rename = "categories", default)]
    pub category: String,

    pub published_date: NaiveDate,
}

impl Paper {
    /// Authors joined for display, citation order preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// # use paperlens::domain::Paper;
    /// # let mut paper: Paper = serde_json::from_str(
    /// #     r#"{"id":1,"title":"t","abstract":"a","published_date":"2023-08-14"}"#,
    /// # ).unwrap();
    /// paper.authors = vec!["Alice Smith".into(), "Bob Johnson".into()];
    /// assert_eq!(paper.author_line(), "Alice Smith, Bob Johnson");
    /// ```
    #[must_use]
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }
}

/// The `keywords` field is a comma-separated string in the documented API
/// and a JSON array in the backend's model; accept both.
fn deserialize_keywords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Keywords {
        Joined(String),
        List(Vec<String>),
        Missing(Option<()>),
    }

    let raw = match Keywords::deserialize(deserializer)? {
        Keywords::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        Keywords::List(list) => list,
        Keywords::Missing(_) => Vec::new(),
    };

    Ok(raw
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect())
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of a paginated paper listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPage {
    pub items: Vec<Paper>,
    /// 1-based page number the server actually returned.
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl ResultPage {
    /// Checks the pagination invariants the rest of the plugin relies on.
    ///
    /// `1 <= current_page <= total_pages` whenever `total_items > 0`, and a
    /// page never holds more items than the whole listing.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn validate(&self) -> Result<(), String> {
        if self.items.len() as u64 > self.total_items {
            return Err(format!(
                "page holds {} items but total_items is {}",
                self.items.len(),
                self.total_items
            ));
        }
        if self.total_items > 0
            && (self.current_page == 0 || self.current_page > self.total_pages)
        {
            return Err(format!(
                "current_page {} outside 1..={}",
                self.current_page, self.total_pages
            ));
        }
        Ok(())
    }

    /// Whether a page after this one exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether a page before this one exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper_json(keywords: &str) -> String {
        format!(
            r#"{{
                "id": 1,
                "title": "Deep Learning for NLP",
                "abstract": "This paper explores deep learning for NLP tasks.",
                "keywords": {keywords},
                "authors": ["Alice Smith", "Bob Johnson"],
                "link": "https://arxiv.org/abs/1234.5678",
                "categories": "cs.CL",
                "published_date": "2023-08-14"
            }}"#
        )
    }

    #[test]
    fn keywords_string_is_split_and_trimmed() {
        let paper: Paper =
            serde_json::from_str(&paper_json(r#""deep learning, NLP , ,neural networks""#))
                .unwrap();
        assert_eq!(paper.keywords, vec!["deep learning", "NLP", "neural networks"]);
        assert_eq!(paper.category, "cs.CL");
        assert_eq!(paper.published_date, NaiveDate::from_ymd_opt(2023, 8, 14).unwrap());
    }

    #[test]
    fn keywords_array_is_accepted() {
        let paper: Paper =
            serde_json::from_str(&paper_json(r#"[" quantum computing", "algorithms"]"#)).unwrap();
        assert_eq!(paper.keywords, vec!["quantum computing", "algorithms"]);
    }

    #[test]
    fn null_keywords_become_empty() {
        let paper: Paper = serde_json::from_str(&paper_json("null")).unwrap();
        assert!(paper.keywords.is_empty());
    }

    #[test]
    fn null_link_becomes_empty() {
        let json = paper_json(r#""x""#).replace(r#""https://arxiv.org/abs/1234.5678""#, "null");
        let paper: Paper = serde_json::from_str(&json).unwrap();
        assert!(paper.link.is_empty());

        let json = paper_json(r#""x""#).replace(r#""link": "https://arxiv.org/abs/1234.5678","#, "");
        let paper: Paper = serde_json::from_str(&json).unwrap();
        assert!(paper.link.is_empty());
    }

    #[test]
    fn authors_keep_citation_order() {
        let paper: Paper = serde_json::from_str(&paper_json(r#""x""#)).unwrap();
        assert_eq!(paper.author_line(), "Alice Smith, Bob Johnson");
    }

    #[test]
    fn validate_rejects_page_beyond_total() {
        let page = ResultPage {
            items: vec![],
            current_page: 4,
            total_pages: 3,
            total_items: 6,
        };
        assert!(page.validate().is_err());
    }

    #[test]
    fn validate_accepts_empty_listing() {
        let page = ResultPage {
            items: vec![],
            current_page: 1,
            total_pages: 1,
            total_items: 0,
        };
        assert!(page.validate().is_ok());
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }
}
