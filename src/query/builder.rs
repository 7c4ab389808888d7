//! Canonical query construction.
//!
//! [`build`] is the only way a [`Query`] comes into existence, so every query
//! the plugin sends obeys the same rules: unset filters are omitted,
//! parameters appear in a fixed order, and page 0 means "let the server pick
//! the first page".

use super::filters::FilterCriteria;
use std::fmt;

/// Date format the API's `start_date`/`end_date` filters expect.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Names of the query-string parameters understood by `/api/paper/`.
///
/// Declaration order is serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QueryParam {
    Search,
    Categories,
    StartDate,
    EndDate,
    Page,
}

impl QueryParam {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Categories => "categories",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Page => "page",
        }
    }
}

/// An immutable, ordered set of query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    params: Vec<(QueryParam, String)>,
    page: u32,
}

impl Query {
    /// Raw (unencoded) value of `param`, if present.
    #[must_use]
    pub fn get(&self, param: QueryParam) -> Option<&str> {
        self.params
            .iter()
            .find(|(p, _)| *p == param)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters in serialization order.
    #[must_use]
    pub fn params(&self) -> &[(QueryParam, String)] {
        &self.params
    }

    /// Requested page, `0` when the first page is implied.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Serializes to `?k=v&k=v`, or an empty string without parameters.
    ///
    /// Values are percent-encoded. The comma between category codes is kept
    /// literal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paperlens::query::{build, FilterCriteria};
    ///
    /// let criteria = FilterCriteria { search_text: "graph nets".into(), ..Default::default() };
    /// assert_eq!(build(&criteria, 2).to_query_string(), "?search=graph%20nets&page=2");
    /// assert_eq!(build(&FilterCriteria::default(), 0).to_query_string(), "");
    /// ```
    #[must_use]
    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }

        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|(param, value)| {
                let encoded = match param {
                    QueryParam::Categories => value
                        .split(',')
                        .map(|code| urlencoding::encode(code).into_owned())
                        .collect::<Vec<_>>()
                        .join(","),
                    _ => urlencoding::encode(value).into_owned(),
                };
                format!("{}={encoded}", param.as_str())
            })
            .collect();

        format!("?{}", pairs.join("&"))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Builds the canonical query for `criteria` at `page`.
///
/// - `search` iff the trimmed search text is non-empty (trimmed text is sent)
/// - `categories` iff any are selected, codes comma-joined in selection order
/// - `start_date` / `end_date` iff set, as `YYYY-MM-DD`
/// - `page` iff `page > 0`
#[must_use]
pub fn build(criteria: &FilterCriteria, page: u32) -> Query {
    let mut params = Vec::with_capacity(5);

    let search = criteria.search_text.trim();
    if !search.is_empty() {
        params.push((QueryParam::Search, search.to_string()));
    }

    if !criteria.categories.is_empty() {
        let codes: Vec<&str> = criteria.categories.iter().map(|c| c.code()).collect();
        params.push((QueryParam::Categories, codes.join(",")));
    }

    if let Some(start) = criteria.start_date {
        params.push((QueryParam::StartDate, start.format(DATE_FORMAT).to_string()));
    }

    if let Some(end) = criteria.end_date {
        params.push((QueryParam::EndDate, end.format(DATE_FORMAT).to_string()));
    }

    if page > 0 {
        params.push((QueryParam::Page, page.to_string()));
    }

    Query { params, page }
}
