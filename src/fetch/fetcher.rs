//! The paper-listing fetcher.
//!
//! A fetch is split across the host boundary: [`ResultFetcher::begin`]
//! produces the request for the shim to send, and [`ResultFetcher::resolve`]
//! classifies whatever the host eventually delivers. Only the most recently
//! begun request can resolve; everything older is dropped.

use super::decode::decode_page;
use super::request::{FetchRequest, HttpMethod, HttpResponse, RequestKind};
use super::tracker::{Generation, RequestTracker};
use crate::domain::{Category, FetchError, ResultPage};
use crate::query::Query;

/// URL layout of the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// `base_url` is used without its trailing slashes.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET` target for a paper listing query.
    ///
    /// ```rust
    /// use paperlens::fetch::Endpoints;
    /// use paperlens::query::{build, FilterCriteria};
    ///
    /// let endpoints = Endpoints::new("http://localhost:8000/");
    /// assert_eq!(
    ///     endpoints.papers_url(&build(&FilterCriteria::default(), 2)),
    ///     "http://localhost:8000/api/paper/?page=2"
    /// );
    /// ```
    #[must_use]
    pub fn papers_url(&self, query: &Query) -> String {
        format!("{}/api/paper/{}", self.base_url, query.to_query_string())
    }

    #[must_use]
    pub fn related_url(&self, paper_id: i64) -> String {
        format!("{}/api/related/{paper_id}/", self.base_url)
    }

    /// `POST` target that asks the server to collect and index new papers.
    #[must_use]
    pub fn preprocess_url(&self, number_of_articles: u32, categories: &[Category]) -> String {
        let mut url = format!(
            "{}/api/start-preprocess/?number_articles={number_of_articles}",
            self.base_url
        );
        if !categories.is_empty() {
            let codes: Vec<&str> = categories.iter().map(|c| c.code()).collect();
            url.push_str("&categories=");
            url.push_str(&codes.join(","));
        }
        url
    }
}

/// Terminal outcome of a paper-listing fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(ResultPage),
    Empty,
    Failed(FetchError),
}

impl FetchOutcome {
    /// Classifies a host response (or transport failure).
    #[must_use]
    pub fn classify(response: Result<HttpResponse, FetchError>) -> Self {
        match response.and_then(|r| decode_page(&r)) {
            Ok(page) if page.total_items == 0 || page.items.is_empty() => Self::Empty,
            Ok(page) => Self::Loaded(page),
            Err(error) => Self::Failed(error),
        }
    }
}

/// Issues paper-listing requests, one tracked at a time.
#[derive(Debug, Clone)]
pub struct ResultFetcher {
    endpoints: Endpoints,
    tracker: RequestTracker,
}

impl ResultFetcher {
    #[must_use]
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            tracker: RequestTracker::default(),
        }
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Starts a fetch for `query`, making any unresolved earlier fetch stale.
    pub fn begin(&mut self, query: &Query) -> FetchRequest {
        let generation = self.tracker.begin();
        let url = self.endpoints.papers_url(query);
        tracing::debug!(%generation, page = query.page(), %url, "begin paper fetch");
        FetchRequest::new(RequestKind::Papers, generation, HttpMethod::Get, url)
    }

    /// Resolves the fetch tagged `generation`.
    ///
    /// Returns `None` when that fetch is no longer the tracked one; the
    /// response is then ignored entirely, whether it succeeded or not.
    pub fn resolve(
        &mut self,
        generation: Generation,
        response: Result<HttpResponse, FetchError>,
    ) -> Option<FetchOutcome> {
        if !self.tracker.settle(generation) {
            return None;
        }
        let outcome = FetchOutcome::classify(response);
        match &outcome {
            FetchOutcome::Loaded(page) => tracing::debug!(
                %generation,
                current_page = page.current_page,
                items = page.items.len(),
                "paper fetch loaded"
            ),
            FetchOutcome::Empty => tracing::debug!(%generation, "paper fetch empty"),
            FetchOutcome::Failed(error) => {
                tracing::warn!(%generation, %error, "paper fetch failed");
            }
        }
        Some(outcome)
    }

    /// Stops waiting for the current fetch; its response will be ignored.
    pub fn abandon(&mut self) {
        if self.tracker.is_pending() {
            tracing::debug!("abandoning in-flight paper fetch");
        }
        self.tracker.abandon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{build, FilterCriteria};

    fn page_body(total_items: u64, results: usize) -> String {
        let paper = r#"{"id":1,"title":"t","abstract":"a","published_date":"2024-02-29"}"#;
        let items = vec![paper; results].join(",");
        format!(
            r#"{{"status":"success","current_page":1,"total_pages":1,"total_items":{total_items},"results":[{items}]}}"#
        )
    }

    #[test]
    fn endpoints_trim_trailing_slash() {
        let endpoints = Endpoints::new("http://api.local//");
        assert_eq!(endpoints.base_url(), "http://api.local");
        assert_eq!(endpoints.related_url(12), "http://api.local/api/related/12/");
    }

    #[test]
    fn preprocess_url_omits_empty_categories() {
        let endpoints = Endpoints::new("http://h");
        assert_eq!(
            endpoints.preprocess_url(25, &[]),
            "http://h/api/start-preprocess/?number_articles=25"
        );
        assert_eq!(
            endpoints.preprocess_url(5, &[Category::Mathematics, Category::QuantitativeBiology]),
            "http://h/api/start-preprocess/?number_articles=5&categories=math,q-bio"
        );
    }

    #[test]
    fn zero_total_items_is_empty() {
        let outcome = FetchOutcome::classify(Ok(HttpResponse::new(200, page_body(0, 0))));
        assert_eq!(outcome, FetchOutcome::Empty);
    }

    #[test]
    fn items_are_loaded() {
        let outcome = FetchOutcome::classify(Ok(HttpResponse::new(200, page_body(1, 1))));
        assert!(matches!(outcome, FetchOutcome::Loaded(ref p) if p.items.len() == 1));
    }

    #[test]
    fn stale_failure_is_dropped() {
        let mut fetcher = ResultFetcher::new(Endpoints::new("http://h"));
        let query = build(&FilterCriteria::default(), 0);
        let r1 = fetcher.begin(&query);
        let r2 = fetcher.begin(&query);

        let late = fetcher.resolve(
            r1.generation,
            Err(FetchError::NetworkUnreachable("reset".into())),
        );
        assert_eq!(late, None);

        let current = fetcher.resolve(r2.generation, Ok(HttpResponse::new(200, page_body(0, 0))));
        assert_eq!(current, Some(FetchOutcome::Empty));
    }
}
