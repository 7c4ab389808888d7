//! Maps search and page triggers onto fetches of the paper listing.
//!
//! Every trigger reads the current filters, builds the query, flips the view
//! back to [`ViewState::Loading`] and starts a fetch. Only the most recent
//! fetch can write its outcome into the view.

use super::view_state::ViewState;
use crate::domain::FetchError;
use crate::fetch::{Endpoints, FetchRequest, Generation, HttpResponse, ResultFetcher};
use crate::query::{build, FilterStore, Query};

#[derive(Debug, Clone)]
pub struct PaginationCoordinator {
    fetcher: ResultFetcher,
    view: ViewState,
    pending_query: Option<Query>,
    shown_query: Option<Query>,
}

impl PaginationCoordinator {
    #[must_use]
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            fetcher: ResultFetcher::new(endpoints),
            view: ViewState::Loading,
            pending_query: None,
            shown_query: None,
        }
    }

    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        self.fetcher.endpoints()
    }

    /// Query whose outcome is currently displayed.
    #[must_use]
    pub const fn shown_query(&self) -> Option<&Query> {
        self.shown_query.as_ref()
    }

    /// Starts a new search from the first page.
    pub fn trigger_search(&mut self, filters: &FilterStore) -> FetchRequest {
        self.start(build(filters.criteria(), 0))
    }

    /// Fetches page `page` with the current filters.
    ///
    /// `page` is forwarded as-is; bounds are the server's concern.
    pub fn trigger_page(&mut self, filters: &FilterStore, page: u32) -> FetchRequest {
        self.start(build(filters.criteria(), page))
    }

    /// Fetches the page after the displayed one, if there is one.
    pub fn next_page(&mut self, filters: &FilterStore) -> Option<FetchRequest> {
        let page = self.view.page().filter(|p| p.has_next())?;
        let target = page.current_page + 1;
        Some(self.trigger_page(filters, target))
    }

    /// Fetches the page before the displayed one, if there is one.
    pub fn previous_page(&mut self, filters: &FilterStore) -> Option<FetchRequest> {
        let page = self.view.page().filter(|p| p.has_previous())?;
        let target = page.current_page - 1;
        Some(self.trigger_page(filters, target))
    }

    /// Applies the response for `generation`.
    ///
    /// Returns `false` when the response was stale and nothing changed.
    pub fn complete(
        &mut self,
        generation: Generation,
        response: Result<HttpResponse, FetchError>,
    ) -> bool {
        let Some(outcome) = self.fetcher.resolve(generation, response) else {
            return false;
        };
        self.shown_query = self.pending_query.take();
        self.view = outcome.into();
        true
    }

    /// Shows `error` without fetching; a fetch still in flight goes stale.
    pub fn fail(&mut self, error: FetchError) {
        self.fetcher.abandon();
        self.pending_query = None;
        self.view = ViewState::Failed(error);
    }

    fn start(&mut self, query: Query) -> FetchRequest {
        let request = self.fetcher.begin(&query);
        tracing::debug!(generation = %request.generation, query = %query, "query triggered");
        self.pending_query = Some(query);
        self.view = ViewState::Loading;
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::HttpResponse;

    fn page_body(current: u32, total_pages: u32, total_items: u64) -> String {
        let paper = r#"{"id":7,"title":"t","abstract":"a","published_date":"2022-05-01"}"#;
        format!(
            r#"{{"status":"success","current_page":{current},"total_pages":{total_pages},"total_items":{total_items},"results":[{paper}]}}"#
        )
    }

    fn coordinator() -> PaginationCoordinator {
        PaginationCoordinator::new(Endpoints::new("http://h"))
    }

    #[test]
    fn trigger_sets_loading_and_search_resets_page() {
        let mut filters = FilterStore::new();
        filters.set_search_text("qubits");
        let mut coordinator = coordinator();

        let request = coordinator.trigger_page(&filters, 3);
        assert!(request.url.ends_with("?search=qubits&page=3"));
        assert!(coordinator.complete(request.generation, Ok(HttpResponse::new(200, page_body(3, 4, 4)))));
        assert!(!coordinator.view().is_loading());

        let request = coordinator.trigger_search(&filters);
        assert!(coordinator.view().is_loading());
        assert_eq!(request.url, "http://h/api/paper/?search=qubits");
    }

    #[test]
    fn next_and_previous_respect_bounds() {
        let filters = FilterStore::new();
        let mut coordinator = coordinator();
        assert!(coordinator.next_page(&filters).is_none());

        let request = coordinator.trigger_search(&filters);
        coordinator.complete(request.generation, Ok(HttpResponse::new(200, page_body(1, 2, 2))));
        assert!(coordinator.previous_page(&filters).is_none());

        let next = coordinator.next_page(&filters).unwrap();
        assert!(next.url.ends_with("?page=2"));
        coordinator.complete(next.generation, Ok(HttpResponse::new(200, page_body(2, 2, 2))));
        assert!(coordinator.next_page(&filters).is_none());
    }

    #[test]
    fn stale_completion_leaves_view_untouched() {
        let filters = FilterStore::new();
        let mut coordinator = coordinator();
        let r1 = coordinator.trigger_search(&filters);
        let r2 = coordinator.trigger_search(&filters);

        assert!(!coordinator.complete(r1.generation, Ok(HttpResponse::new(500, ""))));
        assert!(coordinator.view().is_loading());

        assert!(coordinator.complete(r2.generation, Ok(HttpResponse::new(200, page_body(1, 1, 1)))));
        assert!(coordinator.view().page().is_some());
        assert!(coordinator.shown_query().is_some());
    }
}
