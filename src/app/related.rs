//! Related-articles dialog.

use crate::domain::{FetchError, Paper};
use crate::fetch::{
    decode_related, Endpoints, FetchRequest, Generation, HttpMethod, HttpResponse, RequestKind,
    RequestTracker,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RelatedState {
    #[default]
    Closed,
    Loading,
    Loaded(Vec<Paper>),
    Empty,
    Failed(FetchError),
}

/// Dialog listing the nearest neighbours of one paper.
///
/// Has its own request slot, so paging the main list never invalidates a
/// pending lookup and vice versa.
#[derive(Debug, Clone, Default)]
pub struct RelatedLookup {
    tracker: RequestTracker,
    state: RelatedState,
    source_title: Option<String>,
}

impl RelatedLookup {
    #[must_use]
    pub const fn state(&self) -> &RelatedState {
        &self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != RelatedState::Closed
    }

    /// Title of the paper the dialog was opened for.
    #[must_use]
    pub fn source_title(&self) -> Option<&str> {
        self.source_title.as_deref()
    }

    /// Opens the dialog for `paper` and requests its neighbours.
    pub fn open(&mut self, endpoints: &Endpoints, paper: &Paper) -> FetchRequest {
        let generation = self.tracker.begin();
        self.state = RelatedState::Loading;
        self.source_title = Some(paper.title.clone());
        tracing::debug!(%generation, paper_id = paper.id, "related lookup started");
        FetchRequest::new(
            RequestKind::Related,
            generation,
            HttpMethod::Get,
            endpoints.related_url(paper.id),
        )
    }

    /// Closes the dialog; a response still in flight will be ignored.
    pub fn close(&mut self) {
        self.tracker.abandon();
        self.state = RelatedState::Closed;
        self.source_title = None;
    }

    /// Applies the response for `generation`, returning whether it was current.
    pub fn complete(
        &mut self,
        generation: Generation,
        response: Result<HttpResponse, FetchError>,
    ) -> bool {
        if !self.tracker.settle(generation) {
            return false;
        }
        self.state = match response.and_then(|r| decode_related(&r)) {
            Ok(papers) if papers.is_empty() => RelatedState::Empty,
            Ok(papers) => RelatedState::Loaded(papers),
            Err(error) => {
                tracing::warn!(%generation, %error, "related lookup failed");
                RelatedState::Failed(error)
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: i64) -> Paper {
        serde_json::from_str(&format!(
            r#"{{"id":{id},"title":"Paper {id}","abstract":"a","published_date":"2021-03-04"}}"#
        ))
        .unwrap()
    }

    #[test]
    fn open_then_load() {
        let endpoints = Endpoints::new("http://h");
        let mut lookup = RelatedLookup::default();
        let request = lookup.open(&endpoints, &paper(9));

        assert_eq!(request.url, "http://h/api/related/9/");
        assert_eq!(lookup.state(), &RelatedState::Loading);
        assert_eq!(lookup.source_title(), Some("Paper 9"));

        let body = r#"[{"id":2,"title":"n","abstract":"a","published_date":"2021-01-01"}]"#;
        assert!(lookup.complete(request.generation, Ok(HttpResponse::new(200, body))));
        assert!(matches!(lookup.state(), RelatedState::Loaded(p) if p.len() == 1));
    }

    #[test]
    fn closing_makes_pending_response_stale() {
        let endpoints = Endpoints::new("http://h");
        let mut lookup = RelatedLookup::default();
        let request = lookup.open(&endpoints, &paper(1));
        lookup.close();

        assert!(!lookup.complete(request.generation, Ok(HttpResponse::new(200, "[]"))));
        assert!(!lookup.is_open());
    }

    #[test]
    fn reopening_supersedes_previous_paper() {
        let endpoints = Endpoints::new("http://h");
        let mut lookup = RelatedLookup::default();
        let first = lookup.open(&endpoints, &paper(1));
        let second = lookup.open(&endpoints, &paper(2));

        assert!(!lookup.complete(first.generation, Ok(HttpResponse::new(200, "[]"))));
        assert!(lookup.complete(second.generation, Ok(HttpResponse::new(200, "[]"))));
        assert_eq!(lookup.state(), &RelatedState::Empty);
    }
}
