//! Server-side scrape-and-prepare trigger.

use crate::domain::{Category, FetchError};
use crate::fetch::{
    decode_processing, Endpoints, FetchRequest, Generation, HttpMethod, HttpResponse, RequestKind,
    RequestTracker,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProcessingState {
    #[default]
    Idle,
    Starting,
    /// Server accepted the request; holds its status message.
    Started(String),
    Failed(FetchError),
}

#[derive(Debug, Clone)]
pub struct ProcessingTrigger {
    tracker: RequestTracker,
    state: ProcessingState,
    number_of_articles: u32,
}

impl ProcessingTrigger {
    #[must_use]
    pub fn new(number_of_articles: u32) -> Self {
        Self {
            tracker: RequestTracker::default(),
            state: ProcessingState::Idle,
            number_of_articles,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ProcessingState {
        &self.state
    }

    /// Asks the server to collect papers for `categories`.
    ///
    /// An empty selection leaves the category choice to the server.
    pub fn start(&mut self, endpoints: &Endpoints, categories: &[Category]) -> FetchRequest {
        let generation = self.tracker.begin();
        self.state = ProcessingState::Starting;
        tracing::info!(
            %generation,
            number_of_articles = self.number_of_articles,
            categories = ?categories,
            "requesting preprocessing"
        );
        FetchRequest::new(
            RequestKind::Processing,
            generation,
            HttpMethod::Post,
            endpoints.preprocess_url(self.number_of_articles, categories),
        )
    }

    pub fn complete(
        &mut self,
        generation: Generation,
        response: Result<HttpResponse, FetchError>,
    ) -> bool {
        if !self.tracker.settle(generation) {
            return false;
        }
        self.state = match response.and_then(|r| decode_processing(&r)) {
            Ok(message) => ProcessingState::Started(message),
            Err(error) => {
                tracing::warn!(%generation, %error, "preprocessing request failed");
                ProcessingState::Failed(error)
            }
        };
        true
    }
}
