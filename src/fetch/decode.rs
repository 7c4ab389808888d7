//! Status classification and payload decoding for every API endpoint.

use super::request::HttpResponse;
use crate::domain::{FetchError, Paper, ResultPage};
use serde::Deserialize;

/// Wire shape of a `/api/paper/` response. The `status` string is ignored.
#[derive(Debug, Deserialize)]
struct PageEnvelope {
    current_page: u32,
    total_pages: u32,
    total_items: u64,
    results: Vec<Paper>,
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    status: String,
}

fn check_status(response: &HttpResponse) -> Result<&[u8], FetchError> {
    if response.is_success() {
        Ok(&response.body)
    } else {
        Err(FetchError::NonSuccessStatus(response.status))
    }
}

fn from_json<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::MalformedPayload(e.to_string()))
}

/// Decodes one page of the paper listing.
///
/// # Errors
///
/// [`FetchError::NonSuccessStatus`] for non-2xx responses,
/// [`FetchError::MalformedPayload`] for undecodable bodies or pages that
/// break the pagination invariants.
pub fn decode_page(response: &HttpResponse) -> Result<ResultPage, FetchError> {
    let envelope: PageEnvelope = from_json(check_status(response)?)?;

    let page = ResultPage {
        items: envelope.results,
        current_page: envelope.current_page,
        total_pages: envelope.total_pages,
        total_items: envelope.total_items,
    };
    page.validate().map_err(FetchError::MalformedPayload)?;
    Ok(page)
}

/// Decodes the related-papers array.
///
/// # Errors
///
/// Same classification as [`decode_page`].
pub fn decode_related(response: &HttpResponse) -> Result<Vec<Paper>, FetchError> {
    from_json(check_status(response)?)
}

/// Decodes the status message returned by the preprocessing trigger.
///
/// # Errors
///
/// Same classification as [`decode_page`].
pub fn decode_processing(response: &HttpResponse) -> Result<String, FetchError> {
    let envelope: StatusEnvelope = from_json(check_status(response)?)?;
    Ok(envelope.status)
}
