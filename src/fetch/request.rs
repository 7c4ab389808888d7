//! Outgoing request descriptions and incoming host responses.
//!
//! The plugin never performs I/O itself. It describes a request as a
//! [`FetchRequest`], the shim hands it to the host together with a context
//! map, and the host later delivers the response with that same map. This
//! module owns both directions of that round trip: serializing the context
//! and recognizing it again as a [`ResponseTicket`].

use super::tracker::Generation;
use crate::domain::error::{FetchError, PaperLensError, Result};
use std::collections::BTreeMap;

const KIND_KEY: &str = "kind";
const GENERATION_KEY: &str = "generation";
const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_KEY: &str = "parent_span_id";

/// Which request slot a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `GET /api/paper/` listing.
    Papers,
    /// `GET /api/related/<id>/` lookup.
    Related,
    /// `POST /api/start-preprocess/` trigger.
    Processing,
}

impl RequestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Papers => "papers",
            Self::Related => "related",
            Self::Processing => "processing",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "papers" => Some(Self::Papers),
            "related" => Some(Self::Related),
            "processing" => Some(Self::Processing),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Distributed tracing context carried through the host round trip.
///
/// Captured from the span that issued the request and re-attached when the
/// response is handled, so both ends land in the same trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,
    /// Span ID of the issuing span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the current span's OpenTelemetry context, if it is valid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        span_context.is_valid().then(|| Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the parent of spans created while the guard lives.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let remote = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(remote)
                .attach(),
        )
    }
}

/// A request the shim should ask the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub kind: RequestKind,
    pub generation: Generation,
    pub method: HttpMethod,
    pub url: String,
    pub trace_context: Option<TraceContext>,
}

impl FetchRequest {
    #[must_use]
    pub fn new(kind: RequestKind, generation: Generation, method: HttpMethod, url: String) -> Self {
        Self {
            kind,
            generation,
            method,
            url,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Context map attached to the host request and echoed back with the
    /// response.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(KIND_KEY.to_string(), self.kind.as_str().to_string());
        context.insert(GENERATION_KEY.to_string(), self.generation.to_string());
        if let Some(trace) = &self.trace_context {
            context.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            context.insert(PARENT_SPAN_KEY.to_string(), trace.parent_span_id.clone());
        }
        context
    }
}

/// Routing information recovered from a response's context map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTicket {
    pub kind: RequestKind,
    pub generation: Generation,
    pub trace_context: Option<TraceContext>,
}

impl ResponseTicket {
    /// Recovers the ticket from the context map the host echoed back.
    ///
    /// # Errors
    ///
    /// Returns [`PaperLensError::Context`] when `kind` or `generation` is
    /// missing or unparsable.
    pub fn from_context(context: &BTreeMap<String, String>) -> Result<Self> {
        let kind = context
            .get(KIND_KEY)
            .and_then(|k| RequestKind::parse(k))
            .ok_or_else(|| PaperLensError::Context(format!("missing or unknown `{KIND_KEY}`")))?;

        let generation = context
            .get(GENERATION_KEY)
            .ok_or_else(|| PaperLensError::Context(format!("missing `{GENERATION_KEY}`")))?
            .parse::<Generation>()
            .map_err(|e| PaperLensError::Context(format!("bad `{GENERATION_KEY}`: {e}")))?;

        let trace_context = match (context.get(TRACE_ID_KEY), context.get(PARENT_SPAN_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            kind,
            generation,
            trace_context,
        })
    }
}

/// A response that reached the plugin, before status and body are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Interprets the raw values of a host web-request result.
    ///
    /// Zellij reports a failed transport as status 400 with no response
    /// headers and the error text as body. Any real HTTP response carries at
    /// least one header, so that exact shape is read as
    /// [`FetchError::NetworkUnreachable`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NetworkUnreachable`] for transport failures.
    pub fn from_host(
        status: u16,
        headers: &BTreeMap<String, String>,
        body: Vec<u8>,
    ) -> std::result::Result<Self, FetchError> {
        if status == 400 && headers.is_empty() {
            let reason = String::from_utf8_lossy(&body).trim().to_string();
            let reason = if reason.is_empty() {
                "no response from host".to_string()
            } else {
                reason
            };
            return Err(FetchError::NetworkUnreachable(reason));
        }
        Ok(Self { status, body })
    }
}
