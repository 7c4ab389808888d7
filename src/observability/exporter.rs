//! Span exporter that appends one compact JSON object per finished span.

use super::rotation::{RotatingFile, DEFAULT_MAX_BACKUPS, DEFAULT_MAX_BYTES};
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

struct JsonLinesExporter {
    file: RotatingFile,
    service: String,
    is_shutdown: AtomicBool,
}

impl JsonLinesExporter {
    fn new(file: RotatingFile, resource: &Resource) -> Self {
        let service = resource
            .get("service.name".into())
            .map_or_else(|| "unknown".to_string(), |v| v.to_string());
        Self {
            file,
            service,
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        for span in &batch {
            let line = span_record(&self.service, span).to_string();
            if let Err(e) = self.file.write_line(&line) {
                return Box::pin(std::future::ready(Err(TraceError::from(e.to_string()))));
            }
        }
        Box::pin(std::future::ready(Ok(())))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for JsonLinesExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesExporter")
            .field("file", &self.file)
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

fn attribute_map(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

/// One span as a flat JSON object.
fn span_record(service: &str, span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        JsonValue::Null
    } else {
        json!(format!("{:016x}", span.parent_span_id))
    };

    let status = match &span.status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    };

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            json!({
                "name": event.name,
                "timeUnixNano": unix_nanos(event.timestamp).to_string(),
                "attributes": attribute_map(&event.attributes),
            })
        })
        .collect();

    json!({
        "service": service,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "startTimeUnixNano": unix_nanos(span.start_time).to_string(),
        "endTimeUnixNano": unix_nanos(span.end_time).to_string(),
        "attributes": attribute_map(&span.attributes),
        "events": events,
        "status": status,
    })
}

/// Builds a provider that exports every span synchronously to `file_path`.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let file = RotatingFile::new(file_path, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS);
    let exporter = JsonLinesExporter::new(file, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
