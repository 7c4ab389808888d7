//! Tracing setup with OpenTelemetry spans exported to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → JsonLinesExporter → paperlens-traces.jsonl
//! ```
//!
//! Every finished span becomes one JSON line in the plugin data directory.
//! The file rotates at 5 MB and keeps three numbered backups.
//!
//! The filter comes from the `trace_level` plugin option (default `"info"`)
//! and accepts any `EnvFilter` directive, e.g. `"paperlens=debug"`.
//!
//! Fetch requests carry the current trace and span ids through the host's
//! request context, so response handling continues the trace that issued the
//! request.

mod exporter;
mod init;
mod rotation;

pub use init::init_tracing;
