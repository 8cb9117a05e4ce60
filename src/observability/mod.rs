//! OpenTelemetry tracing with file-based export.
//!
//! All crate operations emit `tracing` spans and events. When enabled, they are
//! bridged into OpenTelemetry and written as OTLP JSON lines to a local file:
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → healthdesk-otlp.json
//! ```
//!
//! The file lives in the configured data directory and rotates at 10 MB,
//! keeping 3 backups. The filter level comes from `trace_level` in
//! [`Config`](crate::Config), defaulting to `info`.
//!
//! # Modules
//!
//! - `init`: subscriber installation
//! - `tracer`: tracer provider and span exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: rotating trace file

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
