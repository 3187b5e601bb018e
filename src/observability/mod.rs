//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileExporter → JSON lines
//! ```
//!
//! Spans land in `/host/.local/share/zellij/listboard/listboard-otlp.json`,
//! rotated at 10 MB with three numbered backups. The level comes from the
//! `trace_level` plugin option and defaults to `info`.
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: `SpanExporter` writing to the trace file
//! - `otlp`: OTLP JSON encoding
//! - `rotating`: Size-rotated line writer

mod exporter;
pub mod init;
mod otlp;
mod rotating;

pub use init::{init_tracing, trace_filter};
