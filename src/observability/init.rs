//! Tracing subscriber setup.

use super::exporter;
use crate::domain::error::{ListboardError, Result};
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when `trace_level` is unset or not a valid filter directive.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Builds the span filter from the configured level.
pub fn trace_filter(level: Option<&str>) -> EnvFilter {
    let level = level.unwrap_or(DEFAULT_TRACE_LEVEL);
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL))
}

/// Installs the global subscriber: level filter plus OpenTelemetry layer
/// exporting to `listboard-otlp.json` in the data directory.
///
/// Calling it again after a subscriber is installed is a no-op.
///
/// # Errors
///
/// Returns [`ListboardError::Io`] if the data directory cannot be created.
pub fn init_tracing(config: &Config) -> Result<()> {
    let data_dir = paths::get_data_dir();
    std::fs::create_dir_all(&data_dir).map_err(ListboardError::Io)?;

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "Listboard"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::file_tracer_provider(paths::trace_file_path(), resource);
    let tracer = provider.tracer("Listboard");

    let installed = tracing_subscriber::registry()
        .with(trace_filter(config.trace_level.as_deref()))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init()
        .is_ok();

    if installed {
        opentelemetry::global::set_tracer_provider(provider);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_falls_back_to_default() {
        assert_eq!(trace_filter(Some("listboard=loud")).to_string(), DEFAULT_TRACE_LEVEL);
        assert_eq!(trace_filter(None).to_string(), DEFAULT_TRACE_LEVEL);
        assert_eq!(trace_filter(Some("debug")).to_string(), "debug");
    }
}
