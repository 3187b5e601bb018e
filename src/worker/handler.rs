//! Worker-side request processing.
//!
//! The worker stands in for the network. It runs on its own Zellij worker
//! thread, so sleeping for the configured latency here suspends only the
//! simulated request while the plugin's event loop keeps handling input.

use crate::backend::{BackendSettings, ItemSource, MockBackend};
use crate::domain::error::{ListboardError, Result};
use crate::worker::{TraceContext, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Worker thread state.
///
/// The item source is built lazily from default settings if a fetch arrives
/// before any `Configure` message.
#[derive(Serialize, Deserialize, Default)]
pub struct ListboardWorker {
    #[serde(skip)]
    source: Option<Box<dyn ItemSource>>,

    #[serde(skip)]
    latency: Duration,
}

impl std::fmt::Debug for ListboardWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListboardWorker")
            .field("configured", &self.source.is_some())
            .field("latency", &self.latency)
            .finish()
    }
}

impl ListboardWorker {
    /// Creates a worker around an explicit source, with no artificial latency.
    #[must_use]
    pub fn with_source(source: Box<dyn ItemSource>) -> Self {
        Self {
            source: Some(source),
            latency: Duration::ZERO,
        }
    }

    fn configure(&mut self, settings: &BackendSettings) {
        self.source = Some(mock_source(settings));
        self.latency = settings.latency();
    }

    /// The configured source, or one built from default settings.
    fn source(&mut self) -> &mut Box<dyn ItemSource> {
        let latency = &mut self.latency;
        self.source.get_or_insert_with(|| {
            tracing::debug!("fetch before configure, using default backend settings");
            let settings = BackendSettings::default();
            *latency = settings.latency();
            mock_source(&settings)
        })
    }

    /// Handles one decoded message and produces its response.
    ///
    /// Blocks the worker thread for the configured latency before a fetch.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = message.trace_context().and_then(attach_parent_context);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::Configure { settings, .. } => {
                self.configure(&settings);
                WorkerResponse::Configured {
                    total_items: settings.total_items,
                }
            }
            WorkerMessage::FetchPage { request, .. } => {
                if !self.latency.is_zero() {
                    std::thread::sleep(self.latency);
                }
                match self.source().fetch(&request) {
                    Ok(page) => {
                        tracing::debug!(offset = request.offset, count = page.items.len(), "page served");
                        WorkerResponse::PageLoaded { request, page }
                    }
                    Err(e) => WorkerResponse::PageFailed {
                        request,
                        message: e.to_string(),
                    },
                }
            }
        }
    }

    /// Decodes a JSON payload, handles it, and encodes the response.
    ///
    /// # Errors
    ///
    /// Returns [`ListboardError::Worker`] if the payload is not a valid
    /// [`WorkerMessage`] or the response cannot be serialized.
    pub fn handle_payload(&mut self, payload: &str) -> Result<String> {
        let message: WorkerMessage = serde_json::from_str(payload)
            .map_err(|e| ListboardError::Worker(format!("failed to decode message: {e}")))?;
        let response = self.handle_message(message);
        serde_json::to_string(&response)
            .map_err(|e| ListboardError::Worker(format!("failed to encode response: {e}")))
    }
}

fn mock_source(settings: &BackendSettings) -> Box<dyn ItemSource> {
    let now_ms = chrono::Utc::now().timestamp_millis();
    Box::new(MockBackend::new(settings, now_ms))
}

/// Makes the plugin-side span the parent of spans created on this thread.
///
/// The returned guard must be held while handling the message.
fn attach_parent_context(trace_context: &TraceContext) -> Option<opentelemetry::ContextGuard> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;
    let remote = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

    Some(opentelemetry::Context::current().with_remote_span_context(remote).attach())
}
