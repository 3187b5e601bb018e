//! Plugin ⇄ worker protocol.
//!
//! Requests travel as JSON in a Zellij `PluginMessage` payload; responses come
//! back the same way as a `CustomMessage` event. Every request carries the
//! sender's trace context so worker spans join the plugin's trace.

use crate::backend::{BackendSettings, Page, PageRequest};
use serde::{Deserialize, Serialize};

/// Trace and parent span identifiers captured on the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID, 32 hex characters.
    pub trace_id: String,

    /// Span ID of the sending span, 16 hex characters.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current `tracing` span.
    ///
    /// Returns `None` when no valid span context is active, e.g. when tracing
    /// was never initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let context = tracing::Span::current().context();
        let span = context.span();
        let span_context = span.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    ($($builder:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })),* $(,)?) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` message tagged with the current trace context.")]
                #[must_use]
                pub fn $builder($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    configure(Configure { settings: BackendSettings }),
    fetch_page(FetchPage { request: PageRequest }),
}

/// Requests sent from the plugin to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// (Re)builds the mock source with the given settings.
    Configure {
        settings: BackendSettings,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetches one page after the configured latency.
    FetchPage {
        request: PageRequest,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached at construction, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Configure { trace_context, .. } | Self::FetchPage { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The source was rebuilt.
    Configured { total_items: usize },

    /// A page was served. `request` is echoed for generation matching.
    PageLoaded { request: PageRequest, page: Page },

    /// The fetch failed.
    PageFailed { request: PageRequest, message: String },

    /// The worker could not process a message at all.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortMode;

    #[test]
    fn fetch_page_round_trips_through_json() {
        let request = PageRequest { offset: 25, limit: 25, sort: SortMode::Oldest, generation: 3 };
        let message = WorkerMessage::FetchPage { request, trace_context: None };

        let payload = serde_json::to_string(&message).unwrap();
        assert!(!payload.contains("trace_context"));
        let decoded: WorkerMessage = serde_json::from_str(&payload).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn builders_without_tracing_have_no_context() {
        let message = WorkerMessage::configure(BackendSettings::default());
        assert!(message.trace_context().is_none());
    }
}
