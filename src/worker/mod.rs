//! Background worker standing in for the remote item service.
//!
//! Page fetches are posted to a Zellij worker thread, which sleeps for the
//! configured latency and then asks its [`ItemSource`](crate::backend::ItemSource)
//! for the page. The plugin's event loop never blocks on a fetch.
//!
//! - `messages`: Request/response protocol with trace context propagation
//! - `handler`: Worker state and message processing

pub mod handler;
pub mod messages;

pub use handler::ListboardWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
