//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a
//! `Vec<Action>` and the runtime in `main.rs` performs them in order, which
//! keeps every state transition testable without a host.
//!
//! # Example
//!
//! ```rust
//! use listboard::app::Action;
//! use std::time::Duration;
//!
//! let actions = vec![Action::ScheduleSave { delay: Duration::from_millis(500) }];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Posts a message to the background worker thread.
    ///
    /// Page fetches travel this way so their latency never blocks the UI.
    PostToWorker(WorkerMessage),

    /// Arms a one-shot host timer for a pending save.
    ///
    /// When it fires, the runtime feeds back `Event::SaveElapsed`.
    ScheduleSave {
        /// How long the simulated save takes.
        delay: Duration,
    },
}
