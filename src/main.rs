//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Listboard library and
//! the Zellij plugin system. It implements the `ZellijPlugin` and
//! `ZellijWorker` traits and is the only place that calls the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, keys, save timer
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │   WorkerShim     │   │  ← Fetch latency, mock backend
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, Timer, `CustomMessage` events
//! 3. **Granted**: Configure the worker's backend and request the first page
//! 4. **Update**: Map host events to library events, execute actions
//! 5. **Render**: Raise the proximity signal if the loader row just came
//!    into view, then draw
//!
//! # Event Mapping
//!
//! - `Key` → focus-dependent library events (see keybindings)
//! - `Timer` → `Event::SaveElapsed`
//! - `CustomMessage` from the worker → `Event::WorkerResponse`
//!
//! # Keybindings
//!
//! Global:
//! - `Tab`: Cycle focus (list, compose, filter)
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//! - `Ctrl+s`: Toggle sort
//! - `Ctrl+l`: Load more
//!
//! List focus:
//! - `j`/`Down`, `k`/`Up`: Navigate
//! - `G`: Jump to the end
//! - `d`/`Delete`: Remove selected item
//! - `s`: Toggle sort, `m`: Load more
//! - `a`/`i`: Compose, `/`: Filter
//! - `q`: Close plugin
//!
//! Compose focus: type, `Backspace`, `Enter` submits, `Esc` returns to list.
//!
//! Filter focus: type, `Backspace`, `Enter` keeps the filter, `Esc` clears it.

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use listboard::worker::{ListboardWorker, WorkerMessage, WorkerResponse};
use listboard::{handle_event, sync_sentinel, Action, Config, Event, InputFocus};

register_plugin!(State);
register_worker!(WorkerShim, listboard_worker, LISTBOARD_WORKER);

/// Name the host derives from the `listboard_worker` registration.
const WORKER_NAME: &str = "listboard";

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the configuration the worker needs once
/// permissions are granted.
struct State {
    app: listboard::AppState,
    config: Config,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: listboard::initialize(&config),
            config,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, sets up tracing, requests permissions and
    /// subscribes to events. The first fetch waits for the permission grant.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        if let Err(e) = listboard::observability::init_tracing(&config) {
            eprintln!("listboard: tracing disabled: {e}");
        }

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(config = ?config, "parsed configuration");

        self.app = listboard::initialize(&config);
        self.config = config;

        request_permission(&[PermissionType::ReadApplicationState, PermissionType::ChangeApplicationState]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let _guard =
            tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::SaveElapsed,
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match self.handle_permission_result(permissions) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    /// Renders the plugin UI.
    ///
    /// Zellij only exposes the pane size here, so this is also where the loader
    /// row's visibility is known. A rising edge raises the proximity signal
    /// before drawing, so the frame already shows the loading state.
    fn render(&mut self, rows: usize, cols: usize) {
        match sync_sentinel(&mut self.app, rows, cols) {
            Ok((_, actions)) => {
                for action in &actions {
                    Self::execute_action(action);
                }
            }
            Err(e) => tracing::warn!(error = %e, "error handling proximity signal"),
        }
        listboard::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs one library event and executes its actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled successfully");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events according to the focus.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, focus = ?self.app.focus, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('s') => Some(Event::ToggleSort),
                BareKey::Char('l') => Some(Event::LoadMore),
                _ => None,
            };
        }

        if key.bare_key == BareKey::Tab {
            return Some(Event::FocusNext);
        }

        Some(match self.app.focus {
            InputFocus::List => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Char('G') => Event::JumpToEnd,
                BareKey::Delete | BareKey::Char('d') => Event::RemoveSelected,
                BareKey::Char('s') => Event::ToggleSort,
                BareKey::Char('m') => Event::LoadMore,
                BareKey::Char('a' | 'i') => Event::FocusCompose,
                BareKey::Char('/') => Event::FocusFilter,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            },
            InputFocus::Compose => match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::FocusList,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputFocus::Filter => match key.bare_key {
                BareKey::Enter => Event::FocusList,
                BareKey::Esc => Event::ClearFilter,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
        })
    }

    /// Configures the worker once permissions are granted and asks the
    /// library for the first page.
    fn handle_permission_result(&self, permissions: PermissionStatus) -> Option<Event> {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - configuring worker");
                Self::post_worker_message(&WorkerMessage::configure(self.config.backend));
                Some(Event::Initialize)
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - plugin functionality limited");
                None
            }
        }
    }

    /// Maps worker messages to application events.
    ///
    /// An undecodable payload still reaches the library as a protocol error so
    /// an in-flight fetch is released.
    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        let response = serde_json::from_str::<WorkerResponse>(payload).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "failed to deserialize worker response");
            WorkerResponse::Error {
                message: format!("Undecodable worker response: {e}"),
            }
        });
        Some(Event::WorkerResponse(response))
    }

    /// Serializes the message as JSON and sends it to the worker.
    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::ScheduleSave { delay } => {
                tracing::debug!(delay = ?delay, "arming save timer");
                set_timeout(delay.as_secs_f64());
            }
        }
    }
}

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Host-facing wrapper around [`ListboardWorker`].
///
/// Decoding, latency and fetching live in the library; this only moves
/// payloads between the host and the worker.
#[derive(Default, Serialize, Deserialize)]
struct WorkerShim(ListboardWorker);

impl ZellijWorker<'_> for WorkerShim {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            if let Err(e) = listboard::observability::init_tracing(&Config::default()) {
                eprintln!("listboard worker: tracing disabled: {e}");
            }
        }

        let response = self.0.handle_payload(&payload).or_else(|e| {
            tracing::debug!(error = %e, "worker failed to handle payload");
            serde_json::to_string(&WorkerResponse::Error { message: e.to_string() })
        });

        match response {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
        }
    }
}
