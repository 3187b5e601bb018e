//! Listboard: a Zellij plugin for keeping a short list of items next to an
//! infinitely scrolling, paginated remote list.
//!
//! Users add, filter, sort and remove short text items. A mock backend on the
//! plugin's worker thread supplies read-only items page by page, either on an
//! explicit "load more" or when the end of the list scrolls into view.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Keys, timers, IPC
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event → state → actions
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Item Store    │   │ Pagination    │   │ View          │
//! │ (store/)      │   │ (pagination/) │   │ (view/)       │
//! │ local+remote  │   │ single-flight │   │ filter + sort │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI (ui/)      │   │ Worker        │   │ Backend       │
//! │ view model,   │   │ (worker/)     │   │ (backend/)    │
//! │ ANSI, themes  │   │ latency + IPC │   │ mock source   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`backend`]: Paginated item source trait and mock implementation
//! - [`domain`]: Items, sort order, validation, errors
//! - [`infrastructure`]: Sandbox paths
//! - [`pagination`]: Offset/total bookkeeping and the single-flight guard
//! - [`store`]: Local and remote item collections
//! - [`ui`]: View model, terminal rendering, themes
//! - [`view`]: Pure filter and sort projection
//! - [`worker`]: Background fetch worker and its protocol
//! - [`observability`]: OpenTelemetry tracing to a rotating file
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/listboard.wasm" {
//!         page_size "25"
//!         total_items "200"
//!         fetch_latency_ms "320"
//!         save_latency_ms "500"
//!         fail_every "5"
//!         theme "catppuccin-mocha"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use listboard::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Initialize)?;
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! # Ok::<(), listboard::ListboardError>(())
//! ```

pub mod app;
pub mod backend;
pub mod domain;
pub mod infrastructure;
pub mod pagination;
pub mod store;
pub mod ui;
pub mod view;
pub mod worker;

pub mod observability;

pub use app::{handle_event, sync_sentinel, Action, AppState, Event, InputFocus, ListCounts};
pub use domain::{Item, ItemId, ListboardError, Result, SortMode};
pub use ui::Theme;

use backend::BackendSettings;
use pagination::DEFAULT_PAGE_SIZE;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

/// Default simulated save latency.
pub const DEFAULT_SAVE_LATENCY_MS: u64 = 500;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote page size. Zero is replaced by the default of 25.
    pub page_size: usize,

    /// Size, latency and failure injection of the mock source.
    pub backend: BackendSettings,

    /// How long a save takes before the item appears.
    pub save_latency_ms: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` maps to the host home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for spans, `info` when unset.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            backend: BackendSettings::default(),
            save_latency_ms: DEFAULT_SAVE_LATENCY_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or unparseable values fall back to their defaults; `fail_every`
    /// of `0` disables failure injection.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use listboard::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "10".to_string());
    /// map.insert("fetch_latency_ms".to_string(), "oops".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.page_size, 10);
    /// assert_eq!(config.backend.latency_ms, 320);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let page_size = parse_or(config, "page_size", defaults.page_size);
        let page_size = if page_size == 0 {
            tracing::debug!("page_size 0 is not allowed, using default");
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        let fail_every = parse_or(config, "fail_every", 0_u32);
        let fail_every = (fail_every > 0).then_some(fail_every);

        Self {
            page_size,
            backend: BackendSettings {
                total_items: parse_or(config, "total_items", defaults.backend.total_items),
                latency_ms: parse_or(config, "fetch_latency_ms", defaults.backend.latency_ms),
                fail_every,
            },
            save_latency_ms: parse_or(config, "save_latency_ms", defaults.save_latency_ms),
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Simulated save latency as a [`Duration`] for the save timer.
    #[must_use]
    pub const fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_latency_ms)
    }

    /// Resolves the theme: file first, then built-in name, then the default.
    ///
    /// # Errors
    ///
    /// Returns [`ListboardError::Theme`] if a configured file or name cannot
    /// be loaded.
    pub fn load_theme(&self) -> Result<Theme> {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(theme_file));
        }
        match &self.theme_name {
            Some(name) => Theme::from_name(name).ok_or_else(|| ListboardError::Theme(format!("unknown theme {name}"))),
            None => Ok(Theme::default()),
        }
    }
}

fn parse_value<T: FromStr>(config: &BTreeMap<String, String>, key: &str) -> Result<Option<T>> {
    config
        .get(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ListboardError::Config(format!("invalid value {raw:?} for {key}")))
        })
        .transpose()
}

fn parse_or<T: FromStr + Copy>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    match parse_value(config, key) {
        Ok(value) => value.unwrap_or(default),
        Err(e) => {
            tracing::debug!(error = %e, "using default");
            default
        }
    }
}

/// Builds the initial application state from configuration.
///
/// Theme errors are logged and replaced by the default theme. No fetch is
/// issued here; the runtime sends `Event::Initialize` once permissions are
/// granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(page_size = config.page_size, "initializing listboard plugin");

    let theme = config.load_theme().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "failed to load theme, using default");
        Theme::default()
    });

    AppState::new(config.page_size, config.save_delay(), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_zellij(&map(&[
            ("page_size", "10"),
            ("total_items", "42"),
            ("fetch_latency_ms", "0"),
            ("save_latency_ms", " 100 "),
            ("fail_every", "3"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.page_size, 10);
        assert_eq!(config.backend, BackendSettings { total_items: 42, latency_ms: 0, fail_every: Some(3) });
        assert_eq!(config.save_delay(), Duration::from_millis(100));
        assert_eq!(config.load_theme().unwrap().name, "catppuccin-latte");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn zero_and_garbage_fall_back() {
        let config = Config::from_zellij(&map(&[("page_size", "0"), ("fail_every", "0"), ("total_items", "-5")]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.backend.fail_every, None);
        assert_eq!(config.backend.total_items, 200);
    }

    #[test]
    fn bad_value_is_a_config_error() {
        let result = parse_value::<usize>(&map(&[("page_size", "ten")]), "page_size");
        assert!(matches!(result, Err(ListboardError::Config(_))));
        assert_eq!(parse_value::<usize>(&BTreeMap::new(), "page_size").unwrap(), None);
    }

    #[test]
    fn unknown_theme_falls_back_in_initialize() {
        let config = Config {
            theme_name: Some("nope".into()),
            ..Config::default()
        };
        assert!(matches!(config.load_theme(), Err(ListboardError::Theme(_))));
        assert_eq!(initialize(&config).theme, Theme::default());
    }
}
