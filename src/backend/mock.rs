//! Synthetic in-memory item source.
//!
//! Serves a fixed dataset of `total_items` entries generated once at
//! construction. Item `n` (1-based) is `mock-n` / `Mock item #n`, created
//! `n` minutes after `now - total_items` minutes, so the newest mock item is
//! just before construction time.
//!
//! Latency is not simulated here; the worker sleeps before calling
//! [`ItemSource::fetch`] so the source itself stays usable from tests.

use crate::backend::source::{ItemSource, Page, PageRequest};
use crate::domain::{Item, ItemId, ListboardError, Result, SortMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Spacing between consecutive mock items.
const ITEM_SPACING_MS: i64 = 60_000;

/// Tunables for the mock source, sent to the worker at plugin load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Size of the synthetic dataset.
    pub total_items: usize,

    /// Artificial latency applied by the worker before each fetch.
    pub latency_ms: u64,

    /// When set, every n-th fetch fails.
    pub fail_every: Option<u32>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            total_items: 200,
            latency_ms: 320,
            fail_every: None,
        }
    }
}

impl BackendSettings {
    #[must_use]
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Precomputed, pre-sorted synthetic dataset.
#[derive(Debug, Clone)]
pub struct MockBackend {
    /// Dataset ordered by `created_at` descending.
    newest: Vec<Item>,

    /// Same dataset, ascending.
    oldest: Vec<Item>,

    fail_every: Option<u32>,

    /// Number of fetches served so far, including failed ones.
    requests: u32,
}

impl MockBackend {
    /// Builds the dataset anchored at `now_ms`.
    ///
    /// # Examples
    ///
    /// ```
    /// use listboard::backend::{BackendSettings, ItemSource, MockBackend, PageRequest};
    /// use listboard::domain::SortMode;
    ///
    /// let mut backend = MockBackend::new(&BackendSettings::default(), 0);
    /// let page = backend
    ///     .fetch(&PageRequest { offset: 0, limit: 25, sort: SortMode::Newest, generation: 0 })
    ///     .unwrap();
    /// assert_eq!(page.total, 200);
    /// assert_eq!(page.items[0].seq, 200);
    /// ```
    #[must_use]
    pub fn new(settings: &BackendSettings, now_ms: i64) -> Self {
        let total = i64::try_from(settings.total_items).unwrap_or(i64::MAX);
        let start = now_ms.saturating_sub(total.saturating_mul(ITEM_SPACING_MS));

        let oldest: Vec<Item> = (1..=settings.total_items as u64)
            .map(|seq| Item {
                id: ItemId::remote(format!("mock-{seq}")),
                text: format!("Mock item #{seq}"),
                created_at: start.saturating_add(i64::try_from(seq).unwrap_or(i64::MAX).saturating_mul(ITEM_SPACING_MS)),
                seq,
            })
            .collect();

        let mut newest = oldest.clone();
        newest.reverse();

        tracing::debug!(total_items = settings.total_items, fail_every = ?settings.fail_every, "mock dataset generated");

        Self {
            newest,
            oldest,
            fail_every: settings.fail_every,
            requests: 0,
        }
    }

    fn should_fail(&self) -> bool {
        self.fail_every
            .is_some_and(|n| n > 0 && self.requests % n == 0)
    }
}

impl ItemSource for MockBackend {
    fn fetch(&mut self, request: &PageRequest) -> Result<Page> {
        self.requests = self.requests.wrapping_add(1);

        if request.limit == 0 {
            return Err(ListboardError::Fetch("limit must be positive".to_string()));
        }
        if self.should_fail() {
            tracing::debug!(request_number = self.requests, "injected fetch failure");
            return Err(ListboardError::Fetch(format!(
                "simulated failure on request {}",
                self.requests
            )));
        }

        let source = match request.sort {
            SortMode::Newest => &self.newest,
            SortMode::Oldest => &self.oldest,
        };

        let start = request.offset.min(source.len());
        let end = request.offset.saturating_add(request.limit).min(source.len());

        Ok(Page {
            items: source[start..end].to_vec(),
            total: source.len(),
        })
    }
}
