//! Pagination controller.
//!
//! The controller never performs I/O. [`PaginationController::request_next_page`]
//! hands back the [`PageRequest`] the host must issue, and the host feeds the
//! resolution into [`PaginationController::complete`]. Checking and setting the
//! `Fetching` phase happens in one call on the plugin's event-loop thread, which
//! is what makes concurrent triggers collapse into one request.

use crate::backend::{Page, PageRequest};
use crate::domain::SortMode;
use crate::store::ItemStore;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// User-visible message recorded when a page fails to load.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to load items. Please retry.";

/// Where the controller is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    /// Ready to issue the next request.
    Idle,
    /// One request is outstanding for the current generation.
    Fetching,
    /// Every remote item has been loaded.
    Exhausted,
}

/// What [`PaginationController::complete`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was merged into the store.
    Applied {
        /// Items in the page.
        received: usize,
    },
    /// The fetch failed; the error message is now set.
    Failed,
    /// The response belonged to an earlier generation and was dropped.
    Stale,
}

/// Drives offset/total bookkeeping and the single-flight guard.
#[derive(Debug, Clone)]
pub struct PaginationController {
    page_size: usize,
    offset: usize,
    total: Option<usize>,
    phase: PagePhase,
    sort: SortMode,
    generation: u64,
    error: Option<String>,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, SortMode::default())
    }
}

impl PaginationController {
    /// Creates an idle controller. A zero `page_size` falls back to
    /// [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn new(page_size: usize, sort: SortMode) -> Self {
        Self {
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
            offset: 0,
            total: None,
            phase: PagePhase::Idle,
            sort,
            generation: 0,
            error: None,
        }
    }

    /// Claims the fetch slot and returns the request to issue.
    ///
    /// Returns `None` without side effects when a request is already
    /// outstanding or when `offset >= total` for a known total.
    ///
    /// # Examples
    ///
    /// ```
    /// use listboard::pagination::PaginationController;
    /// use listboard::domain::SortMode;
    ///
    /// let mut pager = PaginationController::new(25, SortMode::Newest);
    /// let request = pager.request_next_page().unwrap();
    /// assert_eq!((request.offset, request.limit), (0, 25));
    /// assert!(pager.request_next_page().is_none());
    /// ```
    pub fn request_next_page(&mut self) -> Option<PageRequest> {
        match self.phase {
            PagePhase::Fetching => {
                tracing::trace!(offset = self.offset, "fetch already in flight, ignoring trigger");
                return None;
            }
            PagePhase::Exhausted => return None,
            PagePhase::Idle => {}
        }
        if self.total.is_some_and(|total| self.offset >= total) {
            self.phase = PagePhase::Exhausted;
            return None;
        }

        self.phase = PagePhase::Fetching;
        let request = PageRequest {
            offset: self.offset,
            limit: self.page_size,
            sort: self.sort,
            generation: self.generation,
        };
        tracing::debug!(
            offset = request.offset,
            limit = request.limit,
            sort = ?request.sort,
            generation = request.generation,
            "requesting page"
        );
        Some(request)
    }

    /// Applies the resolution of a previously issued request.
    ///
    /// Responses from an older generation are discarded untouched. On success
    /// the offset advances by the number of items actually returned and the
    /// page is merged into `store`; on failure offset and total are left alone
    /// and [`FETCH_ERROR_MESSAGE`] is recorded.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        outcome: Result<Page, String>,
        store: &mut ItemStore,
    ) -> PageOutcome {
        if request.generation != self.generation {
            tracing::debug!(
                response_generation = request.generation,
                current_generation = self.generation,
                "discarding stale page response"
            );
            return PageOutcome::Stale;
        }
        if self.phase != PagePhase::Fetching {
            tracing::debug!(offset = request.offset, phase = ?self.phase, "discarding unrequested page response");
            return PageOutcome::Stale;
        }

        match outcome {
            Ok(page) => {
                let received = page.items.len();
                self.offset = request.offset + received;
                self.total = Some(page.total);
                self.error = None;
                store.replace_remote_page(page.items, request.offset == 0);

                self.phase = if self.offset >= page.total || received == 0 {
                    PagePhase::Exhausted
                } else {
                    PagePhase::Idle
                };

                tracing::debug!(
                    received,
                    offset = self.offset,
                    total = page.total,
                    phase = ?self.phase,
                    "page applied"
                );
                PageOutcome::Applied { received }
            }
            Err(message) => {
                tracing::warn!(offset = request.offset, error = %message, "page fetch failed");
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
                self.phase = PagePhase::Idle;
                PageOutcome::Failed
            }
        }
    }

    /// Gives up on the outstanding request without a matching response.
    ///
    /// Used when the worker reports a protocol error and the request it was
    /// serving cannot be identified. Records [`FETCH_ERROR_MESSAGE`] so the
    /// user can retry, and bumps the generation so the abandoned response is
    /// dropped if it still arrives. Returns `false` when nothing was in flight.
    pub fn abort_in_flight(&mut self) -> bool {
        if self.phase != PagePhase::Fetching {
            return false;
        }
        self.generation = self.generation.wrapping_add(1);
        tracing::warn!(offset = self.offset, generation = self.generation, "abandoning in-flight page request");
        self.phase = PagePhase::Idle;
        self.error = Some(FETCH_ERROR_MESSAGE.to_string());
        true
    }

    /// Starts over under `sort`: offset 0, total unknown, remote items cleared.
    ///
    /// Bumps the generation so any response still in flight is dropped when
    /// it arrives. The caller issues the fresh first request.
    pub fn reset(&mut self, sort: SortMode, store: &mut ItemStore) {
        self.generation = self.generation.wrapping_add(1);
        self.sort = sort;
        self.offset = 0;
        self.total = None;
        self.phase = PagePhase::Idle;
        self.error = None;
        store.clear_remote();
        tracing::debug!(sort = ?sort, generation = self.generation, "pagination reset");
    }

    /// Whether more remote items may exist.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.phase != PagePhase::Exhausted && self.total.map_or(true, |total| self.offset < total)
    }

    /// Whether a request is outstanding for the current generation.
    ///
    /// # Returns
    ///
    /// `true` between [`request_next_page`](Self::request_next_page) and the
    /// matching [`complete`](Self::complete) or
    /// [`abort_in_flight`](Self::abort_in_flight).
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == PagePhase::Fetching
    }

    /// Current position in the fetch cycle.
    #[must_use]
    pub const fn phase(&self) -> PagePhase {
        self.phase
    }

    /// Remote items fetched so far.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Server-reported total, once a page has arrived.
    #[must_use]
    pub const fn total(&self) -> Option<usize> {
        self.total
    }

    /// Order the remote source is paged in; changes only through
    /// [`reset`](Self::reset).
    #[must_use]
    pub const fn sort(&self) -> SortMode {
        self.sort
    }

    /// Limit sent with every request. Never zero.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Counter echoed in requests. Bumped by a reset or an abort, after which
    /// responses carrying an older value are dropped.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Message from the last failed fetch, until a success or reset clears it.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
