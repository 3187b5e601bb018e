//! Sequential, single-flight paging through the remote item source.
//!
//! # State Machine
//!
//! ```text
//!            request_next_page()             success, offset < total
//!   Idle ───────────────────────▶ Fetching ──────────────────────────▶ Idle
//!    ▲                               │  │
//!    │            failure            │  │ success, offset >= total
//!    └───────────────────────────────┘  └────────────────────────▶ Exhausted
//!
//!   any state ── reset(sort) ──▶ Idle (offset 0, total unknown, generation + 1)
//! ```
//!
//! - [`controller`]: The [`PaginationController`] and its outcome types

pub mod controller;

pub use controller::{PageOutcome, PagePhase, PaginationController, DEFAULT_PAGE_SIZE, FETCH_ERROR_MESSAGE};
