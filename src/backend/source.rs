//! Paginated fetch contract.

use crate::domain::{Item, Result, SortMode};
use serde::{Deserialize, Serialize};

/// One page request against the remote source.
///
/// `generation` is not part of the fetch contract itself; it is echoed back in
/// the worker response so the controller can drop answers issued before a
/// pagination reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
    pub sort: SortMode,
    pub generation: u64,
}

/// A successful page response.
///
/// `items.len() <= limit`; `total` is stable across calls for one sort mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Item>,
    pub total: usize,
}

/// Abstraction over the remote, server-sorted item source.
///
/// Results for a given `(offset, limit, sort)` must be deterministic for the
/// lifetime of the session.
pub trait ItemSource: Send {
    /// Serves `[offset, offset + limit)` of the dataset in `request.sort` order.
    ///
    /// # Errors
    ///
    /// Any failure is reported as [`ListboardError::Fetch`](crate::domain::ListboardError::Fetch);
    /// callers treat all failures uniformly.
    fn fetch(&mut self, request: &PageRequest) -> Result<Page>;
}
