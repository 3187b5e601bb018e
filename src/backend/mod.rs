//! Remote item source abstraction.
//!
//! The pagination controller only knows the [`ItemSource`] contract: given an
//! offset, limit and sort order, return a page and the total count. The worker
//! thread owns the concrete source and is the only caller of [`ItemSource::fetch`].
//!
//! # Implementations
//!
//! - [`MockBackend`]: precomputed synthetic dataset with optional failure injection

pub mod mock;
pub mod source;

pub use mock::{BackendSettings, MockBackend};
pub use source::{ItemSource, Page, PageRequest};
