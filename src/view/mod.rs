//! Presentation projection of the item store.
//!
//! - [`projector`]: Pure filter + sort transform and match highlighting

pub mod projector;

pub use projector::{highlight_range, matches_filter, project, ViewSettings};
