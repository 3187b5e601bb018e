//! In-memory item store.
//!
//! Owns the two disjoint item collections (local and remote) and every
//! mutation of them. Other layers read snapshots and call the store's
//! operations; nothing else touches the collections directly.

pub mod item_store;

pub use item_store::ItemStore;
