//! Domain layer for the Listboard plugin.
//!
//! Core types shared by every other layer, independent of Zellij APIs: the
//! [`Item`] model, its identifier, the [`SortMode`] the remote source is ordered
//! by, input validation, and the crate error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Item model, sort mode, and text validation
//!
//! # Examples
//!
//! ```
//! use listboard::domain::{validate_text, ValidationError};
//!
//! assert_eq!(validate_text(""), None);
//! assert_eq!(validate_text("hi"), Some(ValidationError::TooShort { min: 3 }));
//! assert_eq!(validate_text("hello"), None);
//! ```

pub mod error;
pub mod item;

pub use error::{ListboardError, Result};
pub use item::{validate_text, Item, ItemId, SortMode, ValidationError, MIN_TEXT_CHARS};
