//! Error types for the Listboard plugin.
//!
//! This module defines the centralized error type [`ListboardError`] and a type
//! alias [`Result`]. Errors never escape to the plugin runtime as panics: the
//! event handler turns recoverable failures into state that the renderer reads.

use crate::domain::item::ValidationError;
use thiserror::Error;

/// The main error type for Listboard operations.
///
/// # Examples
///
/// ```
/// use listboard::domain::{ListboardError, ValidationError};
///
/// let err = ListboardError::from(ValidationError::TooShort { min: 3 });
/// assert_eq!(err.to_string(), "Please enter at least 3 characters");
/// ```
#[derive(Debug, Error)]
pub enum ListboardError {
    /// Submitted item text was rejected.
    ///
    /// Displayed verbatim as the inline validation message.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The remote item source failed to serve a page.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Communication with the background worker failed.
    ///
    /// Raised when a worker payload cannot be serialized or decoded.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Listboard operations.
pub type Result<T> = std::result::Result<T, ListboardError>;
