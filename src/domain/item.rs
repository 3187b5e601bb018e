//! Item domain model, sort order and text validation.
//!
//! An [`Item`] is either authored locally in the current session or delivered
//! by the paginated remote source. Both kinds share one shape so they can be
//! projected together; which collection an item lives in is tracked by the
//! [`ItemStore`](crate::store::ItemStore), not by the item itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum number of characters (after trimming) a submitted item must have.
pub const MIN_TEXT_CHARS: usize = 3;

/// Opaque, unique item identifier.
///
/// Local items use a random UUID; remote items use the backend-assigned
/// `mock-{seq}` identifier, which is stable for the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh random identifier for a locally created item.
    #[must_use]
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wraps an identifier assigned by the remote source.
    #[must_use]
    pub fn remote(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single list entry.
///
/// # Fields
///
/// - `id`: Unique identifier, see [`ItemId`]
/// - `text`: Non-empty, trimmed display text
/// - `created_at`: Unix timestamp in milliseconds, the ordering key
/// - `seq`: Display sequence number shown as the `#n` badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    pub created_at: i64,
    pub seq: u64,
}

/// Order in which the list is displayed and in which the remote source pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Most recent `created_at` first.
    #[default]
    Newest,
    /// Oldest `created_at` first.
    Oldest,
}

impl SortMode {
    /// Returns the other sort mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Newest,
        }
    }

    /// Human-readable label used by the sort indicator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::Oldest => "Oldest",
        }
    }
}

/// Reasons a draft cannot become an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing but whitespace was entered.
    ///
    /// Never shown to the user; submission is simply unavailable.
    #[error("Please enter some text")]
    Empty,

    /// Trimmed text is shorter than `min` characters.
    #[error("Please enter at least {min} characters")]
    TooShort { min: usize },
}

/// Validates draft text for the inline error message.
///
/// Returns `None` when the trimmed text is empty (no message, submission just
/// stays disabled) or long enough. Length is counted in characters, not bytes.
///
/// # Examples
///
/// ```
/// use listboard::domain::{validate_text, ValidationError};
///
/// assert_eq!(validate_text("   "), None);
/// assert_eq!(validate_text("hi "), Some(ValidationError::TooShort { min: 3 }));
/// assert_eq!(validate_text("  héé  "), None);
/// ```
#[must_use]
pub fn validate_text(text: &str) -> Option<ValidationError> {
    match check_text(text) {
        Ok(_) | Err(ValidationError::Empty) => None,
        Err(err) => Some(err),
    }
}

/// Trims `text` and checks it can become an item, returning the trimmed slice.
///
/// # Errors
///
/// [`ValidationError::Empty`] for blank input, [`ValidationError::TooShort`]
/// when fewer than [`MIN_TEXT_CHARS`] characters remain after trimming.
pub fn check_text(text: &str) -> std::result::Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() < MIN_TEXT_CHARS {
        return Err(ValidationError::TooShort { min: MIN_TEXT_CHARS });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_text_reports_length_error() {
        let err = validate_text("hi").map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("Please enter at least 3 characters"));
        assert_eq!(validate_text("hi "), Some(ValidationError::TooShort { min: 3 }));
    }

    #[test]
    fn check_text_returns_trimmed_slice() {
        assert_eq!(check_text("  hello \n"), Ok("hello"));
        assert_eq!(check_text(" \t "), Err(ValidationError::Empty));
    }

    #[test]
    fn sort_mode_toggles_and_serializes_lowercase() {
        assert_eq!(SortMode::Newest.toggled(), SortMode::Oldest);
        assert_eq!(SortMode::Oldest.toggled(), SortMode::Newest);
        assert_eq!(serde_json::to_string(&SortMode::Oldest).unwrap(), "\"oldest\"");
    }

    #[test]
    fn random_ids_are_unique() {
        assert_ne!(ItemId::random(), ItemId::random());
    }

    proptest! {
        #[test]
        fn validate_is_none_iff_blank_or_long_enough(s in "\\PC{0,8}") {
            let trimmed = s.trim();
            let expected_ok = trimmed.is_empty() || trimmed.chars().count() >= MIN_TEXT_CHARS;
            prop_assert_eq!(validate_text(&s).is_none(), expected_ok);
            if !expected_ok {
                prop_assert_eq!(validate_text(&s), Some(ValidationError::TooShort { min: MIN_TEXT_CHARS }));
            }
        }
    }
}
