//! Input focus state for the application.
//!
//! Focus decides how key presses are interpreted. Exactly one region owns the
//! keyboard at a time:
//!
//! - **List**: navigation and list commands (remove, sort, load more)
//! - **Compose**: typing the draft for a new item
//! - **Filter**: typing the filter query
//!
//! # Example
//!
//! ```rust
//! use listboard::app::InputFocus;
//!
//! assert_eq!(InputFocus::List.next(), InputFocus::Compose);
//! assert_eq!(InputFocus::Filter.next(), InputFocus::List);
//! ```

/// Which region receives typed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFocus {
    /// Navigating the item list.
    ///
    /// Available keybindings: j/k (navigate), G (end), d (remove), s (sort),
    /// m (load more), a/i (compose), / (filter), q (quit).
    #[default]
    List,

    /// Editing the draft for a new item. Enter submits.
    Compose,

    /// Editing the filter query. Enter keeps it, Esc clears it.
    Filter,
}

impl InputFocus {
    /// Next region in Tab order: list, compose, filter, then back to list.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::List => Self::Compose,
            Self::Compose => Self::Filter,
            Self::Filter => Self::List,
        }
    }

    /// Whether printable characters go into a text field.
    #[must_use]
    pub const fn accepts_text(self) -> bool {
        matches!(self, Self::Compose | Self::Filter)
    }
}
