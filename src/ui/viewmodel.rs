//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data and
//! the flags the renderer needs to pick styles and labels.

use crate::app::ListCounts;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Item rows inside the visible window, in display order.
    pub display_items: Vec<DisplayItem>,

    /// Header information (title, sort indicator).
    pub header: HeaderInfo,

    /// Draft input line with its submit button state.
    pub compose: ComposeBarInfo,

    /// Filter input line with the sort and load-more controls.
    pub filter: FilterBarInfo,

    /// Visible, known and remote counts for the meta line.
    pub counts: ListCounts,

    /// Whether a draft can be submitted right now.
    pub can_submit: bool,

    /// Whether a save is pending.
    pub is_saving: bool,

    /// Whether a page request is outstanding.
    pub is_page_loading: bool,

    /// Whether more remote items may exist.
    pub has_more: bool,

    /// Inline draft validation message.
    pub validation_message: Option<String>,

    /// Last fetch failure, independent of the validation message.
    pub fetch_message: Option<String>,

    /// Loader row shown after the last item.
    pub loader: LoaderInfo,

    /// Whether the loader row falls inside the visible window.
    ///
    /// The host watches this for a rising edge to emit the proximity signal.
    pub sentinel_visible: bool,

    /// Message shown in the list area when no item is visible.
    pub empty_state: Option<EmptyState>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Display information for a single list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Sequence badge, e.g. `#42`.
    pub badge: String,

    /// Item text, truncated to the available width.
    pub text: String,

    /// Whether this row is the selection cursor.
    pub is_selected: bool,

    /// Whether the item was authored in this session.
    pub is_local: bool,

    /// Character range of the filter match within `text`.
    pub highlight: Option<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Draft input state.
#[derive(Debug, Clone)]
pub struct ComposeBarInfo {
    pub draft: String,
    pub is_focused: bool,

    /// `Add` normally, `Saving...` while a save is pending.
    pub button_label: &'static str,
}

/// Filter input state and list controls.
#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub query: String,
    pub is_focused: bool,
    pub sort_label: &'static str,

    /// `Loading...`, `Load more` or `All loaded`.
    pub load_label: &'static str,
}

/// Loader sentinel text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderInfo {
    pub text: &'static str,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the focused region.
    pub keybindings: String,
}

/// Empty list message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}
