//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin knows: the item
//! store, the pagination controller, the view settings and the transient
//! input state (focus, draft, pending save). The event handler mutates it;
//! the renderer only reads view models computed from it.
//!
//! # Derived State
//!
//! The projected list is cached together with the store revision and view
//! settings it was computed from. [`AppState::refresh_view`] recomputes it only
//! when either has moved, so handlers can call it unconditionally.
//!
//! # Example
//!
//! ```rust
//! use listboard::app::AppState;
//! use listboard::ui::Theme;
//! use std::time::Duration;
//!
//! let mut state = AppState::new(25, Duration::from_millis(500), Theme::default());
//! state.refresh_view();
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.display_items.is_empty());
//! assert!(viewmodel.sentinel_visible);
//! ```

use super::modes::InputFocus;
use crate::domain::item::check_text;
use crate::domain::{validate_text, Item, SortMode, ValidationError};
use crate::pagination::PaginationController;
use crate::store::ItemStore;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ComposeBarInfo, DisplayItem, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, LoaderInfo, UIViewModel,
};
use crate::view::{highlight_range, project, ViewSettings};
use std::time::Duration;

/// Rows taken by everything except the list area.
///
/// Top: blank, header, border, compose, filter, meta, two message lines,
/// border. Bottom: border, footer.
pub const CHROME_ROWS: usize = 11;

/// Width reserved for the `#seq` badge column.
const BADGE_WIDTH: usize = 7;

/// Item and pagination counters shown in the meta line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCounts {
    /// Items left after the filter.
    pub visible: usize,
    /// Local plus remote items held in the store.
    pub known: usize,
    /// Remote items fetched so far (the pagination offset).
    pub remote_loaded: usize,
    /// Server-reported total, once known.
    pub remote_total: Option<usize>,
}

impl ListCounts {
    /// `Showing 5 / 30 (loaded 25 of 200 from mock API)`.
    #[must_use]
    pub fn summary(&self) -> String {
        let total = self
            .remote_total
            .map_or_else(String::new, |total| format!(" of {total}"));
        format!(
            "Showing {} / {} (loaded {}{} from mock API)",
            self.visible, self.known, self.remote_loaded, total
        )
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Local and remote items.
    pub store: ItemStore,

    /// Offset, total and single-flight bookkeeping for remote pages.
    pub pagination: PaginationController,

    /// Filter text and sort order applied at display time.
    pub view: ViewSettings,

    /// Region receiving typed input.
    pub focus: InputFocus,

    /// Text typed into the compose field.
    pub draft: String,

    /// Inline validation result for `draft`, recomputed on every edit.
    pub validation_error: Option<ValidationError>,

    /// Trimmed text snapshotted at submit, held until the save timer fires.
    pub pending_save: Option<String>,

    /// Simulated save latency.
    pub save_delay: Duration,

    /// Zero-based selection index into the projected list.
    pub selected_index: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    visible: Vec<Item>,
    projected_from: Option<(u64, ViewSettings)>,
    sentinel_seen: bool,
}

impl AppState {
    /// Creates an empty state. Nothing is fetched until `Event::Initialize`.
    ///
    /// # Parameters
    ///
    /// * `page_size` - Remote page size; zero falls back to the default
    /// * `save_delay` - Simulated save latency armed on submit
    /// * `theme` - Color scheme for UI rendering
    #[must_use]
    pub fn new(page_size: usize, save_delay: Duration, theme: Theme) -> Self {
        Self {
            store: ItemStore::new(),
            pagination: PaginationController::new(page_size, SortMode::default()),
            view: ViewSettings::default(),
            focus: InputFocus::default(),
            draft: String::new(),
            validation_error: None,
            pending_save: None,
            save_delay,
            selected_index: 0,
            theme,
            visible: Vec::new(),
            projected_from: None,
            sentinel_seen: false,
        }
    }

    /// Whether a submitted draft is waiting for the save timer.
    ///
    /// # Returns
    ///
    /// `true` from `Event::Submit` until `Event::SaveElapsed`. Draft edits and
    /// further submissions are ignored meanwhile.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    /// Submission requires no pending save, no validation error and at least
    /// three trimmed characters.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_saving() && self.validation_error.is_none() && check_text(&self.draft).is_ok()
    }

    /// Whether the remote source may still have unloaded items.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    /// Counters for the meta line, based on the last projection.
    #[must_use]
    pub fn counts(&self) -> ListCounts {
        ListCounts {
            visible: self.visible.len(),
            known: self.store.len(),
            remote_loaded: self.pagination.offset(),
            remote_total: self.pagination.total(),
        }
    }

    /// The projected list as of the last [`refresh_view`](Self::refresh_view).
    #[must_use]
    pub fn visible_items(&self) -> &[Item] {
        &self.visible
    }

    /// Re-projects the store if it or the view settings changed since the last
    /// projection. Returns whether the projection was recomputed.
    pub fn refresh_view(&mut self) -> bool {
        let revision = self.store.revision();
        if self
            .projected_from
            .as_ref()
            .is_some_and(|(rev, settings)| *rev == revision && *settings == self.view)
        {
            return false;
        }

        let _span = tracing::debug_span!(
            "refresh_view",
            known = self.store.len(),
            filter_len = self.view.filter_text.len(),
            sort = ?self.view.sort_mode
        )
        .entered();

        self.visible = project(&self.store.combined(), &self.view);
        self.projected_from = Some((revision, self.view.clone()));

        if self.visible.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.visible.len() - 1);
        }

        tracing::debug!(visible = self.visible.len(), "view projected");
        true
    }

    /// Appends `c` to the draft and revalidates. Ignored while saving.
    pub fn push_draft_char(&mut self, c: char) -> bool {
        if self.is_saving() {
            return false;
        }
        self.draft.push(c);
        self.validation_error = validate_text(&self.draft);
        true
    }

    /// Removes the last draft character and revalidates. Ignored while saving.
    pub fn pop_draft_char(&mut self) -> bool {
        if self.is_saving() || self.draft.pop().is_none() {
            return false;
        }
        self.validation_error = validate_text(&self.draft);
        true
    }

    /// Moves selection cursor down by one position, wrapping to top if at end.
    pub fn move_selection_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
    }

    /// Moves selection cursor up by one position, wrapping to bottom if at start.
    pub fn move_selection_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Selects the last visible item, which scrolls the loader into view.
    pub fn jump_to_end(&mut self) {
        self.selected_index = self.visible.len().saturating_sub(1);
    }

    /// Returns the item under the selection cursor.
    ///
    /// # Returns
    ///
    /// `None` if the projected list is empty.
    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.visible.get(self.selected_index)
    }

    /// Records whether the loader row was rendered and reports a rising edge.
    ///
    /// Returns `true` only when the sentinel becomes visible after not being
    /// visible, mirroring an intersection observer.
    pub fn observe_sentinel(&mut self, visible: bool) -> bool {
        let entered = visible && !self.sentinel_seen;
        self.sentinel_seen = visible;
        entered
    }

    /// Forgets the last sentinel observation so the next visible render
    /// counts as a fresh entry.
    pub fn reset_sentinel(&mut self) {
        self.sentinel_seen = false;
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// The list area holds the visible items followed by the loader row. A
    /// window of `rows - CHROME_ROWS` entries is centered on the selection and
    /// pulled back when it would run past the loader. `sentinel_visible` is set
    /// when the loader row lands inside the window.
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height in character cells
    /// * `cols` - Pane width in character cells
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let available_rows = rows.saturating_sub(CHROME_ROWS);
        let entries = self.visible.len() + 1;

        let (visible_start, visible_end) = if available_rows == 0 {
            (0, 0)
        } else {
            let mut start = self.selected_index.saturating_sub(available_rows / 2);
            let end = (start + available_rows).min(entries);
            if end - start < available_rows && entries >= available_rows {
                start = end.saturating_sub(available_rows);
            }
            (start, end)
        };

        let item_end = visible_end.min(self.visible.len());
        let display_items = self
            .visible
            .get(visible_start..item_end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(relative_idx, item)| self.compute_display_item(item, visible_start + relative_idx, cols))
            .collect();

        let is_page_loading = self.pagination.is_loading();
        let has_more = self.has_more();

        UIViewModel {
            display_items,
            header: HeaderInfo {
                title: format!(" Listboard ({}) ", self.view.sort_mode.label()),
            },
            compose: ComposeBarInfo {
                draft: self.draft.clone(),
                is_focused: self.focus == InputFocus::Compose,
                button_label: if self.is_saving() { "Saving..." } else { "Add" },
            },
            filter: FilterBarInfo {
                query: self.view.filter_text.clone(),
                is_focused: self.focus == InputFocus::Filter,
                sort_label: self.view.sort_mode.label(),
                load_label: if is_page_loading {
                    "Loading..."
                } else if has_more {
                    "Load more"
                } else {
                    "All loaded"
                },
            },
            counts: self.counts(),
            can_submit: self.can_submit(),
            is_saving: self.is_saving(),
            is_page_loading,
            has_more,
            validation_message: self.validation_error.map(|e| e.to_string()),
            fetch_message: self.pagination.error().map(str::to_string),
            loader: LoaderInfo {
                text: if is_page_loading {
                    "Loading more..."
                } else if has_more {
                    "Scroll for more items"
                } else {
                    "Reached the end of the mock list"
                },
            },
            sentinel_visible: visible_end == entries && available_rows > 0,
            empty_state: self.compute_empty_state(),
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(&self, item: &Item, absolute_idx: usize, cols: usize) -> DisplayItem {
        let max_text_width = cols.saturating_sub(BADGE_WIDTH + 2);
        let text = truncate_chars(&item.text, max_text_width);
        let highlight = highlight_range(&text, &self.view.filter_text);

        DisplayItem {
            badge: format!("#{}", item.seq),
            text,
            is_selected: absolute_idx == self.selected_index,
            is_local: self.store.is_local(&item.id),
            highlight,
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.visible.is_empty() || self.pagination.is_loading() {
            return None;
        }
        let message = if self.view.filter_text.trim().is_empty() {
            "No items yet".to_string()
        } else {
            format!("No items match \"{}\"", self.view.filter_text.trim())
        };
        Some(EmptyState { message })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus {
            InputFocus::List => {
                "j/k: navigate  d: remove  s: sort  m: load more  a: add  /: filter  Tab: focus  q: quit"
            }
            InputFocus::Compose => "Type to edit  Enter: add  Esc: back  Tab: focus  Ctrl+s: sort",
            InputFocus::Filter => "Type to filter  Enter: keep  Esc: clear  Tab: focus  Ctrl+n/p: navigate",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Truncates to `max` characters, ending in `...` when shortened.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;

    fn state_with_remote(count: u64) -> AppState {
        let mut state = AppState::new(25, Duration::from_millis(500), Theme::default());
        let items = (1..=count)
            .rev()
            .map(|seq| Item {
                id: ItemId::remote(format!("mock-{seq}")),
                text: format!("Mock item #{seq}"),
                created_at: i64::try_from(seq).unwrap() * 60_000,
                seq,
            })
            .collect();
        state.store.replace_remote_page(items, true);
        state.refresh_view();
        state
    }

    #[test]
    fn refresh_view_is_a_no_op_without_changes() {
        let mut state = state_with_remote(3);
        assert!(!state.refresh_view());

        state.view.filter_text.push('2');
        assert!(state.refresh_view());
        assert_eq!(state.visible_items().len(), 1);
    }

    #[test]
    fn draft_edits_revalidate_and_gate_submission() {
        let mut state = state_with_remote(0);
        for c in "hi".chars() {
            state.push_draft_char(c);
        }
        assert_eq!(state.validation_error, Some(ValidationError::TooShort { min: 3 }));
        assert!(!state.can_submit());

        state.push_draft_char('!');
        assert_eq!(state.validation_error, None);
        assert!(state.can_submit());

        state.pending_save = Some("hi!".to_string());
        assert!(!state.push_draft_char('x'));
        assert!(!state.can_submit());
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut state = state_with_remote(3);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn window_shows_sentinel_only_near_the_end() {
        let mut state = state_with_remote(50);
        let vm = state.compute_viewmodel(CHROME_ROWS + 10, 80);
        assert_eq!(vm.display_items.len(), 10);
        assert!(!vm.sentinel_visible);
        assert!(vm.display_items[0].is_selected);

        state.jump_to_end();
        let vm = state.compute_viewmodel(CHROME_ROWS + 10, 80);
        assert!(vm.sentinel_visible);
        assert_eq!(vm.display_items.len(), 9);
        assert_eq!(vm.display_items.last().map(|d| d.badge.as_str()), Some("#1"));
    }

    #[test]
    fn tiny_terminal_shows_nothing() {
        let state = state_with_remote(5);
        let vm = state.compute_viewmodel(CHROME_ROWS, 80);
        assert!(vm.display_items.is_empty());
        assert!(!vm.sentinel_visible);
    }

    #[test]
    fn sentinel_edge_fires_once_per_entry() {
        let mut state = state_with_remote(1);
        assert!(state.observe_sentinel(true));
        assert!(!state.observe_sentinel(true));
        assert!(!state.observe_sentinel(false));
        assert!(state.observe_sentinel(true));

        state.reset_sentinel();
        assert!(state.observe_sentinel(true));
    }

    #[test]
    fn counts_summary_mentions_total_once_known() {
        let counts = ListCounts { visible: 5, known: 30, remote_loaded: 25, remote_total: Some(200) };
        assert_eq!(counts.summary(), "Showing 5 / 30 (loaded 25 of 200 from mock API)");

        let counts = ListCounts { remote_total: None, ..counts };
        assert_eq!(counts.summary(), "Showing 5 / 30 (loaded 25 from mock API)");
    }

    #[test]
    fn display_rows_carry_badge_origin_and_highlight() {
        let mut state = state_with_remote(2);
        let local = state.store.add_local("Mock my own", None, i64::MAX).unwrap();
        state.view.filter_text = "mock".to_string();
        state.refresh_view();

        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.display_items[0].text, local.text);
        assert!(vm.display_items[0].is_local);
        assert_eq!(vm.display_items[0].highlight, Some((0, 4)));
        assert!(!vm.display_items[1].is_local);
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("héllo wörld", 8), "héllo...");
        assert_eq!(truncate_chars("short", 8), "short");
    }
}
