//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where events turn into state changes.
//! It returns whether a re-render is needed plus the actions the runtime must
//! perform. It never calls the host directly.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Initialize`, `CloseFocus`
//! - **Compose**: `Char`, `Backspace`, `Submit`, `SaveElapsed`
//! - **List**: `KeyDown`, `KeyUp`, `JumpToEnd`, `RemoveSelected`, `Remove`
//! - **Pagination**: `ToggleSort`, `LoadMore`, `ProximitySignal`
//! - **Focus**: `FocusNext`, `FocusCompose`, `FocusFilter`, `FocusList`, `ClearFilter`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use listboard::app::{handle_event, Action, AppState, Event};
//! use listboard::ui::Theme;
//! use std::time::Duration;
//!
//! let mut state = AppState::new(25, Duration::from_millis(500), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Initialize)?;
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! # Ok::<(), listboard::ListboardError>(())
//! ```

use crate::app::{Action, AppState, InputFocus};
use crate::domain::error::Result;
use crate::domain::ItemId;
use crate::pagination::PageOutcome;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, host timers, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Plugin is ready; requests the first page.
    Initialize,

    /// Typed character for the focused text field.
    Char(char),
    /// Deletes the last character of the focused text field.
    Backspace,
    /// Submits the draft.
    Submit,
    /// The save timer armed by `Action::ScheduleSave` fired.
    SaveElapsed,

    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,
    /// Selects the last visible item.
    JumpToEnd,
    /// Removes the item under the cursor.
    RemoveSelected,
    /// Removes a specific item.
    Remove { id: ItemId },

    /// Flips newest/oldest and restarts pagination.
    ToggleSort,
    /// Explicit "load more" request.
    LoadMore,
    /// The loader row scrolled into view.
    ProximitySignal,

    FocusNext,
    FocusCompose,
    FocusFilter,
    FocusList,
    /// Empties the filter and returns focus to the list.
    ClearFilter,

    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the UI should re-render.
///
/// # Errors
///
/// Returns an error if the pending save can no longer be turned into an item.
/// State stays consistent; the runtime logs the error and keeps going.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Initialize => {
            state.refresh_view();
            Ok((true, request_page(state)))
        }
        Event::Char(c) => match state.focus {
            InputFocus::Compose => Ok((state.push_draft_char(*c), vec![])),
            InputFocus::Filter => {
                state.view.filter_text.push(*c);
                state.selected_index = 0;
                tracing::trace!(filter = %state.view.filter_text, "filter updated");
                state.refresh_view();
                Ok((true, vec![]))
            }
            InputFocus::List => Ok((false, vec![])),
        },
        Event::Backspace => match state.focus {
            InputFocus::Compose => Ok((state.pop_draft_char(), vec![])),
            InputFocus::Filter => {
                if state.view.filter_text.pop().is_none() {
                    return Ok((false, vec![]));
                }
                state.selected_index = 0;
                state.refresh_view();
                Ok((true, vec![]))
            }
            InputFocus::List => Ok((false, vec![])),
        },
        Event::Submit => {
            if !state.can_submit() {
                tracing::debug!(saving = state.is_saving(), "submit ignored");
                return Ok((false, vec![]));
            }
            let snapshot = state.draft.trim().to_string();
            tracing::debug!(chars = snapshot.chars().count(), delay = ?state.save_delay, "save scheduled");
            state.pending_save = Some(snapshot);
            Ok((true, vec![Action::ScheduleSave { delay: state.save_delay }]))
        }
        Event::SaveElapsed => {
            let Some(text) = state.pending_save.take() else {
                tracing::debug!("save timer fired with nothing pending");
                return Ok((false, vec![]));
            };
            let now_ms = chrono::Utc::now().timestamp_millis();
            state.store.add_local(&text, state.pagination.total(), now_ms)?;

            state.draft.clear();
            state.validation_error = None;
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::JumpToEnd => {
            state.jump_to_end();
            Ok((true, vec![]))
        }
        Event::RemoveSelected => {
            let Some(id) = state.selected_item().map(|item| item.id.clone()) else {
                return Ok((false, vec![]));
            };
            Ok((remove(state, &id), vec![]))
        }
        Event::Remove { id } => Ok((remove(state, id), vec![])),
        Event::ToggleSort => {
            let sort = state.view.sort_mode.toggled();
            state.view.sort_mode = sort;
            state.pagination.reset(sort, &mut state.store);
            state.reset_sentinel();
            state.selected_index = 0;
            state.refresh_view();
            Ok((true, request_page(state)))
        }
        Event::LoadMore | Event::ProximitySignal => {
            let actions = request_page(state);
            Ok((!actions.is_empty(), actions))
        }
        Event::FocusNext => {
            state.focus = state.focus.next();
            Ok((true, vec![]))
        }
        Event::FocusCompose => {
            state.focus = InputFocus::Compose;
            Ok((true, vec![]))
        }
        Event::FocusFilter => {
            state.focus = InputFocus::Filter;
            Ok((true, vec![]))
        }
        Event::FocusList => {
            state.focus = InputFocus::List;
            Ok((true, vec![]))
        }
        Event::ClearFilter => {
            state.view.filter_text.clear();
            state.focus = InputFocus::List;
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::WorkerResponse(response) => match response {
            WorkerResponse::Configured { total_items } => {
                tracing::debug!(total_items, "worker configured");
                Ok((false, vec![]))
            }
            WorkerResponse::PageLoaded { request, page } => {
                let outcome = state.pagination.complete(request, Ok(page.clone()), &mut state.store);
                if outcome == PageOutcome::Stale {
                    return Ok((false, vec![]));
                }
                // a loader still on screen after the page counts as a new entry
                state.reset_sentinel();
                state.refresh_view();
                Ok((true, vec![]))
            }
            WorkerResponse::PageFailed { request, message } => {
                let outcome = state.pagination.complete(request, Err(message.clone()), &mut state.store);
                Ok((outcome != PageOutcome::Stale, vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                Ok((state.pagination.abort_in_flight(), vec![]))
            }
        },
    }
}

/// Checks whether the loader row is on screen at `rows` x `cols` and raises
/// the proximity signal on a rising edge.
///
/// Called by the runtime right before drawing, so a frame that triggers a
/// fetch already shows the loading state.
///
/// # Errors
///
/// Propagates errors from [`handle_event`].
pub fn sync_sentinel(state: &mut AppState, rows: usize, cols: usize) -> Result<(bool, Vec<Action>)> {
    let visible = state.compute_viewmodel(rows, cols).sentinel_visible;
    if !state.observe_sentinel(visible) {
        return Ok((false, vec![]));
    }
    tracing::debug!(rows, "loader row scrolled into view");
    handle_event(state, &Event::ProximitySignal)
}

/// Claims the fetch slot and wraps the request for the worker, if allowed.
fn request_page(state: &mut AppState) -> Vec<Action> {
    state
        .pagination
        .request_next_page()
        .map(|request| vec![Action::PostToWorker(WorkerMessage::fetch_page(request))])
        .unwrap_or_default()
}

fn remove(state: &mut AppState, id: &ItemId) -> bool {
    if !state.store.remove(id) {
        return false;
    }
    state.refresh_view();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Page, PageRequest};
    use crate::domain::{Item, SortMode};
    use crate::ui::Theme;
    use std::time::Duration;

    fn new_state() -> AppState {
        AppState::new(25, Duration::from_millis(500), Theme::default())
    }

    fn fetched_request(actions: &[Action]) -> PageRequest {
        match actions {
            [Action::PostToWorker(WorkerMessage::FetchPage { request, .. })] => *request,
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn page(seqs: std::ops::RangeInclusive<u64>, total: usize) -> Page {
        Page {
            items: seqs
                .rev()
                .map(|seq| Item {
                    id: ItemId::remote(format!("mock-{seq}")),
                    text: format!("Mock item #{seq}"),
                    created_at: i64::try_from(seq).unwrap(),
                    seq,
                })
                .collect(),
            total,
        }
    }

    #[test]
    fn load_more_while_fetching_is_absorbed() {
        let mut state = new_state();
        let (_, actions) = handle_event(&mut state, &Event::Initialize).unwrap();
        assert_eq!(fetched_request(&actions).offset, 0);

        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        let (_, actions) = handle_event(&mut state, &Event::ProximitySignal).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn typing_in_list_focus_is_ignored() {
        let mut state = new_state();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.draft.is_empty());
        assert!(state.view.filter_text.is_empty());
    }

    #[test]
    fn filter_typing_and_clear() {
        let mut state = new_state();
        state.store.replace_remote_page(page(1..=12, 12).items, true);
        handle_event(&mut state, &Event::FocusFilter).unwrap();
        for c in "#1".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        assert_eq!(state.visible_items().len(), 4);

        handle_event(&mut state, &Event::ClearFilter).unwrap();
        assert_eq!(state.focus, InputFocus::List);
        assert_eq!(state.visible_items().len(), 12);
    }

    #[test]
    fn empty_submit_is_silent() {
        let mut state = new_state();
        handle_event(&mut state, &Event::FocusCompose).unwrap();
        handle_event(&mut state, &Event::Char(' ')).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.validation_error.is_none());
    }

    #[test]
    fn stale_page_does_not_render() {
        let mut state = new_state();
        let (_, actions) = handle_event(&mut state, &Event::Initialize).unwrap();
        let stale = fetched_request(&actions);
        let (_, actions) = handle_event(&mut state, &Event::ToggleSort).unwrap();
        let fresh = fetched_request(&actions);
        assert_eq!(fresh.sort, SortMode::Oldest);

        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::PageLoaded { request: stale, page: page(1..=25, 200) }),
        )
        .unwrap();
        assert!(!render);
        assert!(state.store.remote().is_empty());
    }

    #[test]
    fn worker_error_releases_a_stuck_fetch() {
        let mut state = new_state();
        handle_event(&mut state, &Event::Initialize).unwrap();
        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error { message: "bad payload".into() }),
        )
        .unwrap();
        assert!(render);
        assert!(!state.pagination.is_loading());

        let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert_eq!(fetched_request(&actions).offset, 0);
    }

    #[test]
    fn remove_selected_drops_the_cursor_item() {
        let mut state = new_state();
        state.store.replace_remote_page(page(1..=3, 3).items, true);
        state.refresh_view();
        state.move_selection_down();

        handle_event(&mut state, &Event::RemoveSelected).unwrap();
        let seqs: Vec<u64> = state.visible_items().iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![3, 1]);

        let (render, _) = handle_event(&mut state, &Event::Remove { id: ItemId::remote("mock-2") }).unwrap();
        assert!(!render);
    }

    #[test]
    fn tab_cycles_focus() {
        let mut state = new_state();
        handle_event(&mut state, &Event::FocusNext).unwrap();
        assert_eq!(state.focus, InputFocus::Compose);
        handle_event(&mut state, &Event::FocusNext).unwrap();
        assert_eq!(state.focus, InputFocus::Filter);
        handle_event(&mut state, &Event::FocusNext).unwrap();
        assert_eq!(state.focus, InputFocus::List);
    }
}
