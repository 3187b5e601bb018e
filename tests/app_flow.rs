//! End-to-end flows through `handle_event`, with the worker served in-process.

use std::time::Duration;

use listboard::backend::{BackendSettings, MockBackend, PageRequest};
use listboard::domain::SortMode;
use listboard::ui::Theme;
use listboard::worker::{ListboardWorker, WorkerMessage, WorkerResponse};
use listboard::{handle_event, sync_sentinel, Action, AppState, Event};

struct Harness {
    app: AppState,
    worker: ListboardWorker,
}

impl Harness {
    fn new() -> Self {
        Self::with_settings(BackendSettings::default())
    }

    fn with_settings(settings: BackendSettings) -> Self {
        Self {
            app: AppState::new(25, Duration::from_millis(500), Theme::default()),
            worker: ListboardWorker::with_source(Box::new(MockBackend::new(&settings, 0))),
        }
    }

    fn send(&mut self, event: &Event) -> (bool, Vec<Action>) {
        handle_event(&mut self.app, event).unwrap()
    }

    /// Serves every worker-bound action and feeds the responses back.
    fn run(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let mut pending = actions;
        let mut leftover = Vec::new();
        while let Some(action) = pending.pop() {
            match action {
                Action::PostToWorker(message) => {
                    let response = self.worker.handle_message(message);
                    let (_, next) = self.send(&Event::WorkerResponse(response));
                    pending.extend(next);
                }
                other => leftover.push(other),
            }
        }
        leftover
    }

    fn send_and_run(&mut self, event: &Event) -> Vec<Action> {
        let (_, actions) = self.send(event);
        self.run(actions)
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(&Event::Char(c));
        }
    }

    fn seqs(&self) -> Vec<u64> {
        self.app.visible_items().iter().map(|item| item.seq).collect()
    }
}

fn single_fetch(actions: &[Action]) -> PageRequest {
    match actions {
        [Action::PostToWorker(WorkerMessage::FetchPage { request, .. })] => *request,
        other => panic!("expected exactly one fetch, got {other:?}"),
    }
}

#[test]
fn first_page_is_newest_first() {
    let mut h = Harness::new();
    h.send_and_run(&Event::Initialize);

    let expected: Vec<u64> = (176..=200).rev().collect();
    assert_eq!(h.seqs(), expected);

    let items = h.app.visible_items();
    assert!(items.windows(2).all(|w| w[0].created_at > w[1].created_at));
    assert_eq!(h.app.counts().summary(), "Showing 25 / 25 (loaded 25 of 200 from mock API)");
    assert!(h.app.has_more());
}

#[test]
fn eight_pages_exhaust_the_source() {
    let mut h = Harness::new();
    h.send_and_run(&Event::Initialize);
    for _ in 0..7 {
        h.send_and_run(&Event::LoadMore);
    }

    assert_eq!(h.app.pagination.offset(), 200);
    assert_eq!(h.app.store.remote().len(), 200);
    assert!(!h.app.has_more());

    let (render, actions) = h.send(&Event::LoadMore);
    assert!(!render);
    assert!(actions.is_empty());

    let vm = h.app.compute_viewmodel(40, 80);
    assert_eq!(vm.loader.text, "Reached the end of the mock list");
}

#[test]
fn sort_toggle_restarts_with_one_fetch_and_drops_stale_page() {
    let mut h = Harness::new();
    h.send_and_run(&Event::Initialize);

    let (_, actions) = h.send(&Event::LoadMore);
    let stale = single_fetch(&actions);
    let stale_response = match actions.into_iter().next() {
        Some(Action::PostToWorker(message)) => h.worker.handle_message(message),
        _ => unreachable!(),
    };

    let (_, actions) = h.send(&Event::ToggleSort);
    let fresh = single_fetch(&actions);
    assert_eq!(fresh.offset, 0);
    assert_eq!(fresh.sort, SortMode::Oldest);
    assert_ne!(fresh.generation, stale.generation);
    assert!(h.app.store.remote().is_empty());
    assert_eq!(h.app.pagination.offset(), 0);

    let (render, follow_up) = h.send(&Event::WorkerResponse(stale_response));
    assert!(!render);
    assert!(follow_up.is_empty());
    assert!(h.app.store.remote().is_empty());

    h.run(actions);
    let expected: Vec<u64> = (1..=25).collect();
    assert_eq!(h.seqs(), expected);
}

#[test]
fn short_draft_shows_validation_and_blocks_submit() {
    for draft in ["hi", "hi "] {
        let mut h = Harness::new();
        h.send(&Event::FocusCompose);
        h.type_text(draft);

        let vm = h.app.compute_viewmodel(24, 80);
        assert_eq!(vm.validation_message.as_deref(), Some("Please enter at least 3 characters"));
        assert!(!vm.can_submit);

        let (render, actions) = h.send(&Event::Submit);
        assert!(!render);
        assert!(actions.is_empty());
    }
}

#[test]
fn save_flow_puts_new_item_at_the_head() {
    let mut h = Harness::new();
    h.send_and_run(&Event::Initialize);
    h.send(&Event::FocusCompose);
    h.type_text("hello");

    let (render, actions) = h.send(&Event::Submit);
    assert!(render);
    assert_eq!(actions, vec![Action::ScheduleSave { delay: Duration::from_millis(500) }]);
    assert!(h.app.is_saving());
    assert!(!h.app.can_submit());

    let (render, _) = h.send(&Event::Char('!'));
    assert!(!render);
    assert_eq!(h.app.draft, "hello");

    h.send(&Event::SaveElapsed);
    assert!(!h.app.is_saving());
    assert!(h.app.draft.is_empty());

    let head = &h.app.visible_items()[0];
    assert_eq!(head.text, "hello");
    assert_eq!(head.seq, 201);
    assert_eq!(h.app.counts().known, 26);
}

#[test]
fn removing_items_is_idempotent() {
    let mut h = Harness::new();
    h.send_and_run(&Event::Initialize);
    let id = h.app.visible_items()[3].id.clone();

    let (render, _) = h.send(&Event::Remove { id: id.clone() });
    assert!(render);
    assert!(!h.app.store.contains(&id));
    assert_eq!(h.app.visible_items().len(), 24);

    let (render, _) = h.send(&Event::Remove { id });
    assert!(!render);
    assert_eq!(h.app.visible_items().len(), 24);
}

#[test]
fn proximity_signal_fires_once_per_entry() {
    let mut h = Harness::new();
    h.send_and_run(&Event::Initialize);

    let vm = h.app.compute_viewmodel(24, 80);
    assert!(!vm.sentinel_visible);
    assert!(!h.app.observe_sentinel(vm.sentinel_visible));

    h.send(&Event::JumpToEnd);
    let vm = h.app.compute_viewmodel(24, 80);
    assert!(vm.sentinel_visible);
    assert_eq!(vm.loader.text, "Scroll for more items");
    assert!(h.app.observe_sentinel(true));

    let (_, actions) = h.send(&Event::ProximitySignal);
    let request = single_fetch(&actions);
    assert_eq!(request.offset, 25);
    assert_eq!(h.app.compute_viewmodel(24, 80).loader.text, "Loading more...");

    assert!(!h.app.observe_sentinel(true));
    let (_, duplicate) = h.send(&Event::ProximitySignal);
    assert!(duplicate.is_empty());

    h.run(actions);
    assert_eq!(h.app.pagination.offset(), 50);
}

#[test]
fn tall_pane_keeps_loading_while_loader_stays_visible() {
    let mut h = Harness::new();
    let (_, initial) = h.send(&Event::Initialize);

    let (_, absorbed) = sync_sentinel(&mut h.app, 90, 80).unwrap();
    assert!(absorbed.is_empty());
    h.run(initial);
    assert_eq!(h.app.pagination.offset(), 25);

    let (_, actions) = sync_sentinel(&mut h.app, 90, 80).unwrap();
    assert_eq!(single_fetch(&actions).offset, 25);
    h.run(actions);
    assert_eq!(h.app.pagination.offset(), 50);

    let (_, actions) = sync_sentinel(&mut h.app, 90, 80).unwrap();
    assert_eq!(single_fetch(&actions).offset, 50);
}

#[test]
fn frame_that_triggers_a_fetch_shows_loading() {
    let mut h = Harness::new();
    h.send_and_run(&Event::Initialize);
    h.send(&Event::JumpToEnd);

    let (render, actions) = sync_sentinel(&mut h.app, 24, 80).unwrap();
    assert!(render);
    assert_eq!(actions.len(), 1);

    let vm = h.app.compute_viewmodel(24, 80);
    assert!(vm.is_page_loading);
    assert_eq!(vm.loader.text, "Loading more...");
}

#[test]
fn worker_error_then_retry_does_not_duplicate_items() {
    let mut h = Harness::new();
    h.send_and_run(&Event::Initialize);

    let (_, abandoned) = h.send(&Event::LoadMore);
    h.send(&Event::WorkerResponse(WorkerResponse::Error { message: "undecodable".into() }));
    let (_, retry) = h.send(&Event::LoadMore);
    assert_eq!(single_fetch(&retry).offset, 25);

    let (_, more) = h.send(&Event::LoadMore);
    assert!(more.is_empty());

    h.run(abandoned);
    h.run(retry);

    let remote = h.app.store.remote();
    let mut ids: Vec<&str> = remote.iter().map(|item| item.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(remote.len(), 50);
    assert_eq!(ids.len(), 50);
    assert_eq!(h.app.pagination.offset(), 50);
}

#[test]
fn fetch_failure_is_reported_and_retry_recovers() {
    let mut h = Harness::with_settings(BackendSettings {
        fail_every: Some(2),
        ..BackendSettings::default()
    });
    h.send_and_run(&Event::Initialize);
    h.send_and_run(&Event::LoadMore);

    let vm = h.app.compute_viewmodel(24, 80);
    assert_eq!(vm.fetch_message.as_deref(), Some("Failed to load items. Please retry."));
    assert_eq!(h.app.pagination.offset(), 25);
    assert!(h.app.has_more());

    h.send_and_run(&Event::LoadMore);
    assert!(h.app.pagination.error().is_none());
    assert_eq!(h.app.pagination.offset(), 50);
}

#[test]
fn worker_payload_round_trip() {
    let mut worker = ListboardWorker::with_source(Box::new(MockBackend::new(&BackendSettings::default(), 0)));
    let request = PageRequest { offset: 190, limit: 25, sort: SortMode::Newest, generation: 0 };
    let payload = serde_json::to_string(&WorkerMessage::fetch_page(request)).unwrap();

    let response: WorkerResponse = serde_json::from_str(&worker.handle_payload(&payload).unwrap()).unwrap();
    match response {
        WorkerResponse::PageLoaded { page, .. } => {
            assert_eq!(page.items.len(), 10);
            assert_eq!(page.items.last().map(|i| i.seq), Some(1));
        }
        other => panic!("unexpected response: {other:?}"),
    }

    assert!(worker.handle_payload("{not json").is_err());
}
