//! List processing and the load/retry state machine
//!
//! [`ListProcessor`] owns the [`ListState`] and is the only thing that writes
//! to it. Every transition is published on a `tokio::sync::watch` channel so
//! a presentation layer can either subscribe to changes or poll snapshots.
//!
//! Both the initial load and retries follow the same policy: clear the list
//! when the load starts, replace it on success, and store the fixed
//! [`FAILURE_MESSAGE`] on failure. The underlying error is logged and handed
//! back in the [`LoadOutcome`] but never displayed.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::app::client::ItemSource;
use crate::app::models::{Item, ListState, LoadPhase, LoadTrigger};
use crate::constants::FAILURE_MESSAGE;
use crate::errors::FetchError;

/// Result of a single `load` call
#[derive(Debug)]
pub enum LoadOutcome {
    /// The list was replaced
    Loaded {
        /// Items kept for display
        retained: usize,
        /// Items dropped for having no usable name
        discarded: usize,
    },
    /// The fetch failed and the state now carries the error message
    Failed(FetchError),
    /// Another load was already in flight; nothing changed
    Skipped,
}

impl LoadOutcome {
    /// True if the state was updated with a fresh list
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Whether an item may be shown: its name must be present and non-blank
pub fn is_displayable(item: &Item) -> bool {
    item.name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty())
}

/// Stable sort by `list_id`, then by `name` (case-sensitive)
pub fn sort_items(items: &mut [Item]) {
    items.sort_by(|a, b| {
        a.list_id
            .cmp(&b.list_id)
            .then_with(|| a.name.as_deref().cmp(&b.name.as_deref()))
    });
}

/// Filter out undisplayable items and sort the rest into display order
pub fn prepare_items(items: Vec<Item>) -> Vec<Item> {
    let mut kept: Vec<Item> = items.into_iter().filter(is_displayable).collect();
    sort_items(&mut kept);
    kept
}

/// Drives loads from an [`ItemSource`] into a published [`ListState`]
pub struct ListProcessor<S> {
    source: S,
    state: watch::Sender<ListState>,
}

impl<S: ItemSource> ListProcessor<S> {
    /// Create a processor in the idle state
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(ListState::default());
        Self { source, state }
    }

    /// Subscribe to every state transition
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ListState {
        self.state.borrow().clone()
    }

    /// First load on activation
    pub async fn activate(&self) -> LoadOutcome {
        self.load(LoadTrigger::Initial).await
    }

    /// Load again after a failure (or to refresh)
    pub async fn retry(&self) -> LoadOutcome {
        self.load(LoadTrigger::Retry).await
    }

    /// Run one fetch-filter-sort cycle
    ///
    /// Returns [`LoadOutcome::Skipped`] without touching the state if a load
    /// is already in flight. If the returned future is dropped before the
    /// fetch completes, the state ends up `Failed` rather than `Loading`.
    pub async fn load(&self, trigger: LoadTrigger) -> LoadOutcome {
        if !self.begin_loading() {
            debug!("Ignoring {} load: another load is in flight", trigger);
            return LoadOutcome::Skipped;
        }
        debug!("Starting {} load", trigger);

        let guard = LoadingGuard::new(&self.state, trigger);
        let fetched = self.source.fetch_items().await;
        guard.disarm();

        match fetched {
            Ok(fetched) => {
                let total = fetched.len();
                let items = prepare_items(fetched);
                let retained = items.len();
                let discarded = total - retained;

                self.state.send_modify(|state| {
                    state.items = items;
                    state.error_message = None;
                    state.phase = LoadPhase::Loaded;
                });

                info!(
                    "{} load complete: {} items kept, {} discarded",
                    trigger, retained, discarded
                );
                LoadOutcome::Loaded {
                    retained,
                    discarded,
                }
            }
            Err(e) => {
                warn!("{} load failed: {}", trigger, e);

                self.state.send_modify(mark_failed);
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Atomically switch to `Loading` unless already there
    fn begin_loading(&self) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                return false;
            }
            state.items.clear();
            state.phase = LoadPhase::Loading;
            true
        })
    }
}

fn mark_failed(state: &mut ListState) {
    state.items.clear();
    state.error_message = Some(FAILURE_MESSAGE.to_string());
    state.phase = LoadPhase::Failed;
}

/// Moves a still-`Loading` state to `Failed` when a load is cancelled
struct LoadingGuard<'a> {
    state: &'a watch::Sender<ListState>,
    trigger: LoadTrigger,
    armed: bool,
}

impl<'a> LoadingGuard<'a> {
    fn new(state: &'a watch::Sender<ListState>, trigger: LoadTrigger) -> Self {
        Self {
            state,
            trigger,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let trigger = self.trigger;
        self.state.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            warn!("{} load cancelled before the fetch completed", trigger);
            mark_failed(state);
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::sync::Notify;

    use crate::errors::FetchResult;

    /// Replays canned responses in order
    struct ScriptedSource {
        responses: Mutex<VecDeque<FetchResult<Vec<Item>>>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<FetchResult<Vec<Item>>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    impl ItemSource for ScriptedSource {
        async fn fetch_items(&self) -> FetchResult<Vec<Item>> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(FetchError::ServerError { status: 503 }))
        }
    }

    /// Blocks every fetch until the gate is opened
    struct GatedSource {
        gate: Arc<Notify>,
        payload: Vec<Item>,
    }

    impl ItemSource for GatedSource {
        async fn fetch_items(&self) -> FetchResult<Vec<Item>> {
            self.gate.notified().await;
            Ok(self.payload.clone())
        }
    }

    /// Never completes
    struct HangingSource;

    impl ItemSource for HangingSource {
        async fn fetch_items(&self) -> FetchResult<Vec<Item>> {
            std::future::pending().await
        }
    }

    fn transport_failure() -> FetchError {
        FetchError::Timeout {
            timeout: Duration::from_secs(30),
        }
    }

    /// Small deterministic LCG so payload generation needs no extra crate
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, bound: u64) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (self.0 >> 33) % bound
        }
    }

    fn generated_payload(rng: &mut Lcg) -> Vec<Item> {
        const NAMES: [Option<&str>; 9] = [
            None,
            Some(""),
            Some("  "),
            Some("\t\n"),
            Some("a"),
            Some("B"),
            Some("b"),
            Some("Item 10"),
            Some("Item 2"),
        ];
        let len = rng.next(20) as usize;
        (0..len)
            .map(|_| {
                let list_id = rng.next(5) as i64 - 1;
                let name = NAMES[rng.next(NAMES.len() as u64) as usize];
                Item {
                    list_id,
                    name: name.map(str::to_string),
                }
            })
            .collect()
    }

    #[test]
    fn test_blank_names_are_not_displayable() {
        assert!(is_displayable(&Item::new(1, "Item 1")));
        assert!(!is_displayable(&Item::new(1, "")));
        assert!(!is_displayable(&Item::new(1, "   \t")));
        assert!(!is_displayable(&Item::unnamed(1)));
    }

    #[test]
    fn test_sort_by_list_id_then_name() {
        let mut items = vec![
            Item::new(2, "b"),
            Item::new(1, "b"),
            Item::new(2, "a"),
            Item::new(1, "a"),
        ];
        sort_items(&mut items);
        assert_eq!(
            items,
            vec![
                Item::new(1, "a"),
                Item::new(1, "b"),
                Item::new(2, "a"),
                Item::new(2, "b"),
            ]
        );
    }

    #[test]
    fn test_name_order_is_lexicographic_and_case_sensitive() {
        // "Item 10" sorts before "Item 2"; uppercase before lowercase
        let mut items = vec![
            Item::new(1, "Item 2"),
            Item::new(1, "item 1"),
            Item::new(1, "Item 10"),
        ];
        sort_items(&mut items);
        let names: Vec<&str> = items.iter().map(Item::display_name).collect();
        assert_eq!(names, vec!["Item 10", "Item 2", "item 1"]);
    }

    #[test]
    fn test_prepare_items_scenario_a() {
        let payload = vec![Item::new(1, "a"), Item::new(1, ""), Item::new(0, "b")];
        assert_eq!(
            prepare_items(payload),
            vec![Item::new(0, "b"), Item::new(1, "a")]
        );
    }

    #[test]
    fn test_prepare_items_scenario_b() {
        let payload = vec![Item::unnamed(2), Item::new(2, "x")];
        assert_eq!(prepare_items(payload), vec![Item::new(2, "x")]);
    }

    #[test]
    fn test_prepare_items_is_idempotent() {
        let payload = vec![
            Item::new(3, "c"),
            Item::unnamed(1),
            Item::new(1, "z"),
            Item::new(3, "a"),
            Item::new(1, " "),
        ];
        let once = prepare_items(payload.clone());
        assert_eq!(prepare_items(payload), once);
        assert_eq!(prepare_items(once.clone()), once);
    }

    #[test]
    fn test_prepare_items_invariants_on_generated_payloads() {
        let mut rng = Lcg(0x5eed);
        for case in 0..500 {
            let payload = generated_payload(&mut rng);
            let expected_len = payload.iter().filter(|item| is_displayable(item)).count();
            let prepared = prepare_items(payload);

            assert_eq!(prepared.len(), expected_len, "case {case}");
            assert!(
                prepared.iter().all(is_displayable),
                "case {case}: blank name retained in {prepared:?}"
            );
            assert!(
                prepared.windows(2).all(|pair| {
                    (pair[0].list_id, pair[0].name.as_deref())
                        <= (pair[1].list_id, pair[1].name.as_deref())
                }),
                "case {case}: out of order {prepared:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_cancelled_load_does_not_stay_loading() {
        let processor = ListProcessor::new(HangingSource);

        let cancelled =
            tokio::time::timeout(Duration::from_millis(50), processor.activate()).await;
        assert!(cancelled.is_err());

        let state = processor.snapshot();
        assert!(!state.is_loading());
        assert_eq!(state.phase, LoadPhase::Failed);
        assert_eq!(state.error_message.as_deref(), Some(FAILURE_MESSAGE));

        // The retry path must still be usable after a cancellation
        let retried = tokio::time::timeout(Duration::from_millis(50), processor.retry()).await;
        assert!(retried.is_err(), "retry should have started a new fetch");
        assert!(!processor.snapshot().is_loading());
    }

    #[tokio::test]
    async fn test_retry_after_cancelled_load_recovers() {
        let gate = Arc::new(Notify::new());
        let processor = ListProcessor::new(GatedSource {
            gate: Arc::clone(&gate),
            payload: vec![Item::new(1, "a")],
        });

        let cancelled =
            tokio::time::timeout(Duration::from_millis(20), processor.activate()).await;
        assert!(cancelled.is_err());
        assert!(!processor.snapshot().is_loading());

        gate.notify_one();
        let outcome = processor.retry().await;
        assert!(outcome.is_loaded(), "unexpected outcome: {outcome:?}");
        assert_eq!(processor.snapshot().items, vec![Item::new(1, "a")]);
    }

    #[tokio::test]
    async fn test_successful_initial_load() {
        let processor = ListProcessor::new(ScriptedSource::new(vec![Ok(vec![
            Item::new(1, "a"),
            Item::new(1, ""),
            Item::new(0, "b"),
        ])]));

        let outcome = processor.activate().await;
        assert!(matches!(
            outcome,
            LoadOutcome::Loaded {
                retained: 2,
                discarded: 1
            }
        ));

        let state = processor.snapshot();
        assert_eq!(state.items, vec![Item::new(0, "b"), Item::new(1, "a")]);
        assert_eq!(state.error_message, None);
        assert_eq!(state.phase, LoadPhase::Loaded);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_initial_load_failure() {
        let processor = ListProcessor::new(ScriptedSource::new(vec![Err(transport_failure())]));

        let outcome = processor.activate().await;
        assert!(matches!(
            outcome,
            LoadOutcome::Failed(FetchError::Timeout { .. })
        ));

        let state = processor.snapshot();
        assert!(state.items.is_empty());
        assert_eq!(state.error_message.as_deref(), Some(FAILURE_MESSAGE));
        assert_eq!(state.phase, LoadPhase::Failed);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_retry_failure_clears_previous_items() {
        let processor = ListProcessor::new(ScriptedSource::new(vec![
            Ok(vec![Item::new(1, "a")]),
            Err(transport_failure()),
        ]));

        processor.activate().await;
        assert_eq!(processor.snapshot().items, vec![Item::new(1, "a")]);

        let outcome = processor.retry().await;
        assert!(matches!(outcome, LoadOutcome::Failed(_)));

        let state = processor.snapshot();
        assert!(state.items.is_empty());
        assert!(state.error_message.is_some());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_retry_after_failure_recovers() {
        let processor = ListProcessor::new(ScriptedSource::new(vec![
            Err(FetchError::ServerError { status: 500 }),
            Ok(vec![Item::new(2, "x"), Item::unnamed(2)]),
        ]));

        processor.activate().await;
        assert!(processor.snapshot().is_failed());

        let outcome = processor.retry().await;
        assert!(outcome.is_loaded());

        let state = processor.snapshot();
        assert_eq!(state.items, vec![Item::new(2, "x")]);
        assert_eq!(state.error_message, None);
        assert_eq!(state.phase, LoadPhase::Loaded);
    }

    #[tokio::test]
    async fn test_reload_of_same_payload_is_identical() {
        let payload = vec![Item::new(5, "e"), Item::new(4, "d"), Item::new(4, "c")];
        let processor = ListProcessor::new(ScriptedSource::new(vec![
            Ok(payload.clone()),
            Ok(payload),
        ]));

        processor.activate().await;
        let first = processor.snapshot();
        processor.retry().await;
        assert_eq!(processor.snapshot(), first);
    }

    #[tokio::test]
    async fn test_loading_flag_spans_the_fetch() {
        let gate = Arc::new(Notify::new());
        let processor = Arc::new(ListProcessor::new(GatedSource {
            gate: Arc::clone(&gate),
            payload: vec![Item::new(1, "a")],
        }));
        let mut rx = processor.subscribe();
        assert!(!rx.borrow().is_loading());

        let task = {
            let processor = Arc::clone(&processor);
            tokio::spawn(async move { processor.activate().await })
        };

        rx.wait_for(|state| state.is_loading()).await.unwrap();
        assert!(processor.snapshot().is_loading());

        gate.notify_one();
        let outcome = task.await.unwrap();
        assert!(outcome.is_loaded());

        let state = rx.wait_for(|state| !state.is_loading()).await.unwrap().clone();
        assert_eq!(state.items, vec![Item::new(1, "a")]);
    }

    #[tokio::test]
    async fn test_trigger_while_loading_is_skipped() {
        let gate = Arc::new(Notify::new());
        let processor = Arc::new(ListProcessor::new(GatedSource {
            gate: Arc::clone(&gate),
            payload: vec![Item::new(1, "a")],
        }));
        let mut rx = processor.subscribe();

        let task = {
            let processor = Arc::clone(&processor);
            tokio::spawn(async move { processor.activate().await })
        };
        rx.wait_for(|state| state.is_loading()).await.unwrap();

        let before = processor.snapshot();
        let outcome = processor.retry().await;
        assert!(matches!(outcome, LoadOutcome::Skipped));
        assert_eq!(processor.snapshot(), before);

        gate.notify_one();
        assert!(task.await.unwrap().is_loaded());
        assert!(!processor.snapshot().is_loading());
    }

    #[tokio::test]
    async fn test_subscribers_see_each_transition() {
        let processor = ListProcessor::new(ScriptedSource::new(vec![Err(transport_failure())]));
        let mut rx = processor.subscribe();

        processor.activate().await;

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.phase, LoadPhase::Failed);
        assert!(!rx.has_changed().unwrap());
    }
}
