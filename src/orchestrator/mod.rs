pub mod state;

use crate::{gemini::ImageGenerator, history::HistoryStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

pub use state::{AppState, Event, Phase, EMPTY_PROMPT_MESSAGE};

/// Owns the generation lifecycle and publishes a new `AppState` after every event.
///
/// Submissions may overlap. Each accepted submission gets a fresh request token
/// and only the resolution carrying the latest token is applied; earlier ones
/// are dropped when they land. After `shutdown` no resolution is applied.
pub struct Orchestrator {
    generator: Arc<dyn ImageGenerator>,
    history: Mutex<HistoryStore>,
    state: watch::Sender<Arc<AppState>>,
    closed: AtomicBool,
}

impl Orchestrator {
    pub fn new(generator: Arc<dyn ImageGenerator>, history: HistoryStore) -> Self {
        let initial = AppState::with_history(history.entries().to_vec());
        let (state, _) = watch::channel(Arc::new(initial));

        Self {
            generator,
            history: Mutex::new(history),
            state,
            closed: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> Arc<AppState> {
        self.state.borrow().clone()
    }

    fn dispatch(&self, event: Event) {
        self.state.send_modify(|state| *state = Arc::new(state.apply(event)));
    }

    pub async fn submit(&self, prompt: &str) -> Arc<AppState> {
        if self.closed.load(Ordering::SeqCst) {
            log::warn!("Submit after shutdown ignored");
            return self.state();
        }

        if prompt.trim().is_empty() {
            self.dispatch(Event::Rejected(EMPTY_PROMPT_MESSAGE.to_string()));
            return self.state();
        }

        let mut token = 0;
        self.state.send_modify(|state| {
            token = state.latest_request + 1;
            *state = Arc::new(state.apply(Event::Started {
                prompt: prompt.to_string(),
                token,
            }));
        });
        log::debug!("Request {} started", token);

        self.record_history(prompt);

        let result = self.generator.generate(prompt).await;

        if self.closed.load(Ordering::SeqCst) {
            log::debug!("Request {} resolved after shutdown, dropping", token);
            return self.state();
        }
        if !self.state().accepts(token) {
            log::info!("Request {} superseded, dropping its result", token);
        }
        self.dispatch(Event::Resolved { token, result });

        self.state()
    }

    /// Runs the active prompt again and closes any full-screen view.
    pub async fn remix(&self) -> Arc<AppState> {
        self.dispatch(Event::SelectionCleared);
        let prompt = self.state().active_prompt.clone();
        self.submit(&prompt).await
    }

    /// Resubmits the history entry at `index`, if there is one.
    pub async fn replay(&self, index: usize) -> Option<Arc<AppState>> {
        let entry = match self.history.lock() {
            Ok(history) => history.select(index).map(str::to_string),
            Err(_) => {
                log::error!("History lock poisoned");
                None
            }
        }?;
        Some(self.submit(&entry).await)
    }

    pub fn clear_history(&self) {
        match self.history.lock() {
            Ok(mut history) => {
                if let Err(e) = history.clear() {
                    log::error!("Failed to clear persisted history: {}", e);
                }
                self.dispatch(Event::HistoryChanged(Vec::new()));
            }
            Err(_) => log::error!("History lock poisoned"),
        }
    }

    pub fn history(&self) -> Vec<String> {
        self.state().history.to_vec()
    }

    pub fn select_image(&self, id: &str) {
        self.dispatch(Event::Selected(id.to_string()));
    }

    pub fn close_image(&self) {
        self.dispatch(Event::SelectionCleared);
    }

    /// Stops applying results; in-flight calls still finish but change nothing.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    // Publishes while the guard is held so snapshots reach the state in the
    // same order the store was mutated.
    fn record_history(&self, prompt: &str) {
        match self.history.lock() {
            Ok(mut history) => {
                if let Err(e) = history.record(prompt) {
                    log::error!("Failed to persist history: {}", e);
                }
                self.dispatch(Event::HistoryChanged(history.entries().to_vec()));
            }
            Err(_) => log::error!("History lock poisoned"),
        }
    }
}
