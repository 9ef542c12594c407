use crate::{error::GenerationError, models::GeneratedImage};
use std::sync::Arc;

pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a vibe for your wallpaper.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Immutable snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub phase: Phase,
    pub active_prompt: String,
    pub images: Arc<Vec<GeneratedImage>>,
    pub error: Option<String>,
    pub selected: Option<String>,
    pub history: Arc<Vec<String>>,
    /// Token of the most recently accepted submission.
    pub latest_request: u64,
}

#[derive(Debug, Clone)]
pub enum Event {
    Rejected(String),
    Started { prompt: String, token: u64 },
    Resolved {
        token: u64,
        result: Result<Vec<GeneratedImage>, GenerationError>,
    },
    HistoryChanged(Vec<String>),
    Selected(String),
    SelectionCleared,
}

impl AppState {
    pub fn with_history(history: Vec<String>) -> Self {
        Self {
            history: Arc::new(history),
            ..Self::default()
        }
    }

    pub fn selected_image(&self) -> Option<&GeneratedImage> {
        let id = self.selected.as_deref()?;
        self.images.iter().find(|image| image.id == id)
    }

    /// Whether a resolution carrying `token` should still be applied.
    pub fn accepts(&self, token: u64) -> bool {
        token == self.latest_request
    }

    /// Pure transition: returns the next snapshot, leaving `self` untouched.
    pub fn apply(&self, event: Event) -> AppState {
        let mut next = self.clone();

        match event {
            Event::Rejected(message) => {
                next.phase = Phase::Failed;
                next.error = Some(message);
            }
            Event::Started { prompt, token } => {
                next.phase = Phase::Loading;
                next.active_prompt = prompt;
                next.images = Arc::new(Vec::new());
                next.error = None;
                next.selected = None;
                next.latest_request = token;
            }
            Event::Resolved { token, result } => {
                if !self.accepts(token) {
                    return next;
                }
                match result {
                    Ok(images) => {
                        next.phase = Phase::Success;
                        next.images = Arc::new(images);
                    }
                    Err(e) => {
                        next.phase = Phase::Failed;
                        next.error = Some(e.to_string());
                    }
                }
            }
            Event::HistoryChanged(entries) => {
                next.history = Arc::new(entries);
            }
            Event::Selected(id) => {
                if next.images.iter().any(|image| image.id == id) {
                    next.selected = Some(id);
                }
            }
            Event::SelectionCleared => {
                next.selected = None;
            }
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(prompt: &str, token: u64) -> Event {
        Event::Started {
            prompt: prompt.into(),
            token,
        }
    }

    #[test]
    fn start_clears_previous_results() {
        let state = AppState::default()
            .apply(started("a", 1))
            .apply(Event::Resolved {
                token: 1,
                result: Ok(vec![GeneratedImage::new(vec![1])]),
            });
        assert_eq!(state.phase, Phase::Success);

        let reloading = state.apply(started("b", 2));
        assert_eq!(reloading.phase, Phase::Loading);
        assert!(reloading.images.is_empty());
        assert!(reloading.error.is_none());
        assert_eq!(reloading.active_prompt, "b");
        assert_eq!(state.images.len(), 1);
    }

    #[test]
    fn stale_resolution_is_ignored() {
        let state = AppState::default().apply(started("a", 1)).apply(started("b", 2));
        let state = state.apply(Event::Resolved {
            token: 1,
            result: Ok(vec![GeneratedImage::new(vec![1])]),
        });

        assert_eq!(state.phase, Phase::Loading);
        assert!(state.images.is_empty());
    }

    #[test]
    fn failure_keeps_results_empty() {
        let state = AppState::default().apply(started("x", 1)).apply(Event::Resolved {
            token: 1,
            result: Err(GenerationError::EmptyResult),
        });

        assert_eq!(state.phase, Phase::Failed);
        assert!(state.images.is_empty());
        assert_eq!(state.error, Some(GenerationError::EmptyResult.to_string()));
    }

    #[test]
    fn only_known_images_can_be_selected() {
        let image = GeneratedImage::new(vec![9]);
        let id = image.id.clone();
        let state = AppState::default().apply(started("a", 1)).apply(Event::Resolved {
            token: 1,
            result: Ok(vec![image]),
        });

        assert!(state.apply(Event::Selected("nope".into())).selected.is_none());
        let selected = state.apply(Event::Selected(id.clone()));
        assert_eq!(selected.selected_image().map(|i| i.id.as_str()), Some(id.as_str()));
        assert!(selected.apply(Event::SelectionCleared).selected.is_none());
    }
}
