//! Transient "copied" confirmation with auto-hide
//!
//! A successful copy shows the copied text; a tokio task hides it again after
//! the configured duration. A newer copy aborts the pending task and starts a
//! fresh one, so the visible window always counts from the latest copy.
//!
//! Must be driven from inside a tokio runtime.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// How long the confirmation stays visible by default
pub const DEFAULT_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

/// Copy feedback state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum FeedbackState {
    #[default]
    Hidden,
    Visible(String),
}

impl FeedbackState {
    pub fn is_visible(&self) -> bool {
        matches!(self, FeedbackState::Visible(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            FeedbackState::Visible(text) => Some(text),
            FeedbackState::Hidden => None,
        }
    }
}

impl std::fmt::Display for FeedbackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackState::Hidden => write!(f, "hidden"),
            FeedbackState::Visible(text) => write!(f, "copied {}", text),
        }
    }
}

struct Timer {
    /// Bumped on every show/hide; a hide task only acts on its own generation
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// Copy confirmation with a cancellable hide timer
pub struct CopyFeedback {
    duration: Duration,
    state: Arc<watch::Sender<FeedbackState>>,
    timer: Arc<Mutex<Timer>>,
}

impl CopyFeedback {
    pub fn new(duration: Duration) -> Self {
        let (tx, _rx) = watch::channel(FeedbackState::Hidden);
        Self {
            duration,
            state: Arc::new(tx),
            timer: Arc::new(Mutex::new(Timer {
                generation: 0,
                pending: None,
            })),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current state
    pub fn current(&self) -> FeedbackState {
        self.state.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().is_visible()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<FeedbackState> {
        self.state.subscribe()
    }

    /// Show `text` and (re)start the hide timer
    pub fn show(&self, text: impl Into<String>) {
        let text = text.into();
        let mut timer = self.timer.lock();

        timer.generation += 1;
        let generation = timer.generation;
        if let Some(previous) = timer.pending.take() {
            trace!("Superseding pending feedback hide");
            previous.abort();
        }

        debug!(text = %text, "Copy feedback visible");
        self.state.send_replace(FeedbackState::Visible(text));

        let state = Arc::clone(&self.state);
        let timer_ref = Arc::clone(&self.timer);
        let duration = self.duration;
        timer.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;

            let mut timer = timer_ref.lock();
            if timer.generation != generation {
                return;
            }
            timer.pending = None;
            state.send_replace(FeedbackState::Hidden);
            debug!("Copy feedback hidden");
        }));
    }

    /// Hide immediately and drop any pending timer
    pub fn hide(&self) {
        let mut timer = self.timer.lock();
        timer.generation += 1;
        if let Some(pending) = timer.pending.take() {
            pending.abort();
        }
        self.state.send_replace(FeedbackState::Hidden);
    }
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_DURATION)
    }
}

impl Drop for CopyFeedback {
    fn drop(&mut self) {
        if let Some(pending) = self.timer.lock().pending.take() {
            pending.abort();
        }
    }
}

impl std::fmt::Debug for CopyFeedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyFeedback")
            .field("duration", &self.duration)
            .field("state", &self.current())
            .finish()
    }
}
