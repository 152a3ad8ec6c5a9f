//! Quiet-window debouncing for search input.

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Delivers only the last value of a burst once `window` has passed with no
/// new input. Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    window: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                window,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Restarts the quiet window with `value` as the candidate.
    pub fn push(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let _ = tx.send(value);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
