//! Auto-dismissing flash messages.
//!
//! Each pushed message is removed again after a fixed delay by a spawned
//! timer task, so the board only ever shows recent notices.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Info,
    Success,
    Error,
}

/// A single notice on the board.
#[derive(Debug, Clone, Serialize)]
pub struct FlashMessage {
    pub id: u64,
    pub level: FlashLevel,
    pub text: String,
}

/// Board of transient notices with timed auto-dismiss.
#[derive(Clone)]
pub struct FlashBoard {
    messages: Arc<Mutex<Vec<FlashMessage>>>,
    next_id: Arc<AtomicU64>,
    dismiss_after: Duration,
}

impl FlashBoard {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            dismiss_after,
        }
    }

    /// Post a message and schedule its auto-dismiss. Returns the message id.
    ///
    /// Must be called from within a tokio runtime.
    pub fn push(&self, level: FlashLevel, text: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let message = FlashMessage {
            id,
            level,
            text: text.into(),
        };

        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }

        let board = self.clone();
        let delay = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            board.dismiss(id);
        });

        id
    }

    /// Remove a message before its timer fires. Removing an id that is
    /// already gone is a no-op.
    pub fn dismiss(&self, id: u64) {
        if let Ok(mut messages) = self.messages.lock() {
            let before = messages.len();
            messages.retain(|m| m.id != id);
            if messages.len() < before {
                tracing::debug!("Dismissed flash message {}", id);
            }
        }
    }

    /// Snapshot of the messages currently on the board.
    pub fn messages(&self) -> Vec<FlashMessage> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}
