//! Badge display seam.
//!
//! The synchronizer never touches UI toolkits directly; it writes through
//! this trait. Embedders hand in whatever backs their counter widget, and
//! `SharedBadge` covers the common case of a snapshot-readable in-process
//! badge.

use std::sync::Mutex;

/// A visible counter the synchronizer writes to.
///
/// Writes may come from overlapping refreshes; the last writer wins and
/// implementations are expected to tolerate that.
pub trait BadgeDisplay: Send + Sync {
    /// Replace the badge text.
    fn set_text(&self, text: &str);

    /// Show or hide the badge.
    fn set_visible(&self, visible: bool);
}

#[derive(Debug, Clone, Default)]
struct BadgeState {
    text: String,
    visible: bool,
}

/// In-process badge backed by a mutex, readable as a snapshot.
#[derive(Debug, Default)]
pub struct SharedBadge {
    state: Mutex<BadgeState>,
}

impl SharedBadge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current badge text.
    pub fn text(&self) -> String {
        self.state.lock().expect("badge lock poisoned").text.clone()
    }

    /// Whether the badge is currently shown.
    pub fn is_visible(&self) -> bool {
        self.state.lock().expect("badge lock poisoned").visible
    }
}

impl BadgeDisplay for SharedBadge {
    fn set_text(&self, text: &str) {
        self.state.lock().expect("badge lock poisoned").text = text.to_string();
    }

    fn set_visible(&self, visible: bool) {
        self.state.lock().expect("badge lock poisoned").visible = visible;
    }
}
