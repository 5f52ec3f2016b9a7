//! Shared service state.
//!
//! [`ServiceState`] is a snapshot of the formatter that other threads may
//! read without going through the request channel: the text believed to be
//! on screen, how many translations are in history, and how many requests
//! have been handled.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<ServiceState>>`, cheap to
//! clone and safe to share across threads.

use std::sync::{Arc, Mutex};

use crate::format::Formatter;

// ---------------------------------------------------------------------------
// ServicePhase
// ---------------------------------------------------------------------------

/// Lifecycle of the formatting service.
///
/// ```text
/// Idle ──request──▶ Formatting ──done──▶ Idle
///   any ──channel closed──▶ Stopped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServicePhase {
    #[default]
    Idle,
    Formatting,
    Stopped,
}

impl ServicePhase {
    /// A short label for status output.
    pub fn label(&self) -> &'static str {
        match self {
            ServicePhase::Idle => "Idle",
            ServicePhase::Formatting => "Formatting",
            ServicePhase::Stopped => "Stopped",
        }
    }
}

// ---------------------------------------------------------------------------
// ServiceState
// ---------------------------------------------------------------------------

/// Snapshot of the formatter, refreshed after every request.
#[derive(Debug, Clone, Default)]
pub struct ServiceState {
    pub phase: ServicePhase,
    /// Text the formatter believes is on screen.
    pub rendered_text: String,
    /// Translations currently held for undo.
    pub history_len: usize,
    /// Requests handled so far, resets included.
    pub requests: u64,
    /// Why the service stopped delivering output, if it did.
    pub error_message: Option<String>,
}

impl ServiceState {
    /// Copy the observable parts of `formatter`.
    pub fn refresh(&mut self, formatter: &Formatter) {
        self.rendered_text = formatter.rendered().text;
        self.history_len = formatter.history().count();
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`ServiceState`].  Do not hold the lock across
/// `.await` points.
pub type SharedState = Arc<Mutex<ServiceState>>;

pub fn new_shared_state() -> SharedState {
    Arc::new(Mutex::new(ServiceState::default()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
