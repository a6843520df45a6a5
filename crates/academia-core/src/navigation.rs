//! Navigation side effects triggered outside the UI layer.
//!
//! The gateway cannot route the front end itself. When the backend rejects
//! the credential it asks a `Navigator` to send the user back to the login
//! surface; the front end decides what a "hard" navigation means for it
//! (reload the page, drop in-memory state, exit to a login prompt).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Path of the login entry point
pub const LOGIN_PATH: &str = "/login";

pub trait Navigator: Send + Sync {
    /// Force a full navigation to `path`, discarding application state.
    fn redirect(&self, path: &str);
}

/// Navigator that records redirects for the front end to act on later.
///
/// `take()` hands out the most recent pending target once; `count()` keeps
/// the running total for diagnostics.
#[derive(Debug, Default)]
pub struct RedirectLatch {
    pending: Mutex<Option<String>>,
    count: AtomicUsize,
}

impl RedirectLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending redirect, if any
    pub fn take(&self) -> Option<String> {
        self.pending.lock().ok().and_then(|mut p| p.take())
    }

    /// Whether a redirect is waiting to be handled
    pub fn is_pending(&self) -> bool {
        self.pending.lock().map(|p| p.is_some()).unwrap_or(false)
    }

    /// Total number of redirects requested since creation
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Navigator for RedirectLatch {
    fn redirect(&self, path: &str) {
        self.count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(path.to_string());
        }
    }
}
