//! Caller-driven cancellation for in-flight evaluations.
//!
//! A [`CancellationToken`] can be cloned into another thread and cancelled
//! from there. Evaluations register a hook with [`CancellationToken::on_cancel`]
//! that dismisses the OS prompt; the hook is removed again when the returned
//! [`CancelRegistration`] is dropped.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type Hook = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct Inner {
    cancelled: AtomicBool,
    hooks: Mutex<Hooks>,
}

#[derive(Default)]
struct Hooks {
    next_id: u64,
    entries: Vec<(u64, Hook)>,
}

#[derive(Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token cancelled and runs every registered hook once.
    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        let hooks = std::mem::take(&mut self.inner.hooks.lock().entries);
        for (_, hook) in hooks {
            hook();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Runs `hook` on cancellation, or right away if already cancelled.
    pub fn on_cancel<F>(&self, hook: F) -> CancelRegistration
    where
        F: FnOnce() + Send + 'static,
    {
        let mut hooks = self.inner.hooks.lock();
        if self.is_cancelled() {
            drop(hooks);
            hook();
            return CancelRegistration { entry: None };
        }
        let id = hooks.next_id;
        hooks.next_id += 1;
        hooks.entries.push((id, Box::new(hook)));
        CancelRegistration {
            entry: Some((Arc::downgrade(&self.inner), id)),
        }
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Unregisters its hook when dropped.
#[must_use = "dropping the registration removes the hook"]
pub struct CancelRegistration {
    entry: Option<(Weak<Inner>, u64)>,
}

impl Drop for CancelRegistration {
    fn drop(&mut self) {
        let Some((inner, id)) = self.entry.take() else {
            return;
        };
        if let Some(inner) = inner.upgrade() {
            inner.hooks.lock().entries.retain(|(entry, _)| *entry != id);
        }
    }
}
