//! One-shot gate bridging a single callback into a blocking wait.
//!
//! [`one_shot`] returns a [`Signal`] for the callback side and a [`Waiter`]
//! for the caller. The first `signal` resolves the gate; later ones are
//! rejected. `Waiter::wait*` consumes the waiter, so the value is taken at
//! most once. When every counted `Signal` is dropped without signaling, the
//! waiter wakes with [`GateError::Closed`] instead of blocking forever.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("gate closed without a signal")]
    Closed,
    #[error("timed out waiting for signal")]
    TimedOut,
}

enum State<T> {
    Pending,
    Ready(T),
    Closed,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    ready: Condvar,
    signalers: AtomicUsize,
}

impl<T> Shared<T> {
    fn resolve(&self, value: T) -> bool {
        let mut state = self.state.lock();
        if !matches!(*state, State::Pending) {
            return false;
        }
        *state = State::Ready(value);
        self.ready.notify_one();
        true
    }
}

pub fn one_shot<T>() -> (Signal<T>, Waiter<T>) {
    let shared = Arc::new(Shared {
        state: Mutex::new(State::Pending),
        ready: Condvar::new(),
        signalers: AtomicUsize::new(1),
    });
    (
        Signal {
            shared: shared.clone(),
        },
        Waiter { shared },
    )
}

/// Sending half. Cloning adds another counted signaler.
pub struct Signal<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Signal<T> {
    /// Returns `false` if the gate was already resolved or closed.
    pub fn signal(&self, value: T) -> bool {
        self.shared.resolve(value)
    }

    /// A handle that can signal but does not keep the gate open.
    pub fn downgrade(&self) -> WeakSignal<T> {
        WeakSignal {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        self.shared.signalers.fetch_add(1, Ordering::AcqRel);
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Drop for Signal<T> {
    fn drop(&mut self) {
        if self.shared.signalers.fetch_sub(1, Ordering::AcqRel) != 1 {
            return;
        }
        let mut state = self.shared.state.lock();
        if matches!(*state, State::Pending) {
            *state = State::Closed;
            self.shared.ready.notify_one();
        }
    }
}

/// Signaling handle that is not counted towards closing the gate.
pub struct WeakSignal<T> {
    shared: Arc<Shared<T>>,
}

impl<T> WeakSignal<T> {
    pub fn signal(&self, value: T) -> bool {
        self.shared.resolve(value)
    }
}

pub struct Waiter<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Waiter<T> {
    pub fn wait(self) -> Result<T, GateError> {
        let mut state = self.shared.state.lock();
        while matches!(*state, State::Pending) {
            self.shared.ready.wait(&mut state);
        }
        take(&mut state)
    }

    /// On timeout the gate is closed, so a late signal reports `false`.
    pub fn wait_timeout(self, timeout: Duration) -> Result<T, GateError> {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.state.lock();
        while matches!(*state, State::Pending) {
            if self
                .shared
                .ready
                .wait_until(&mut state, deadline)
                .timed_out()
                && matches!(*state, State::Pending)
            {
                *state = State::Closed;
                return Err(GateError::TimedOut);
            }
        }
        take(&mut state)
    }
}

fn take<T>(state: &mut State<T>) -> Result<T, GateError> {
    match std::mem::replace(state, State::Closed) {
        State::Ready(value) => Ok(value),
        State::Pending | State::Closed => Err(GateError::Closed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn value_crosses_threads() {
        let (signal, waiter) = one_shot();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            assert!(signal.signal(7));
        });
        assert_eq!(waiter.wait(), Ok(7));
        handle.join().expect("signal thread");
    }

    #[test]
    fn first_signal_wins() {
        let (signal, waiter) = one_shot();
        let second = signal.clone();
        assert!(signal.signal("first"));
        assert!(!second.signal("second"));
        assert!(!signal.downgrade().signal("third"));
        assert_eq!(waiter.wait(), Ok("first"));
    }

    #[test]
    fn signal_before_wait_is_kept() {
        let (signal, waiter) = one_shot();
        signal.signal(1u8);
        drop(signal);
        assert_eq!(waiter.wait_timeout(Duration::from_millis(10)), Ok(1));
    }

    #[test]
    fn dropping_all_signals_closes_the_gate() {
        let (signal, waiter) = one_shot::<u8>();
        let clone = signal.clone();
        drop(signal);
        let handle = thread::spawn(move || drop(clone));
        assert_eq!(waiter.wait(), Err(GateError::Closed));
        handle.join().expect("drop thread");
    }

    #[test]
    fn weak_signals_do_not_keep_the_gate_open() {
        let (signal, waiter) = one_shot::<u8>();
        let weak = signal.downgrade();
        drop(signal);
        assert_eq!(waiter.wait(), Err(GateError::Closed));
        assert!(!weak.signal(3));
    }

    #[test]
    fn timeout_closes_the_gate() {
        let (signal, waiter) = one_shot::<u8>();
        let started = Instant::now();
        assert_eq!(
            waiter.wait_timeout(Duration::from_millis(30)),
            Err(GateError::TimedOut)
        );
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert!(!signal.signal(1));
    }

    #[test]
    fn weak_signal_resolves_a_blocked_waiter() {
        let (signal, waiter) = one_shot();
        let weak = signal.downgrade();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            weak.signal(42)
        });
        assert_eq!(waiter.wait(), Ok(42));
        assert!(handle.join().expect("weak thread"));
        drop(signal);
    }
}
