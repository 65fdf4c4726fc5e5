//! A cancellation signal shared between a race and the producers feeding it.
//!
//! Producers hold a clone of a [`CancelToken`] and wait on
//! [`CancelToken::cancelled`] next to their sends. Whoever owns a clone can
//! trip it, and every listener, current or future, observes the
//! cancellation.
//!
//! # Examples
//!
//! ```
//! use channel_race::cancel::CancelToken;
//! use futures_lite::future::block_on;
//!
//! let token = CancelToken::new();
//! let cancelled = token.cancelled();
//!
//! token.cancel();
//! block_on(cancelled);
//! assert!(token.is_cancelled());
//! ```

use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use slab::Slab;

use crate::utils::trace_event;

#[derive(Debug, Default)]
struct State {
    cancelled: bool,
    listeners: Slab<Waker>,
}

/// A cloneable handle to a shared cancellation flag.
#[derive(Clone, Default)]
pub struct CancelToken {
    state: Arc<Mutex<State>>,
}

impl CancelToken {
    /// Create a new, untripped token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the token, waking every listener. Cancelling an already
    /// cancelled token does nothing.
    pub fn cancel(&self) {
        let listeners = {
            let mut state = self.lock();
            if state.cancelled {
                return;
            }
            state.cancelled = true;
            std::mem::take(&mut state.listeners)
        };
        trace_event!(listeners = listeners.len(), "cancellation tripped");
        for (_, waker) in listeners {
            waker.wake();
        }
    }

    /// Returns `true` once the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// A future which resolves once the token is cancelled.
    pub fn cancelled(&self) -> Cancelled {
        Cancelled {
            state: self.state.clone(),
            key: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        lock(&self.state)
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Waits for a [`CancelToken`] to be cancelled.
///
/// This `struct` is created by the [`cancelled`] method on [`CancelToken`].
///
/// [`cancelled`]: CancelToken::cancelled
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Cancelled {
    state: Arc<Mutex<State>>,
    key: Option<usize>,
}

impl Future for Cancelled {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        let mut state = lock(&this.state);
        if state.cancelled {
            // `cancel` already took our registration with it.
            this.key = None;
            return Poll::Ready(());
        }

        match this.key {
            Some(key) if state.listeners.contains(key) => {
                state.listeners[key].clone_from(cx.waker());
            }
            _ => this.key = Some(state.listeners.insert(cx.waker().clone())),
        }
        Poll::Pending
    }
}

impl Drop for Cancelled {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            let mut state = lock(&self.state);
            if !state.cancelled {
                let _ = state.listeners.try_remove(key);
            }
        }
    }
}

impl fmt::Debug for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cancelled")
            .field("registered", &self.key.is_some())
            .finish()
    }
}

// Listeners only ever insert and remove wakers, so a poisoned lock still
// holds consistent data.
fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
