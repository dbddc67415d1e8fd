//! FIFO asynchronous mutual exclusion for dialog presentation.
//!
//! A released permit is handed directly to the oldest live waiter, so admission follows arrival
//! order. Waiters that stopped waiting are skipped. The permit is released by `Drop`, which covers
//! every exit path of its holder including unwinding and dropped-unrun work.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use futures::channel::oneshot;

#[derive(Default)]
struct GateState {
    held: bool,
    closed: bool,
    waiters: VecDeque<oneshot::Sender<GatePermit>>,
}

type SharedState = Arc<Mutex<GateState>>;

fn lock_state(state: &SharedState) -> MutexGuard<'_, GateState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The gate was closed before a permit could be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GateClosed;

/// Exclusive right to present. Released exactly once, on drop.
pub(crate) struct GatePermit {
    state: Option<SharedState>,
}

impl GatePermit {
    fn new(state: &SharedState) -> Self {
        Self {
            state: Some(Arc::clone(state)),
        }
    }

    fn disarm(&mut self) {
        self.state = None;
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            release(&state);
        }
    }
}

fn release(state: &SharedState) {
    loop {
        let waiter = {
            let mut inner = lock_state(state);
            match inner.waiters.pop_front() {
                Some(waiter) => waiter,
                None => {
                    inner.held = false;
                    return;
                }
            }
        };
        // `held` stays set while the permit is in transit.
        match waiter.send(GatePermit::new(state)) {
            Ok(()) => return,
            Err(mut unclaimed) => unclaimed.disarm(),
        }
    }
}

pub(crate) struct PresentationGate {
    state: SharedState,
}

impl PresentationGate {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(GateState::default())),
        }
    }

    /// Waits for the permit.
    pub(crate) async fn acquire(&self) -> Result<GatePermit, GateClosed> {
        let waiter = {
            let mut inner = lock_state(&self.state);
            if inner.closed {
                return Err(GateClosed);
            }
            if !inner.held {
                inner.held = true;
                return Ok(GatePermit::new(&self.state));
            }
            inner.waiters.retain(|waiter| !waiter.is_canceled());
            let (tx, rx) = oneshot::channel();
            inner.waiters.push_back(tx);
            rx
        };
        waiter.await.map_err(|_| GateClosed)
    }

    /// Fails every queued and future waiter. Outstanding permits stay valid until dropped.
    pub(crate) fn close(&self) {
        let waiters = {
            let mut inner = lock_state(&self.state);
            inner.closed = true;
            std::mem::take(&mut inner.waiters)
        };
        drop(waiters);
    }

    pub(crate) fn is_held(&self) -> bool {
        lock_state(&self.state).held
    }

    /// Waiters still interested in the permit.
    pub(crate) fn queued(&self) -> usize {
        lock_state(&self.state)
            .waiters
            .iter()
            .filter(|waiter| !waiter.is_canceled())
            .count()
    }
}
