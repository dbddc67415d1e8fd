//! UI-thread dispatcher contracts.

use std::{future::Future, pin::Pin};

use futures::future::LocalBoxFuture;

/// Object-safe boxed future used by [`UiDispatcher`] and for work crossing threads.
pub type DispatchFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Unit of work executed on the UI-owning thread.
///
/// The closure itself crosses threads; the future it produces is created and polled on the UI
/// thread only, so it may hold UI-thread-bound handles.
pub type UiWork = Box<dyn FnOnce() -> LocalBoxFuture<'static, ()> + Send + 'static>;

/// Typed error describing why a dispatcher could not accept work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The UI thread/loop has shut down and accepts no more work.
    Closed,
    /// The dispatcher cannot run on the active target.
    Unavailable {
        /// Human-readable reason for diagnostics.
        reason: String,
    },
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "ui dispatcher closed"),
            Self::Unavailable { reason } => write!(f, "ui dispatcher unavailable: {reason}"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Host service that runs work on the thread owning UI rendering.
pub trait UiDispatcher: Send + Sync {
    /// Queues `work` for the UI thread.
    ///
    /// The returned future resolves once the work has been accepted, not once it has finished.
    /// Work that is rejected is dropped without running.
    fn run_on_ui_thread(&self, work: UiWork) -> DispatchFuture<'_, Result<(), DispatchError>>;

    /// Drives a detached task to completion on the dispatcher's executor.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when the executor no longer accepts tasks; the task is dropped.
    fn spawn_detached(&self, task: DispatchFuture<'static, ()>) -> Result<(), DispatchError>;
}
