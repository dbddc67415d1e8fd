//! Dedicated UI thread backed by a single-threaded executor.

use std::{
    io,
    panic::AssertUnwindSafe,
    sync::{Mutex, PoisonError},
    thread::{self, JoinHandle, ThreadId},
};

use dialog_host::{DispatchError, DispatchFuture, UiDispatcher, UiWork};
use futures::{
    channel::mpsc,
    executor::LocalPool,
    future,
    task::LocalSpawnExt,
    FutureExt, StreamExt,
};
use tracing::{info, warn};

use crate::DialogConfig;

/// [`UiDispatcher`] that owns one OS thread and runs all work on it.
///
/// Work runs on a `LocalPool`, so futures produced by [`UiWork`] may be `!Send`. Dropping the
/// dispatcher stops accepting work; queued work still runs before the thread exits.
pub struct UiThreadDispatcher {
    sender: mpsc::UnboundedSender<UiWork>,
    thread_id: ThreadId,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl UiThreadDispatcher {
    /// Spawns the UI thread with the given OS thread name.
    ///
    /// # Errors
    ///
    /// Returns an error when the OS refuses to create the thread.
    pub fn spawn(name: impl Into<String>) -> io::Result<Self> {
        let name = name.into();
        let (sender, receiver) = mpsc::unbounded::<UiWork>();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || run_ui_loop(receiver))?;
        info!(thread = %name, "ui thread started");
        Ok(Self {
            sender,
            thread_id: handle.thread().id(),
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Spawns the UI thread named by [`DialogConfig::ui_thread_name`].
    ///
    /// # Errors
    ///
    /// Returns an error when the OS refuses to create the thread.
    pub fn from_config(config: &DialogConfig) -> io::Result<Self> {
        Self::spawn(config.ui_thread_name.clone())
    }

    /// Id of the UI thread.
    pub fn ui_thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Whether the caller is running on the UI thread.
    pub fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.thread_id
    }

    /// Stops accepting work, lets queued work finish, and joins the thread.
    ///
    /// Joining is skipped when called from the UI thread itself.
    pub fn shutdown(&self) {
        self.sender.close_channel();
        if self.is_ui_thread() {
            return;
        }
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("ui thread exited by panic");
            }
        }
    }
}

impl Drop for UiThreadDispatcher {
    fn drop(&mut self) {
        self.sender.close_channel();
    }
}

impl UiDispatcher for UiThreadDispatcher {
    fn run_on_ui_thread(&self, work: UiWork) -> DispatchFuture<'_, Result<(), DispatchError>> {
        let accepted = self
            .sender
            .unbounded_send(work)
            .map_err(|_| DispatchError::Closed);
        Box::pin(async move { accepted })
    }

    fn spawn_detached(&self, task: DispatchFuture<'static, ()>) -> Result<(), DispatchError> {
        let work: UiWork = Box::new(move || task.boxed_local());
        self.sender
            .unbounded_send(work)
            .map_err(|_| DispatchError::Closed)
    }
}

fn run_ui_loop(mut receiver: mpsc::UnboundedReceiver<UiWork>) {
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    pool.run_until(async move {
        while let Some(work) = receiver.next().await {
            let guarded = AssertUnwindSafe(future::lazy(move |_| work()).flatten())
                .catch_unwind()
                .map(|finished| {
                    if finished.is_err() {
                        warn!("ui work panicked; the ui thread keeps running");
                    }
                });
            if let Err(err) = spawner.spawn_local(guarded) {
                warn!(error = ?err, "ui executor rejected work");
                break;
            }
        }
    });
    pool.run();
    info!("ui thread stopped");
}
