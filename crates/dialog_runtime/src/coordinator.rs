//! Dialog coordinator: one dialog on screen at a time, one resolution per request.
//!
//! Each request moves through `queued → admitted → dispatched → rendering → resolved`. Only the
//! closed, unsupported-platform, missing-dispatcher and empty-message checks resolve a request
//! without rendering it.
//!
//! The presentation permit travels with the UI-thread work and is released when that work
//! finishes or is dropped unrun.
//!
//! Caller callbacks are not guarded. A callback that panics unwinds on the UI thread and its
//! caller observes [`DialogError::Interrupted`].

use std::{
    any::Any,
    future::Future,
    io,
    panic::AssertUnwindSafe,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
};

use dialog_host::{
    DialogHostServices, DialogHostStrategy, DialogOutcome, DialogPrompt, DialogRenderer,
    DialogRequest, DialogResolution, UiDispatcher, UiWork,
};
use futures::{
    future::{self, Either},
    pin_mut, FutureExt,
};
use tracing::{debug, info, warn};

use crate::{
    completion::{self, CompletionSender},
    gate::{GatePermit, PresentationGate},
    DialogConfig, DialogError, UiThreadDispatcher,
};

struct CoordinatorInner {
    dispatcher: Option<Arc<dyn UiDispatcher>>,
    renderer: Option<Arc<dyn DialogRenderer>>,
    strategy: DialogHostStrategy,
    config: DialogConfig,
    gate: PresentationGate,
    closed: AtomicBool,
    next_request_id: AtomicU64,
}

/// Serializes dialog requests from any thread and presents them one at a time.
///
/// Clones share one presentation gate.
#[derive(Clone)]
pub struct DialogCoordinator {
    inner: Arc<CoordinatorInner>,
}

impl DialogCoordinator {
    /// Builds a coordinator over a host service bundle.
    pub fn new(services: DialogHostServices, config: DialogConfig) -> Self {
        info!(
            strategy = services.strategy.as_str(),
            renderer = services.renderer.is_some(),
            dispatcher = services.dispatcher.is_some(),
            "dialog coordinator ready"
        );
        Self {
            inner: Arc::new(CoordinatorInner {
                dispatcher: services.dispatcher,
                renderer: services.renderer,
                strategy: services.strategy,
                config,
                gate: PresentationGate::new(),
                closed: AtomicBool::new(false),
                next_request_id: AtomicU64::new(1),
            }),
        }
    }

    /// Builds a native coordinator that owns a fresh [`UiThreadDispatcher`].
    ///
    /// # Errors
    ///
    /// Returns an error when the UI thread cannot be spawned.
    pub fn with_ui_thread(
        renderer: Arc<dyn DialogRenderer>,
        config: DialogConfig,
    ) -> io::Result<Self> {
        let dispatcher = Arc::new(UiThreadDispatcher::from_config(&config)?);
        Ok(Self::new(
            DialogHostServices::native(dispatcher, renderer),
            config,
        ))
    }

    /// Active configuration.
    pub fn config(&self) -> &DialogConfig {
        &self.inner.config
    }

    /// Host strategy this coordinator was composed with.
    pub fn strategy(&self) -> DialogHostStrategy {
        self.inner.strategy
    }

    /// Whether a dialog currently holds the presentation gate.
    pub fn is_presenting(&self) -> bool {
        self.inner.gate.is_held()
    }

    /// Number of requests waiting for the gate.
    pub fn queued_requests(&self) -> usize {
        self.inner.gate.queued()
    }

    /// Stops admitting requests. Queued and later requests resolve with
    /// [`DialogError::Closed`]; a dialog already on screen finishes normally.
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::AcqRel) {
            info!("dialog coordinator closed");
        }
        self.inner.gate.close();
    }

    /// Presents a dialog and reports whether it reached the user.
    ///
    /// Resolves to `true` once the user chose an action or dismissed the dialog (after the
    /// matching callback ran) and to `false` for every internal failure.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::UnsupportedPlatform`], immediately, when no renderer exists for the
    /// active target.
    pub async fn present(&self, request: DialogRequest) -> Result<bool, DialogError> {
        match self.present_detailed(request).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_unsupported_platform() => Err(err),
            Err(_) => Ok(false),
        }
    }

    /// Presents a dialog and reports exactly what happened.
    ///
    /// # Errors
    ///
    /// Returns the [`DialogError`] that kept the dialog from producing a user outcome.
    pub async fn present_detailed(
        &self,
        request: DialogRequest,
    ) -> Result<DialogResolution, DialogError> {
        self.present_until(request, future::pending()).await
    }

    /// Presents a dialog unless `abort` completes while the request is still queued.
    ///
    /// An abort while queued removes the request without running any callback. Once the request
    /// is admitted `abort` is no longer observed: a dialog already handed to the UI thread cannot
    /// be withdrawn and the call waits for its real outcome.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::Abandoned`] when `abort` wins, otherwise as
    /// [`DialogCoordinator::present_detailed`].
    pub async fn present_until<A>(
        &self,
        request: DialogRequest,
        abort: A,
    ) -> Result<DialogResolution, DialogError>
    where
        A: Future<Output = ()> + Send,
    {
        let id = self.inner.next_request_id.fetch_add(1, Ordering::Relaxed);
        let result = self.run_presentation(id, request, abort).await;
        match &result {
            Ok(resolution) => debug!(request = id, phase = "resolved", ?resolution),
            Err(err) => warn!(
                request = id,
                phase = "resolved",
                error = %err,
                "dialog presentation failed"
            ),
        }
        result
    }

    /// Fire-and-forget presentation.
    ///
    /// Runs [`DialogCoordinator::present`] on the dispatcher's executor and discards its result.
    pub fn show(&self, request: impl Into<DialogRequest>) {
        let request = request.into();
        let Some(dispatcher) = self.inner.dispatcher.clone() else {
            warn!(error = %DialogError::DispatcherUnavailable, "dialog dropped");
            return;
        };
        let this = self.clone();
        let task = Box::pin(async move {
            if let Err(err) = this.present(request).await {
                debug!(error = %err, "fire-and-forget dialog failed");
            }
        });
        if let Err(err) = dispatcher.spawn_detached(task) {
            warn!(error = %err, "fire-and-forget dialog could not be scheduled");
        }
    }

    async fn run_presentation<A>(
        &self,
        id: u64,
        request: DialogRequest,
        abort: A,
    ) -> Result<DialogResolution, DialogError>
    where
        A: Future<Output = ()> + Send,
    {
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(DialogError::Closed);
        }
        let Some(renderer) = self.inner.renderer.clone() else {
            return Err(DialogError::UnsupportedPlatform);
        };
        let Some(dispatcher) = self.inner.dispatcher.clone() else {
            return Err(DialogError::DispatcherUnavailable);
        };
        if !request.has_message() {
            return Err(DialogError::EmptyMessage);
        }

        debug!(request = id, phase = "queued");
        let acquire = self.inner.gate.acquire();
        pin_mut!(acquire, abort);
        let permit = match future::select(acquire, abort).await {
            Either::Left((permit, _)) => permit.map_err(|_| DialogError::Closed)?,
            Either::Right(((), _)) => return Err(DialogError::Abandoned),
        };
        debug!(request = id, phase = "admitted");

        let (completion, pending) = completion::pending();
        let presentation = Presentation {
            permit,
            completion,
            id,
            prompt: request.prompt(&self.inner.config.default_title),
            request,
            renderer,
        };
        let work: UiWork = Box::new(move || presentation.run().boxed_local());
        dispatcher.run_on_ui_thread(work).await?;
        debug!(request = id, phase = "dispatched");

        pending.await
    }
}

impl std::fmt::Debug for DialogCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogCoordinator")
            .field("strategy", &self.inner.strategy)
            .field("config", &self.inner.config)
            .field("presenting", &self.is_presenting())
            .field("closed", &self.inner.closed.load(Ordering::Relaxed))
            .finish()
    }
}

/// Everything the UI thread needs for one request. Fields drop in declaration order, so the
/// permit is released before the caller learns the request was dropped.
struct Presentation {
    permit: GatePermit,
    completion: CompletionSender,
    id: u64,
    prompt: DialogPrompt,
    request: DialogRequest,
    renderer: Arc<dyn DialogRenderer>,
}

impl Presentation {
    async fn run(self) {
        let Self {
            permit,
            completion,
            id,
            prompt,
            request,
            renderer,
        } = self;
        debug!(request = id, phase = "rendering", title = %prompt.title);

        // Building the dialog may panic before a future exists; keep that inside the guard too.
        let outcome = AssertUnwindSafe(future::lazy(|_| renderer.show(&prompt)).flatten())
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| DialogOutcome::Failed(panic_message(panic.as_ref())));
        let result = request.settle(outcome).map_err(DialogError::RenderFailure);

        drop(permit);
        completion.resolve(result);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned());
    match detail {
        Some(detail) => format!("renderer panicked: {detail}"),
        None => "renderer panicked".to_string(),
    }
}
