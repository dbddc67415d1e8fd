//! Single-resolution completion signal pairing one request with its caller.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use dialog_host::DialogResolution;
use futures::{channel::oneshot, FutureExt};

use crate::DialogError;

type Completion = Result<DialogResolution, DialogError>;

/// Producer half; consumed by the one call that resolves the request.
pub(crate) struct CompletionSender {
    tx: oneshot::Sender<Completion>,
}

impl CompletionSender {
    pub(crate) fn resolve(self, result: Completion) {
        // The caller may have stopped waiting; nothing else observes the result.
        let _ = self.tx.send(result);
    }
}

/// Awaiting half. A producer dropped without resolving reads as [`DialogError::Interrupted`].
pub(crate) struct PendingCompletion {
    rx: oneshot::Receiver<Completion>,
}

impl Future for PendingCompletion {
    type Output = Completion;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.rx
            .poll_unpin(cx)
            .map(|received| received.unwrap_or(Err(DialogError::Interrupted)))
    }
}

pub(crate) fn pending() -> (CompletionSender, PendingCompletion) {
    let (tx, rx) = oneshot::channel();
    (CompletionSender { tx }, PendingCompletion { rx })
}
