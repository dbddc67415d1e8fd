//! Error taxonomy for dialog presentation.

use dialog_host::DispatchError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons a dialog request did not produce a user-visible outcome.
pub enum DialogError {
    /// No renderer exists for the active build target.
    #[error("the target platform being used is not currently supported")]
    UnsupportedPlatform,
    /// No UI dispatcher was supplied.
    #[error("no ui dispatcher is configured")]
    DispatcherUnavailable,
    /// The dispatcher refused the presentation work.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// The renderer failed or panicked while showing the dialog.
    #[error("dialog render failed: {0}")]
    RenderFailure(String),
    /// The request carried no message text.
    #[error("dialog message is empty")]
    EmptyMessage,
    /// The coordinator was closed before the request was admitted.
    #[error("dialog coordinator is closed")]
    Closed,
    /// The caller's abort hook fired while the request was still queued.
    #[error("dialog request abandoned before it was presented")]
    Abandoned,
    /// The UI thread dropped the presentation before it resolved.
    #[error("dialog presentation was interrupted before it resolved")]
    Interrupted,
}

impl DialogError {
    /// Whether this is the immediate unsupported-platform failure, the only error surfaced by
    /// [`crate::DialogCoordinator::present`].
    pub const fn is_unsupported_platform(&self) -> bool {
        matches!(self, Self::UnsupportedPlatform)
    }
}
