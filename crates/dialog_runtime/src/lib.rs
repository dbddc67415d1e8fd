//! Serialized presentation of modal alert dialogs.
//!
//! [`DialogCoordinator`] accepts dialog requests from any number of threads or tasks, admits them
//! one at a time in arrival order, runs each on the UI thread through an injected
//! [`dialog_host::UiDispatcher`] and [`dialog_host::DialogRenderer`], and resolves every request
//! exactly once. [`UiThreadDispatcher`] provides a dedicated UI thread for native compositions.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod completion;
pub mod config;
pub mod coordinator;
pub mod error;
mod gate;
pub mod ui_thread;

pub use config::{DialogConfig, DEFAULT_DIALOG_TITLE, DEFAULT_UI_THREAD_NAME};
pub use coordinator::DialogCoordinator;
pub use dialog_host::{DialogAction, DialogRequest, DialogResolution, DialogRole};
pub use error::DialogError;
pub use ui_thread::UiThreadDispatcher;
