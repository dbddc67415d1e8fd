//! Typed dialog-presentation contracts shared across the coordinator runtime and host adapters.
//!
//! This crate is the API-first boundary for modal alert dialogs. It exposes the request/prompt
//! data model, the [`UiDispatcher`] and [`DialogRenderer`] service traits, the role-slot binding
//! policy used by fixed-slot surfaces, and an in-memory scripted renderer. Concrete browser
//! adapters live in `dialog_host_web`; serialization of concurrent requests lives in
//! `dialog_runtime`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod dispatcher;
pub mod host;
pub mod renderer;
pub mod slots;
pub mod types;

pub use dispatcher::{DispatchError, DispatchFuture, UiDispatcher, UiWork};
pub use host::{DialogHostServices, DialogHostStrategy};
pub use renderer::{
    DialogRenderer, RenderFuture, ScriptedDialogRenderer, ScriptedResponse, ShownDialog,
};
pub use slots::{RoleSlots, SlotBinding, DEFAULT_DISMISS_LABEL};
pub use types::{
    ActionCallback, DialogAction, DialogActionView, DialogOutcome, DialogPrompt, DialogRequest,
    DialogResolution, DialogRole,
};
