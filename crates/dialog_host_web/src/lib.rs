//! Browser (`wasm32`) implementations of [`dialog_host`] service contracts.
//!
//! Dialogs render through the page's blocking `window.alert` / `window.confirm` prompts and UI work
//! runs on the browser main thread through `wasm_bindgen_futures::spawn_local`. Off `wasm32` every
//! adapter reports itself unavailable instead of failing to build.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod dispatcher;
pub mod renderer;

pub use adapters::{
    build_dialog_services, dialog_renderer, host_strategy_name, selected_host_strategy,
    ui_dispatcher, DialogRendererAdapter,
};
pub use dispatcher::WebUiDispatcher;
pub use renderer::{TauriDialogRenderer, WebDialogRenderer};
