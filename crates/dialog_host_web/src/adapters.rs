use std::sync::Arc;

use dialog_host::{
    DialogHostServices, DialogHostStrategy, DialogOutcome, DialogPrompt, DialogRenderer,
    RenderFuture,
};
use tracing::debug;

use crate::{TauriDialogRenderer, WebDialogRenderer, WebUiDispatcher};

#[cfg(all(feature = "desktop-host-stub", feature = "desktop-host-tauri"))]
compile_error!(
    "features `desktop-host-stub` and `desktop-host-tauri` are mutually exclusive; enable only one"
);

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> DialogHostStrategy {
    #[cfg(feature = "desktop-host-tauri")]
    {
        DialogHostStrategy::DesktopTauri
    }

    #[cfg(feature = "desktop-host-stub")]
    {
        DialogHostStrategy::DesktopStub
    }

    #[cfg(not(any(feature = "desktop-host-stub", feature = "desktop-host-tauri")))]
    {
        DialogHostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete dialog surface behind [`DialogRenderer`].
#[derive(Debug, Clone, Copy)]
pub enum DialogRendererAdapter {
    /// Browser `alert`/`confirm` prompts.
    Browser(WebDialogRenderer),
    /// Desktop-webview prompts.
    DesktopTauri(TauriDialogRenderer),
}

impl DialogRenderer for DialogRendererAdapter {
    fn show<'a>(&'a self, prompt: &'a DialogPrompt) -> RenderFuture<'a, DialogOutcome> {
        match self {
            Self::Browser(renderer) => renderer.show(prompt),
            Self::DesktopTauri(renderer) => renderer.show(prompt),
        }
    }
}

/// Builds the renderer adapter for the compile-time selected host strategy.
///
/// The desktop stub has no dialog surface and returns `None`.
pub fn dialog_renderer() -> Option<DialogRendererAdapter> {
    match selected_host_strategy() {
        DialogHostStrategy::Browser => Some(DialogRendererAdapter::Browser(WebDialogRenderer)),
        DialogHostStrategy::DesktopTauri => {
            Some(DialogRendererAdapter::DesktopTauri(TauriDialogRenderer))
        }
        DialogHostStrategy::DesktopStub | DialogHostStrategy::Native => None,
    }
}

/// Builds the UI dispatcher for the compile-time selected host strategy.
pub fn ui_dispatcher() -> WebUiDispatcher {
    WebUiDispatcher
}

/// Builds the full dialog host bundle for the compile-time selected host strategy.
pub fn build_dialog_services() -> DialogHostServices {
    let strategy = selected_host_strategy();
    let renderer = dialog_renderer().map(|renderer| Arc::new(renderer) as Arc<dyn DialogRenderer>);
    debug!(
        strategy = strategy.as_str(),
        renderer = renderer.is_some(),
        "dialog host services built"
    );
    DialogHostServices {
        dispatcher: Some(Arc::new(ui_dispatcher())),
        renderer,
        strategy,
    }
}
