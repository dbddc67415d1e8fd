//! Host strategy and service-bundle models for coordinator composition.

use std::sync::Arc;

use crate::{DialogRenderer, UiDispatcher};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogHostStrategy {
    /// Browser-backed dialogs on the page's main thread.
    Browser,
    /// Dialogs shown by a Tauri desktop webview.
    DesktopTauri,
    /// Desktop composition with no dialog surface.
    DesktopStub,
    /// Native composition with an injected renderer and dedicated UI thread.
    Native,
}

impl DialogHostStrategy {
    /// Returns a stable string token for diagnostics and runtime inspection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::DesktopTauri => "desktop-tauri",
            Self::DesktopStub => "desktop-stub",
            Self::Native => "native",
        }
    }
}

/// Host service bundle injected into the dialog coordinator.
///
/// All environment-specific selection happens before this bundle is built. A missing renderer
/// means the target has no dialog surface; a missing dispatcher means no UI thread is reachable.
#[derive(Clone)]
pub struct DialogHostServices {
    /// UI-thread dispatcher, if one is reachable.
    pub dispatcher: Option<Arc<dyn UiDispatcher>>,
    /// Platform renderer, if the target supports dialogs.
    pub renderer: Option<Arc<dyn DialogRenderer>>,
    /// Stable strategy identifier for diagnostics.
    pub strategy: DialogHostStrategy,
}

impl DialogHostServices {
    /// Builds a native bundle around an injected dispatcher and renderer.
    pub fn native(dispatcher: Arc<dyn UiDispatcher>, renderer: Arc<dyn DialogRenderer>) -> Self {
        Self {
            dispatcher: Some(dispatcher),
            renderer: Some(renderer),
            strategy: DialogHostStrategy::Native,
        }
    }

    /// Whether a renderer exists for this host.
    pub fn supports_dialogs(&self) -> bool {
        self.renderer.is_some()
    }
}

impl std::fmt::Debug for DialogHostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogHostServices")
            .field("dispatcher", &self.dispatcher.is_some())
            .field("renderer", &self.renderer.is_some())
            .field("strategy", &self.strategy)
            .finish()
    }
}
