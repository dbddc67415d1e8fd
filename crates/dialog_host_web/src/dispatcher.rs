//! UI dispatcher adapter for the browser main thread.

use dialog_host::{DispatchError, DispatchFuture, UiDispatcher, UiWork};

#[cfg(not(target_arch = "wasm32"))]
const UNAVAILABLE: &str = "the browser main thread is only available when compiled for wasm32";

#[derive(Debug, Clone, Copy, Default)]
/// Browser dispatcher that schedules work on the page's event loop with
/// `wasm_bindgen_futures::spawn_local`.
pub struct WebUiDispatcher;

impl UiDispatcher for WebUiDispatcher {
    fn run_on_ui_thread(&self, work: UiWork) -> DispatchFuture<'_, Result<(), DispatchError>> {
        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(work());
            Box::pin(async { Ok(()) })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            drop(work);
            Box::pin(async {
                Err(DispatchError::Unavailable {
                    reason: UNAVAILABLE.to_string(),
                })
            })
        }
    }

    fn spawn_detached(&self, task: DispatchFuture<'static, ()>) -> Result<(), DispatchError> {
        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(task);
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            drop(task);
            Err(DispatchError::Unavailable {
                reason: UNAVAILABLE.to_string(),
            })
        }
    }
}
