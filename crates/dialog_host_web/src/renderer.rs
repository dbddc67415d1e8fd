//! Dialog renderer adapters for browser and desktop-webview contexts.

use dialog_host::{
    DialogOutcome, DialogPrompt, DialogRenderer, DialogRole, RenderFuture, RoleSlots, SlotBinding,
};

#[derive(Debug, Clone, Copy, Default)]
/// Browser dialog adapter backed by `window.alert` and `window.confirm`.
///
/// A prompt without actions is shown with `alert` and reads as a dismissal. Otherwise `confirm`
/// is used: OK presses the affirmative slot (or the neutral one when no affirmative action
/// exists) and Cancel presses the negative slot.
pub struct WebDialogRenderer;

impl DialogRenderer for WebDialogRenderer {
    fn show<'a>(&'a self, prompt: &'a DialogPrompt) -> RenderFuture<'a, DialogOutcome> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let Some(window) = web_sys::window() else {
                    return DialogOutcome::Failed("browser window is unavailable".to_string());
                };
                let slots = RoleSlots::bind(&prompt.actions);
                let text = prompt_text(prompt, &slots);
                if slots.is_empty() {
                    return match window.alert_with_message(&text) {
                        Ok(()) => DialogOutcome::Canceled,
                        Err(err) => prompt_failed("alert", err),
                    };
                }
                return match window.confirm_with_message(&text) {
                    Ok(accepted) => confirm_outcome(&slots, accepted),
                    Err(err) => prompt_failed("confirm", err),
                };
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = prompt;
                DialogOutcome::Failed(
                    "browser dialogs are only available when compiled for wasm32".to_string(),
                )
            }
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Desktop-webview dialog adapter (currently same behavior as browser adapter).
pub struct TauriDialogRenderer;

impl DialogRenderer for TauriDialogRenderer {
    fn show<'a>(&'a self, prompt: &'a DialogPrompt) -> RenderFuture<'a, DialogOutcome> {
        WebDialogRenderer.show(prompt)
    }
}

#[cfg(target_arch = "wasm32")]
fn prompt_failed(prompt_kind: &str, err: wasm_bindgen::JsValue) -> DialogOutcome {
    tracing::warn!(prompt = prompt_kind, error = ?err, "browser dialog failed");
    DialogOutcome::Failed(format!("{prompt_kind} dispatch failed: {err:?}"))
}

/// Maps a `confirm` answer onto the bound role slots.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn confirm_outcome(slots: &RoleSlots, accepted: bool) -> DialogOutcome {
    if !accepted {
        return slots.outcome_for(DialogRole::Negative);
    }
    if slots.slot(DialogRole::Affirmative).is_some() {
        slots.outcome_for(DialogRole::Affirmative)
    } else {
        slots.outcome_for(DialogRole::Neutral)
    }
}

/// Text for the browser prompt. Names the actions behind OK and Cancel when there are any.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn prompt_text(prompt: &DialogPrompt, slots: &RoleSlots) -> String {
    let mut text = format!("{}\n\n{}", prompt.title, prompt.message);
    let label_of = |role| {
        slots.slot(role).and_then(|binding| match binding {
            SlotBinding::Action(index) => {
                prompt.actions.get(*index).map(|action| action.label.as_str())
            }
            SlotBinding::Dismiss { label } => Some(label.as_str()),
        })
    };
    let ok = label_of(DialogRole::Affirmative).or_else(|| label_of(DialogRole::Neutral));
    let cancel = label_of(DialogRole::Negative);
    match (ok, cancel) {
        (Some(ok), Some(cancel)) => text.push_str(&format!("\n\nOK: {ok}\nCancel: {cancel}")),
        (Some(ok), None) => text.push_str(&format!("\n\nOK: {ok}")),
        (None, Some(cancel)) => text.push_str(&format!("\n\nCancel: {cancel}")),
        (None, None) => {}
    }
    text
}
