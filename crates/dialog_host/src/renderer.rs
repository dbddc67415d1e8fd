//! Dialog renderer contracts and the scripted in-memory adapter.

use std::{
    collections::VecDeque,
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    thread::{self, ThreadId},
    time::{Duration, Instant},
};

use futures::channel::oneshot;

use crate::{
    slots::RoleSlots,
    types::{DialogOutcome, DialogPrompt, DialogRole},
};

/// Object-safe boxed future used by [`DialogRenderer`].
///
/// Renderer futures are polled on the UI thread only and need not be `Send`.
pub type RenderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Platform service that displays one alert-style dialog and reports what the user did.
///
/// Renderers only report; they never run caller callbacks.
pub trait DialogRenderer: Send + Sync {
    /// Shows `prompt` and resolves once the dialog is closed.
    fn show<'a>(&'a self, prompt: &'a DialogPrompt) -> RenderFuture<'a, DialogOutcome>;
}

/// One scripted user reaction for [`ScriptedDialogRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedResponse {
    /// Select the action at this index, without validating it.
    Choose(usize),
    /// Select the first action carrying this label.
    ChooseLabel(String),
    /// Press the button bound to this role slot.
    Press(DialogRole),
    /// Dismiss without choosing.
    Cancel,
    /// Report a render failure.
    Fail(String),
    /// Panic inside the renderer.
    Panic(String),
}

/// Record of one `show` call.
#[derive(Debug, Clone)]
pub struct ShownDialog {
    /// Prompt as received.
    pub prompt: DialogPrompt,
    /// When `show` started.
    pub started_at: Instant,
    /// When `show` produced its outcome.
    pub finished_at: Instant,
    /// Thread that polled `show`.
    pub thread: ThreadId,
}

#[derive(Debug, Default)]
struct ScriptState {
    script: VecDeque<ScriptedResponse>,
    delay: Option<Duration>,
    yield_while_delayed: bool,
    dismiss_label: Option<String>,
    shown: Vec<ShownDialog>,
    in_flight: usize,
    max_in_flight: usize,
}

/// In-memory renderer replaying scripted responses, for tests and headless automation.
///
/// Clones share the same script and history. An exhausted script dismisses every dialog. The
/// optional delay blocks the polling thread the way a native modal loop does.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogRenderer {
    inner: Arc<Mutex<ScriptState>>,
}

impl ScriptedDialogRenderer {
    /// Creates a renderer that replays `responses` in order.
    pub fn with_script(responses: impl IntoIterator<Item = ScriptedResponse>) -> Self {
        let renderer = Self::default();
        renderer.lock().script.extend(responses);
        renderer
    }

    /// Keeps every dialog on screen for `delay` before reporting.
    ///
    /// The polling thread is blocked for the whole delay, like a native modal loop.
    pub fn with_delay(self, delay: Duration) -> Self {
        {
            let mut state = self.lock();
            state.delay = Some(delay);
            state.yield_while_delayed = false;
        }
        self
    }

    /// Keeps every dialog on screen for `delay` before reporting, yielding to the executor
    /// meanwhile so other tasks on the same thread keep running.
    pub fn with_yielding_delay(self, delay: Duration) -> Self {
        {
            let mut state = self.lock();
            state.delay = Some(delay);
            state.yield_while_delayed = true;
        }
        self
    }

    /// Binds a dismiss button to an empty negative slot for [`ScriptedResponse::Press`].
    pub fn with_dismiss_fallback(self, label: impl Into<String>) -> Self {
        self.lock().dismiss_label = Some(label.into());
        self
    }

    /// Appends one response to the script.
    pub fn push(&self, response: ScriptedResponse) {
        self.lock().script.push_back(response);
    }

    /// Every dialog shown so far, in show order.
    pub fn shown(&self) -> Vec<ShownDialog> {
        self.lock().shown.clone()
    }

    /// Number of `show` calls that completed.
    pub fn show_count(&self) -> usize {
        self.lock().shown.len()
    }

    /// Highest number of `show` calls observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.lock().max_in_flight
    }

    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DialogRenderer for ScriptedDialogRenderer {
    fn show<'a>(&'a self, prompt: &'a DialogPrompt) -> RenderFuture<'a, DialogOutcome> {
        Box::pin(async move {
            let started_at = Instant::now();
            let (response, delay, yield_while_delayed, dismiss_label) = {
                let mut state = self.lock();
                state.in_flight += 1;
                state.max_in_flight = state.max_in_flight.max(state.in_flight);
                (
                    state.script.pop_front(),
                    state.delay,
                    state.yield_while_delayed,
                    state.dismiss_label.clone(),
                )
            };

            match delay {
                Some(delay) if yield_while_delayed => {
                    let (elapsed, timer) = oneshot::channel::<()>();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = elapsed.send(());
                    });
                    let _ = timer.await;
                }
                Some(delay) => thread::sleep(delay),
                None => {}
            }

            {
                let mut state = self.lock();
                state.in_flight -= 1;
                state.shown.push(ShownDialog {
                    prompt: prompt.clone(),
                    started_at,
                    finished_at: Instant::now(),
                    thread: thread::current().id(),
                });
            }

            match response {
                Some(ScriptedResponse::Choose(index)) => DialogOutcome::ActionInvoked(index),
                Some(ScriptedResponse::ChooseLabel(label)) => prompt
                    .position_of_label(&label)
                    .map(DialogOutcome::ActionInvoked)
                    .unwrap_or_else(|| {
                        DialogOutcome::Failed(format!("no action labeled `{label}`"))
                    }),
                Some(ScriptedResponse::Press(role)) => {
                    let slots = RoleSlots::bind(&prompt.actions);
                    let slots = match dismiss_label {
                        Some(label) => slots.with_dismiss_fallback(label),
                        None => slots,
                    };
                    slots.outcome_for(role)
                }
                Some(ScriptedResponse::Cancel) | None => DialogOutcome::Canceled,
                Some(ScriptedResponse::Fail(cause)) => DialogOutcome::Failed(cause),
                Some(ScriptedResponse::Panic(message)) => panic!("{message}"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::DialogActionView;

    fn prompt(actions: &[(&str, DialogRole)]) -> DialogPrompt {
        DialogPrompt {
            title: "Alert!".to_string(),
            message: "Hi".to_string(),
            actions: actions
                .iter()
                .map(|(label, role)| DialogActionView {
                    label: (*label).to_string(),
                    role: *role,
                })
                .collect(),
        }
    }

    #[test]
    fn scripted_renderer_replays_in_order_then_dismisses() {
        let renderer = ScriptedDialogRenderer::with_script([
            ScriptedResponse::Choose(0),
            ScriptedResponse::ChooseLabel("No".to_string()),
            ScriptedResponse::Fail("gone".to_string()),
        ]);
        let renderer_obj: &dyn DialogRenderer = &renderer;
        let prompt = prompt(&[("Yes", DialogRole::Affirmative), ("No", DialogRole::Negative)]);

        assert_eq!(
            block_on(renderer_obj.show(&prompt)),
            DialogOutcome::ActionInvoked(0)
        );
        assert_eq!(
            block_on(renderer_obj.show(&prompt)),
            DialogOutcome::ActionInvoked(1)
        );
        assert_eq!(
            block_on(renderer_obj.show(&prompt)),
            DialogOutcome::Failed("gone".to_string())
        );
        assert_eq!(block_on(renderer_obj.show(&prompt)), DialogOutcome::Canceled);
        assert_eq!(renderer.show_count(), 4);
        assert_eq!(renderer.max_in_flight(), 1);
    }

    #[test]
    fn unknown_label_is_reported_as_failure() {
        let renderer =
            ScriptedDialogRenderer::with_script([ScriptedResponse::ChooseLabel("Maybe".into())]);
        assert_eq!(
            block_on(renderer.show(&prompt(&[("Yes", DialogRole::Affirmative)]))),
            DialogOutcome::Failed("no action labeled `Maybe`".to_string())
        );
    }

    #[test]
    fn pressing_role_slots_uses_first_registered_action() {
        let renderer = ScriptedDialogRenderer::with_script([
            ScriptedResponse::Press(DialogRole::Affirmative),
            ScriptedResponse::Press(DialogRole::Negative),
        ])
        .with_dismiss_fallback("Close");
        let prompt = prompt(&[
            ("Neutral", DialogRole::Neutral),
            ("Yes", DialogRole::Affirmative),
            ("Also yes", DialogRole::Affirmative),
        ]);

        assert_eq!(
            block_on(renderer.show(&prompt)),
            DialogOutcome::ActionInvoked(1)
        );
        assert_eq!(block_on(renderer.show(&prompt)), DialogOutcome::Canceled);
    }

    #[test]
    fn shown_history_records_prompt_and_thread() {
        let renderer = ScriptedDialogRenderer::default();
        let prompt = prompt(&[]);
        block_on(renderer.show(&prompt));

        let shown = renderer.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].prompt, prompt);
        assert_eq!(shown[0].thread, thread::current().id());
        assert!(shown[0].finished_at >= shown[0].started_at);
    }

    #[test]
    fn delay_keeps_dialog_open() {
        let renderer = ScriptedDialogRenderer::default().with_delay(Duration::from_millis(20));
        block_on(renderer.show(&prompt(&[])));

        let shown = renderer.shown();
        assert!(shown[0].finished_at - shown[0].started_at >= Duration::from_millis(20));
    }

    #[test]
    fn yielding_delay_lets_other_shows_run_on_the_same_thread() {
        let renderer =
            ScriptedDialogRenderer::default().with_yielding_delay(Duration::from_millis(30));
        let prompt = prompt(&[]);

        let (first, second) =
            block_on(futures::future::join(renderer.show(&prompt), renderer.show(&prompt)));

        assert_eq!((first, second), (DialogOutcome::Canceled, DialogOutcome::Canceled));
        assert_eq!(renderer.max_in_flight(), 2);
        let shown = renderer.shown();
        assert!(shown[0].finished_at - shown[0].started_at >= Duration::from_millis(30));
    }

    #[test]
    fn pushed_responses_append_to_script() {
        let renderer = ScriptedDialogRenderer::default();
        renderer.push(ScriptedResponse::Press(DialogRole::Neutral));
        assert_eq!(
            block_on(renderer.show(&prompt(&[("Later", DialogRole::Neutral)]))),
            DialogOutcome::ActionInvoked(0)
        );
    }
}
