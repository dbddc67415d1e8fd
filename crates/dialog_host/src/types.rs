//! Dialog request, prompt and outcome models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Owned zero-argument callback bound to a dialog action or to dialog dismissal.
pub type ActionCallback = Box<dyn FnOnce() + Send + 'static>;

/// Logical slot an action occupies on surfaces that expose fixed button positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogRole {
    /// Confirming/positive action.
    Affirmative,
    /// Secondary action that neither confirms nor rejects.
    Neutral,
    /// Rejecting/negative action.
    Negative,
}

impl DialogRole {
    /// All roles in slot order.
    pub const ALL: [Self; 3] = [Self::Affirmative, Self::Neutral, Self::Negative];

    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Affirmative => "affirmative",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// A labeled dialog button and the callback to run when the user selects it.
pub struct DialogAction {
    label: String,
    role: DialogRole,
    callback: ActionCallback,
}

impl DialogAction {
    /// Creates an action with an explicit role.
    pub fn new(
        label: impl Into<String>,
        role: DialogRole,
        callback: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            role,
            callback: Box::new(callback),
        }
    }

    /// Creates an [`DialogRole::Affirmative`] action.
    pub fn affirmative(label: impl Into<String>, callback: impl FnOnce() + Send + 'static) -> Self {
        Self::new(label, DialogRole::Affirmative, callback)
    }

    /// Creates a [`DialogRole::Neutral`] action.
    pub fn neutral(label: impl Into<String>, callback: impl FnOnce() + Send + 'static) -> Self {
        Self::new(label, DialogRole::Neutral, callback)
    }

    /// Creates a [`DialogRole::Negative`] action.
    pub fn negative(label: impl Into<String>, callback: impl FnOnce() + Send + 'static) -> Self {
        Self::new(label, DialogRole::Negative, callback)
    }

    /// Button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Slot role.
    pub fn role(&self) -> DialogRole {
        self.role
    }

    /// Returns the callback-free view handed to renderers.
    pub fn view(&self) -> DialogActionView {
        DialogActionView {
            label: self.label.clone(),
            role: self.role,
        }
    }

    /// Consumes the action and runs its callback.
    pub fn invoke(self) {
        (self.callback)();
    }
}

impl fmt::Debug for DialogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogAction")
            .field("label", &self.label)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// One request to show an alert-style dialog.
///
/// Constructors mirror the caller-facing shapes: message only ([`DialogRequest::new`]), message
/// with actions ([`DialogRequest::with_actions`]), and message with a cancel callback and actions
/// ([`DialogRequest::with_cancel`]). Each has a title-qualified form through
/// [`DialogRequest::titled`].
pub struct DialogRequest {
    title: String,
    message: String,
    actions: Vec<DialogAction>,
    on_cancel: Option<ActionCallback>,
}

impl DialogRequest {
    /// Creates an untitled request with no actions.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            message: message.into(),
            actions: Vec::new(),
            on_cancel: None,
        }
    }

    /// Creates an untitled request with the given ordered actions.
    pub fn with_actions(
        message: impl Into<String>,
        actions: impl IntoIterator<Item = DialogAction>,
    ) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            ..Self::new(message)
        }
    }

    /// Creates an untitled request with a dismissal callback and the given ordered actions.
    pub fn with_cancel(
        message: impl Into<String>,
        on_cancel: impl FnOnce() + Send + 'static,
        actions: impl IntoIterator<Item = DialogAction>,
    ) -> Self {
        Self {
            on_cancel: Some(Box::new(on_cancel)),
            ..Self::with_actions(message, actions)
        }
    }

    /// Sets the title. Empty or whitespace-only titles fall back to the host default.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Appends one action after any existing ones.
    pub fn action(mut self, action: DialogAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Raw title as supplied by the caller.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Ordered actions.
    pub fn actions(&self) -> &[DialogAction] {
        &self.actions
    }

    /// Whether a dismissal callback is attached.
    pub fn has_cancel_action(&self) -> bool {
        self.on_cancel.is_some()
    }

    /// Whether the message carries visible text.
    pub fn has_message(&self) -> bool {
        !self.message.trim().is_empty()
    }

    /// Title to display, substituting `default_title` for empty or whitespace-only titles.
    pub fn resolved_title<'a>(&'a self, default_title: &'a str) -> &'a str {
        if self.title.trim().is_empty() {
            default_title
        } else {
            &self.title
        }
    }

    /// Builds the callback-free prompt passed to a renderer.
    pub fn prompt(&self, default_title: &str) -> DialogPrompt {
        DialogPrompt {
            title: self.resolved_title(default_title).to_string(),
            message: self.message.clone(),
            actions: self.actions.iter().map(DialogAction::view).collect(),
        }
    }

    /// Consumes the request and runs the callback matching a renderer outcome.
    ///
    /// Exactly one callback runs for [`DialogOutcome::ActionInvoked`] (the selected action) and
    /// for [`DialogOutcome::Canceled`] (the dismissal callback, when attached). Every other
    /// callback is dropped unrun.
    ///
    /// # Errors
    ///
    /// Returns the failure cause for [`DialogOutcome::Failed`] and for action indexes outside the
    /// request's action list; no callback runs in either case.
    pub fn settle(self, outcome: DialogOutcome) -> Result<DialogResolution, String> {
        match outcome {
            DialogOutcome::ActionInvoked(index) => {
                let mut actions = self.actions;
                if index >= actions.len() {
                    return Err(format!(
                        "renderer reported action {index} but the dialog has {} action(s)",
                        actions.len()
                    ));
                }
                let action = actions.swap_remove(index);
                let label = action.label.clone();
                action.invoke();
                Ok(DialogResolution::Action { index, label })
            }
            DialogOutcome::Canceled => {
                if let Some(on_cancel) = self.on_cancel {
                    on_cancel();
                }
                Ok(DialogResolution::Canceled)
            }
            DialogOutcome::Failed(cause) => Err(cause),
        }
    }
}

impl fmt::Debug for DialogRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogRequest")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("actions", &self.actions)
            .field("has_cancel_action", &self.has_cancel_action())
            .finish()
    }
}

impl From<&str> for DialogRequest {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for DialogRequest {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Callback-free description of one dialog action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogActionView {
    /// Button label.
    pub label: String,
    /// Slot role.
    pub role: DialogRole,
}

/// Renderer input: everything needed to draw the dialog, without caller callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogPrompt {
    /// Title after default substitution.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Ordered actions; [`DialogOutcome::ActionInvoked`] indexes into this list.
    pub actions: Vec<DialogActionView>,
}

impl DialogPrompt {
    /// Returns the index of the first action carrying `label`.
    pub fn position_of_label(&self, label: &str) -> Option<usize> {
        self.actions.iter().position(|action| action.label == label)
    }
}

/// What a renderer observed for one shown dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DialogOutcome {
    /// The user chose the action at this index of [`DialogPrompt::actions`].
    ActionInvoked(usize),
    /// The dialog was dismissed without choosing an action.
    Canceled,
    /// The dialog could not be constructed or shown.
    Failed(String),
}

/// Successful result of one presentation, after callbacks ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResolution {
    /// The action at `index` was selected and its callback ran.
    Action {
        /// Index into the request's action list.
        index: usize,
        /// Label of the selected action.
        label: String,
    },
    /// The dialog was dismissed; the dismissal callback ran if one was attached.
    Canceled,
}
