//! Coordinator configuration.

use serde::{Deserialize, Serialize};

/// Title shown when a request has no title of its own.
pub const DEFAULT_DIALOG_TITLE: &str = "System alert!";

/// Name given to the thread spawned by [`crate::UiThreadDispatcher::from_config`].
pub const DEFAULT_UI_THREAD_NAME: &str = "dialog-ui";

/// Coordinator settings. Missing JSON fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Title substituted for empty or whitespace-only request titles.
    pub default_title: String,
    /// OS thread name for the dedicated UI thread.
    pub ui_thread_name: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_DIALOG_TITLE.to_string(),
            ui_thread_name: DEFAULT_UI_THREAD_NAME.to_string(),
        }
    }
}

impl DialogConfig {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw` is not valid JSON for this shape.
    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }

    /// Replaces the default title.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = DialogConfig::from_json_str(r#"{"default_title":"Alert!"}"#).expect("parse");
        assert_eq!(
            config,
            DialogConfig {
                default_title: "Alert!".to_string(),
                ui_thread_name: DEFAULT_UI_THREAD_NAME.to_string(),
            }
        );
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(
            DialogConfig::from_json_str("{}").expect("parse"),
            DialogConfig::default()
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(DialogConfig::from_json_str("{\"default_title\": 3}").is_err());
    }
}
