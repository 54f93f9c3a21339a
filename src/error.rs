use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors surfaced by the shell. Page load failures are not represented here:
/// those stay inside the content view.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("host error: {0}")]
    Host(String),

    #[error("invalid url '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("unknown theme preset '{0}'")]
    UnknownPreset(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("action '{0}' requires an argument")]
    MissingArgument(String),

    #[error("invalid tab id '{0}'")]
    InvalidTabId(String),

    #[error("shell is not initialised yet")]
    NotReady,

    #[error("shell state lock poisoned")]
    StatePoisoned,
}

impl From<tauri::Error> for ShellError {
    fn from(e: tauri::Error) -> Self {
        ShellError::Host(e.to_string())
    }
}

// Commands hand errors back to the chrome UI as plain strings.
impl Serialize for ShellError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
