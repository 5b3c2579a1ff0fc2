use serde::{Deserialize, Serialize};

/// Error body returned by the articles API, e.g. `{"message": "Invalid credentials"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiError {
    /// Server-supplied message, if the body carried a non-empty one.
    pub fn into_message(self) -> Option<String> {
        self.message.filter(|message| !message.trim().is_empty())
    }
}
