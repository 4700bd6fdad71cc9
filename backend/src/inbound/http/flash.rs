//! One-time user-visible notices.
//!
//! A flash message is queued in the session cookie and drained on the next
//! page render, so a redirect can carry a notice across requests and show it
//! exactly once.

use serde::{Deserialize, Serialize};

/// Severity of a flash message, mapped to a CSS class by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

/// A single one-time notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    /// Create a notice with the given level.
    pub fn new(level: FlashLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    /// Create a success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, text)
    }

    /// Create an error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(FlashLevel::Error, text)
    }

    /// Create an informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_serialise_to_snake_case() {
        let json = serde_json::to_string(&FlashMessage::success("Saved")).expect("serialises");
        assert_eq!(json, r#"{"level":"success","text":"Saved"}"#);
    }

    #[test]
    fn round_trips_through_serde() {
        let original = FlashMessage::error("Invalid name or password!");
        let json = serde_json::to_string(&original).expect("serialises");
        let restored: FlashMessage = serde_json::from_str(&json).expect("deserialises");
        assert_eq!(restored, original);
    }
}
