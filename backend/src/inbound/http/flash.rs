//! One-shot messages carried across a redirect in the session.

use serde::{Deserialize, Serialize};

/// Session key holding queued flash messages.
pub(crate) const FLASH_KEY: &str = "flash";

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// The action worked.
    Success,
    /// The action failed and the user should know why.
    Error,
}

/// A queued message and its severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    /// Severity.
    pub level: FlashLevel,
    /// Human-readable text.
    pub message: String,
}

impl FlashMessage {
    /// Build a flash message.
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_serialise_lowercase() {
        let json = serde_json::to_string(&FlashMessage::new(FlashLevel::Error, "x"))
            .expect("serialises");
        assert_eq!(json, r#"{"level":"error","message":"x"}"#);
    }
}
