//! Validation messages.
//!
//! A message is the only way a rule reports an outcome. "No message" is
//! expressed as `None`, never as an empty or falsy message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a validation message.
///
/// Only [`MessageKind::Error`] affects form validity. Info and warning
/// messages are displayed but never block the form.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

/// An immutable validation message.
///
/// # Example
///
/// ```rust
/// use formset::core::{Message, MessageKind};
///
/// let msg = Message::error("Please give a valid email address");
/// assert_eq!(msg.kind, MessageKind::Error);
/// assert!(msg.is_error());
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Info, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, text)
    }

    /// Check if this message blocks form validity.
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
