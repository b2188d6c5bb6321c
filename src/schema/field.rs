//! Per-field rule configuration.

use crate::core::{FieldValidator, Message};

/// Static validation configuration of one field.
///
/// Built with a fluent API and handed to a
/// [`FormSchemaBuilder`](super::FormSchemaBuilder).
///
/// # Example
///
/// ```rust
/// use formset::core::Message;
/// use formset::schema::FieldSchema;
///
/// let field = FieldSchema::new()
///     .required()
///     .trim()
///     .validate(|v: &str| (!v.contains('@')).then(|| Message::error("Missing @")));
///
/// assert!(field.is_required());
/// assert!(field.is_trimmed());
/// ```
#[derive(Clone, Debug, Default)]
pub struct FieldSchema {
    pub(crate) required: bool,
    pub(crate) required_message: Option<String>,
    pub(crate) trim: bool,
    pub(crate) validator: Option<FieldValidator>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as required with a custom message.
    pub fn required_with(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.required_message = Some(message.into());
        self
    }

    /// Trim surrounding whitespace before validating.
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Set the custom validator using a closure.
    pub fn validate<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Option<Message> + Send + Sync + 'static,
    {
        self.validator = Some(FieldValidator::new(check));
        self
    }

    /// Set a pre-built validator.
    pub fn validator(mut self, validator: FieldValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_trimmed(&self) -> bool {
        self.trim
    }

    /// Message shown when a required field is empty.
    pub(crate) fn required_message(&self, field: &str) -> Message {
        match &self.required_message {
            Some(text) => Message::error(text.clone()),
            None => Message::error(format!("{field} is required")),
        }
    }

    /// The value rules should see: trimmed if the field asks for it.
    pub(crate) fn semantic_value<'a>(&self, value: &'a str) -> &'a str {
        if self.trim {
            value.trim()
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive() {
        let field = FieldSchema::new();
        assert!(!field.is_required());
        assert!(!field.is_trimmed());
        assert!(field.validator.is_none());
    }

    #[test]
    fn default_required_message_names_field() {
        let field = FieldSchema::new().required();
        assert_eq!(
            field.required_message("email"),
            Message::error("email is required")
        );
    }

    #[test]
    fn custom_required_message_is_used() {
        let field = FieldSchema::new().required_with("Tell us your name");
        assert!(field.is_required());
        assert_eq!(
            field.required_message("displayName"),
            Message::error("Tell us your name")
        );
    }

    #[test]
    fn semantic_value_respects_trim() {
        assert_eq!(FieldSchema::new().semantic_value("  ab  "), "  ab  ");
        assert_eq!(FieldSchema::new().trim().semantic_value("  ab  "), "ab");
    }
}
