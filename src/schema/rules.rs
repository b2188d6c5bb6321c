//! Built-in field validators and form rules.
//!
//! These cover the checks most forms need. Anything else can be written as
//! a closure and passed to [`FieldSchema::validate`](super::FieldSchema::validate).

use crate::core::{FieldValidator, FormRule, FormState, Message};
use regex::Regex;
use std::sync::LazyLock;

/// Loose address check: something@something.tld with no whitespace.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@.]+$";

// EMAIL_PATTERN is a constant covered by `email_pattern_compiles`.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Check the length of a value, counted in characters.
///
/// Either bound may be omitted.
///
/// # Example
///
/// ```rust
/// use formset::schema::rules;
///
/// let rule = rules::length(Some(5), Some(30), "Between 5 and 30 characters");
/// assert!(rule.check("Al").is_some());
/// assert!(rule.check("Alice Smith").is_none());
/// ```
pub fn length(min: Option<usize>, max: Option<usize>, message: impl Into<String>) -> FieldValidator {
    let message = Message::error(message);
    FieldValidator::new(move |value: &str| {
        let len = value.chars().count();
        let too_short = min.is_some_and(|min| len < min);
        let too_long = max.is_some_and(|max| len > max);
        (too_short || too_long).then(|| message.clone())
    })
}

/// Check that a value looks like an email address.
pub fn email(message: impl Into<String>) -> FieldValidator {
    let message = Message::error(message);
    FieldValidator::new(move |value: &str| (!EMAIL_RE.is_match(value)).then(|| message.clone()))
}

/// Check a value against a compiled regular expression.
pub fn pattern(regex: Regex, message: impl Into<String>) -> FieldValidator {
    let message = Message::error(message);
    FieldValidator::new(move |value: &str| (!regex.is_match(value)).then(|| message.clone()))
}

/// Require two fields to hold the same value.
///
/// The check only runs once both fields have been filled, so a half
/// completed pair never shows a mismatch.
///
/// # Example
///
/// ```rust
/// use formset::core::FormState;
/// use formset::schema::rules;
///
/// let rule = rules::fields_match("password1", "password2", "Password do not match");
/// let state = FormState::default()
///     .with_value("password1", "abc")
///     .with_value("password2", "abd")
///     .with_filled("password1", true);
///
/// // password2 not filled yet
/// assert!(rule.apply(state.clone()).form_message.is_none());
///
/// let state = state.with_filled("password2", true);
/// assert!(rule.apply(state).form_message.is_some());
/// ```
pub fn fields_match(
    first: impl Into<String>,
    second: impl Into<String>,
    message: impl Into<String>,
) -> FormRule {
    let first = first.into();
    let second = second.into();
    let message = Message::error(message);
    FormRule::from_message(move |state: &FormState| {
        let both_filled = state.is_filled(&first) && state.is_filled(&second);
        (both_filled && state.value(&first) != state.value(&second)).then(|| message.clone())
    })
}
