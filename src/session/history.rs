//! Edit history tracking.
//!
//! Provides immutable tracking of the edits applied to a form over time,
//! following functional programming principles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// An edit applied to a form.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum FormEvent {
    /// The form was created
    Init,
    /// A value changed while typing
    Change { field: String },
    /// A field lost focus
    Blur { field: String },
    /// Every field was marked filled
    TouchAll,
    /// The state was revalidated without an edit
    Revalidate,
}

/// Record of a single edit and its effect on validity.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct FormTransition {
    pub event: FormEvent,
    /// Validity before the edit (`false` for the initial event)
    pub was_valid: bool,
    /// Validity after the edit
    pub is_valid: bool,
    /// When the edit was applied
    pub timestamp: DateTime<Utc>,
}

impl FormTransition {
    /// Check if this edit flipped form validity.
    pub fn changed_validity(&self) -> bool {
        self.was_valid != self.is_valid
    }
}

/// Ordered history of form edits.
///
/// History is immutable - the `record` method returns a new history
/// with the transition added.
///
/// # Example
///
/// ```rust
/// use formset::session::{FormEvent, FormHistory, FormTransition};
/// use chrono::Utc;
///
/// let history = FormHistory::new();
/// let history = history.record(FormTransition {
///     event: FormEvent::Init,
///     was_valid: false,
///     is_valid: false,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.transitions().len(), 1);
/// ```
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct FormHistory {
    transitions: Vec<FormTransition>,
}

impl FormHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition, returning a new history.
    ///
    /// This is a pure function - it does not mutate the existing history
    /// but returns a new one with the transition added.
    pub fn record(&self, transition: FormTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the sequence of events applied so far.
    pub fn events(&self) -> Vec<&FormEvent> {
        self.transitions.iter().map(|t| &t.event).collect()
    }

    /// Calculate total duration from first to last edit.
    ///
    /// Returns `None` if nothing was recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[FormTransition] {
        &self.transitions
    }
}
