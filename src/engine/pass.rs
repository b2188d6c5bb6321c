//! The validation pass: pure functions from state to state.

use crate::core::{FormState, Message};
use crate::engine::config::ValidateConfig;
use crate::schema::{FieldSchema, FormSchema};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Build the initial state of a form.
///
/// Fields missing from `initial_values` start empty, values for fields the
/// schema does not declare are ignored. Every field starts untouched, so no
/// field message is visible yet, but validity already reflects the rules.
///
/// # Example
///
/// ```rust
/// use formset::engine::init_form;
/// use formset::schema::{FieldSchema, FormSchema};
///
/// let schema = FormSchema::builder()
///     .field("name", FieldSchema::new().required())
///     .build()
///     .unwrap();
///
/// let state = init_form([("name", "")], &schema);
/// assert!(state.message("name").is_none());
/// assert!(!state.is_form_valid);
/// ```
pub fn init_form<I, K, V>(initial_values: I, schema: &FormSchema) -> FormState
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut provided: BTreeMap<String, String> = initial_values
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let mut state = FormState::default();
    for name in schema.field_names() {
        let value = provided.remove(name).unwrap_or_default();
        state.values.insert(name.to_string(), value);
        state.filled.insert(name.to_string(), false);
        state.messages.insert(name.to_string(), None);
    }
    for field in provided.keys() {
        debug!(field = %field, "ignoring initial value for undeclared field");
    }

    validate_form(&state, schema, ValidateConfig::default())
}

/// Run one validation pass and return the next state.
///
/// This is a pure function - the input state is never modified. Running it
/// again on its own output with the same config yields the same state.
pub fn validate_form(state: &FormState, schema: &FormSchema, config: ValidateConfig) -> FormState {
    let mut next = FormState::default();
    let mut outcomes: Vec<Option<Message>> = Vec::with_capacity(schema.len());

    for (name, field) in schema.fields() {
        let raw = state.value(name).unwrap_or_default();
        let filled = state.is_filled(name);
        let (stored, outcome) = check_field(name, field, raw, config);

        let visible = if filled { outcome.clone() } else { None };
        trace!(field = name, filled, message = ?visible, "validated field");

        next.values.insert(name.to_string(), stored);
        next.filled.insert(name.to_string(), filled);
        next.messages.insert(name.to_string(), visible);
        outcomes.push(outcome);
    }

    // Field-level validity, so the form rule reads a current flag
    next.is_form_valid = compute_validity(&next, schema, &outcomes);

    let mut next = match schema.form_rule() {
        Some(rule) => {
            let reference = next.clone();
            enforce_shape(rule.apply(next), &reference)
        }
        None => next,
    };

    next.is_form_valid = compute_validity(&next, schema, &outcomes);
    debug!(
        valid = next.is_form_valid,
        use_preprocessor = config.use_preprocessor,
        "validated form"
    );
    next
}

/// Check one field, returning the value to store and the ungated outcome.
fn check_field(
    name: &str,
    field: &FieldSchema,
    raw: &str,
    config: ValidateConfig,
) -> (String, Option<Message>) {
    let semantic = field.semantic_value(raw);
    let stored = if config.use_preprocessor && field.is_trimmed() {
        semantic.to_string()
    } else {
        raw.to_string()
    };

    let outcome = if field.is_required() && is_blank(raw) {
        Some(field.required_message(name))
    } else {
        field
            .validator
            .as_ref()
            .and_then(|validator| validator.check(semantic))
    };

    (stored, outcome)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Restore the schema's key set after a whole-form rule ran.
///
/// Keys the rule dropped are taken back from `reference`, keys the schema
/// does not declare are removed.
fn enforce_shape(mut state: FormState, reference: &FormState) -> FormState {
    let values = restore_keys(&mut state.values, &reference.values);
    let filled = restore_keys(&mut state.filled, &reference.filled);
    let messages = restore_keys(&mut state.messages, &reference.messages);
    if values || filled || messages {
        warn!("form rule returned a state with a different field set; repaired");
    }
    state
}

/// Align the keys of `map` with `reference`. Returns whether anything changed.
fn restore_keys<T: Clone>(map: &mut BTreeMap<String, T>, reference: &BTreeMap<String, T>) -> bool {
    let before = map.len();
    map.retain(|key, _| reference.contains_key(key));
    let mut changed = map.len() != before;

    for (key, value) in reference {
        if !map.contains_key(key) {
            map.insert(key.clone(), value.clone());
            changed = true;
        }
    }
    changed
}

/// Derive form validity from scratch.
///
/// Independent of `filled`: an untouched required field that is empty keeps
/// the form invalid without ever showing a message.
fn compute_validity(state: &FormState, schema: &FormSchema, outcomes: &[Option<Message>]) -> bool {
    let required_present = schema
        .fields()
        .filter(|(_, field)| field.is_required())
        .all(|(name, _)| !is_blank(state.value(name).unwrap_or_default()));

    let no_rule_errors = outcomes.iter().flatten().all(|m| !m.is_error());

    required_present && no_rule_errors && !state.has_visible_errors()
}
