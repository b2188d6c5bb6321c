//! Declarative schemas loaded from data.
//!
//! A [`RawSchema`] describes fields and rules with tagged rule kinds instead
//! of closures. Custom behaviour is referenced by name and resolved in a
//! [`ValidatorRegistry`] at compile time, so an unresolvable rule fails
//! schema construction instead of surfacing on some later edit.
//!
//! # Example
//!
//! ```rust
//! use formset::schema::{compile, RawSchema, ValidatorRegistry};
//!
//! let raw = RawSchema::from_json(r#"{
//!     "fields": [
//!         { "name": "displayName", "required": true, "trim": true,
//!           "validate": { "rule": "length", "min": 5, "max": 30,
//!                         "message": "Display name must be between 5 to 30 characters in length." } },
//!         { "name": "email", "required": true, "trim": true,
//!           "validate": { "rule": "email", "message": "Please give a valid email address" } }
//!     ]
//! }"#).unwrap();
//!
//! let schema = compile(&raw, &ValidatorRegistry::new()).unwrap();
//! assert_eq!(schema.len(), 2);
//! ```

use crate::core::{FieldValidator, FormRule, Message};
use crate::schema::builder::FormSchemaBuilder;
use crate::schema::error::{SchemaError, SchemaIssue};
use crate::schema::field::FieldSchema;
use crate::schema::{rules, FormSchema};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Schema as data, in declaration order.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawSchema {
    pub fields: Vec<RawField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_rule: Option<FormRuleSpec>,
}

/// One field declaration.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawField {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_message: Option<String>,
    #[serde(default)]
    pub trim: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<RuleSpec>,
}

/// Field rule kinds.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum RuleSpec {
    Length {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
        message: String,
    },
    Email {
        message: String,
    },
    Pattern {
        regex: String,
        message: String,
    },
    /// A validator registered under this name
    Custom {
        name: String,
    },
}

/// Whole-form rule kinds.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum FormRuleSpec {
    /// Both fields must hold the same value once both are filled
    FieldsMatch {
        fields: [String; 2],
        message: String,
    },
    /// A form rule registered under this name
    Custom {
        name: String,
    },
}

impl RawSchema {
    /// Parse a schema from JSON.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| {
            SchemaError::from(SchemaIssue::Malformed {
                reason: e.to_string(),
            })
        })
    }
}

/// Named custom validators and form rules a raw schema may reference.
#[derive(Clone, Debug, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, FieldValidator>,
    form_rules: HashMap<String, FormRule>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field validator under a name.
    pub fn validator<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> Option<Message> + Send + Sync + 'static,
    {
        self.validators
            .insert(name.into(), FieldValidator::new(check));
        self
    }

    /// Register a whole-form rule under a name.
    pub fn form_rule(mut self, name: impl Into<String>, rule: FormRule) -> Self {
        self.form_rules.insert(name.into(), rule);
        self
    }

    fn get_validator(&self, name: &str) -> Option<FieldValidator> {
        self.validators.get(name).cloned()
    }

    fn get_form_rule(&self, name: &str) -> Option<FormRule> {
        self.form_rules.get(name).cloned()
    }
}

/// Compile a raw schema, resolving named rules in the registry.
///
/// Every issue found, whether in rule resolution or in the overall
/// structure, is reported in the one returned error.
pub fn compile(raw: &RawSchema, registry: &ValidatorRegistry) -> Result<FormSchema, SchemaError> {
    let mut builder = FormSchemaBuilder::new();

    for field in &raw.fields {
        let mut schema = FieldSchema::new();
        if field.required {
            schema = match &field.required_message {
                Some(message) => schema.required_with(message.clone()),
                None => schema.required(),
            };
        }
        if field.trim {
            schema = schema.trim();
        }
        if let Some(spec) = &field.validate {
            match resolve_validator(&field.name, spec, registry) {
                Ok(validator) => schema = schema.validator(validator),
                Err(issue) => builder = builder.issue(issue),
            }
        }
        builder = builder.field(field.name.clone(), schema);
    }

    match &raw.form_rule {
        Some(FormRuleSpec::FieldsMatch { fields, message }) => {
            let [first, second] = fields;
            builder = builder.form_rule_on(
                [first.clone(), second.clone()],
                rules::fields_match(first.clone(), second.clone(), message.clone()),
            );
        }
        Some(FormRuleSpec::Custom { name }) => match registry.get_form_rule(name) {
            Some(rule) => builder = builder.form_rule(rule),
            None => {
                builder = builder.issue(SchemaIssue::UnknownFormRule { name: name.clone() });
            }
        },
        None => {}
    }

    builder.build()
}

fn resolve_validator(
    field: &str,
    spec: &RuleSpec,
    registry: &ValidatorRegistry,
) -> Result<FieldValidator, SchemaIssue> {
    match spec {
        RuleSpec::Length { min, max, message } => match (min, max) {
            (Some(min), Some(max)) if min > max => Err(SchemaIssue::InvalidLength {
                field: field.to_string(),
                min: *min,
                max: *max,
            }),
            _ => Ok(rules::length(*min, *max, message.clone())),
        },
        RuleSpec::Email { message } => Ok(rules::email(message.clone())),
        RuleSpec::Pattern { regex, message } => Regex::new(regex)
            .map(|re| rules::pattern(re, message.clone()))
            .map_err(|e| SchemaIssue::InvalidPattern {
                field: field.to_string(),
                pattern: regex.clone(),
                reason: e.to_string(),
            }),
        RuleSpec::Custom { name } => {
            registry
                .get_validator(name)
                .ok_or_else(|| SchemaIssue::UnknownValidator {
                    field: field.to_string(),
                    name: name.clone(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FormState;

    #[test]
    fn parses_minimal_field() {
        let raw = RawSchema::from_json(r#"{ "fields": [ { "name": "photoURL" } ] }"#).unwrap();

        assert_eq!(raw.fields.len(), 1);
        assert!(!raw.fields[0].required);
        assert!(!raw.fields[0].trim);
        assert!(raw.fields[0].validate.is_none());
        assert!(raw.form_rule.is_none());
    }

    #[test]
    fn malformed_json_is_a_schema_error() {
        let error = RawSchema::from_json(r#"{ "fields": [ { "nme": "x" } ] }"#).unwrap_err();
        assert!(matches!(error.issues(), [SchemaIssue::Malformed { .. }]));
    }

    #[test]
    fn unknown_rule_kind_is_rejected() {
        let result = RawSchema::from_json(
            r#"{ "fields": [ { "name": "x", "validate": { "rule": "telepathy" } } ] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn parses_form_rule() {
        let raw = RawSchema::from_json(
            r#"{
                "fields": [ { "name": "a" }, { "name": "b" } ],
                "formRule": { "rule": "fieldsMatch", "fields": ["a", "b"], "message": "differ" }
            }"#,
        )
        .unwrap();

        assert_eq!(
            raw.form_rule,
            Some(FormRuleSpec::FieldsMatch {
                fields: ["a".to_string(), "b".to_string()],
                message: "differ".to_string(),
            })
        );
    }

    #[test]
    fn compile_resolves_custom_validator() {
        let raw = RawSchema::from_json(
            r#"{ "fields": [ { "name": "code", "validate": { "rule": "custom", "name": "even" } } ] }"#,
        )
        .unwrap();
        let registry = ValidatorRegistry::new().validator("even", |v: &str| {
            (v.len() % 2 != 0).then(|| Message::error("odd length"))
        });

        let schema = compile(&raw, &registry).unwrap();
        let validator = schema.field("code").unwrap().validator.clone().unwrap();
        assert!(validator.check("ab").is_none());
        assert!(validator.check("abc").is_some());
    }

    #[test]
    fn compile_resolves_custom_form_rule() {
        let raw = RawSchema::from_json(
            r#"{ "fields": [ { "name": "a" } ], "formRule": { "rule": "custom", "name": "always" } }"#,
        )
        .unwrap();
        let registry = ValidatorRegistry::new().form_rule(
            "always",
            FormRule::from_message(|_: &FormState| Some(Message::warning("hi"))),
        );

        let schema = compile(&raw, &registry).unwrap();
        assert!(schema.form_rule().is_some());
    }

    #[test]
    fn compile_collects_every_issue() {
        let raw = RawSchema::from_json(
            r#"{
                "fields": [
                    { "name": "a", "validate": { "rule": "custom", "name": "missing" } },
                    { "name": "b", "validate": { "rule": "length", "min": 9, "max": 2, "message": "m" } },
                    { "name": "c", "validate": { "rule": "pattern", "regex": "(", "message": "m" } },
                    { "name": "a" }
                ],
                "formRule": { "rule": "custom", "name": "nowhere" }
            }"#,
        )
        .unwrap();

        let error = compile(&raw, &ValidatorRegistry::new()).unwrap_err();
        let issues = error.issues();

        assert_eq!(issues.len(), 5);
        assert!(issues.iter().any(|i| matches!(i, SchemaIssue::UnknownValidator { name, .. } if name == "missing")));
        assert!(issues.iter().any(|i| matches!(i, SchemaIssue::InvalidLength { min: 9, max: 2, .. })));
        assert!(issues.iter().any(|i| matches!(i, SchemaIssue::InvalidPattern { field, .. } if field == "c")));
        assert!(issues.iter().any(|i| matches!(i, SchemaIssue::DuplicateField { field } if field == "a")));
        assert!(issues.iter().any(|i| matches!(i, SchemaIssue::UnknownFormRule { name } if name == "nowhere")));
    }

    #[test]
    fn fields_match_must_reference_declared_fields() {
        let raw = RawSchema::from_json(
            r#"{
                "fields": [ { "name": "password1" } ],
                "formRule": { "rule": "fieldsMatch", "fields": ["password1", "password2"], "message": "m" }
            }"#,
        )
        .unwrap();

        let error = compile(&raw, &ValidatorRegistry::new()).unwrap_err();
        assert_eq!(
            error.issues(),
            &[SchemaIssue::UnknownFieldReference {
                field: "password2".to_string()
            }]
        );
    }

    #[test]
    fn required_message_is_carried_over() {
        let raw = RawSchema::from_json(
            r#"{ "fields": [ { "name": "n", "required": true, "requiredMessage": "Need it" } ] }"#,
        )
        .unwrap();

        let schema = compile(&raw, &ValidatorRegistry::new()).unwrap();
        let field = schema.field("n").unwrap();
        assert!(field.is_required());
        assert_eq!(field.required_message("n"), Message::error("Need it"));
    }
}
