//! Builder for compiling form schemas.

use crate::core::{FormRule, FormState};
use crate::schema::error::{SchemaError, SchemaIssue};
use crate::schema::field::FieldSchema;
use crate::schema::FormSchema;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

type SchemaCheck = Validation<(), NonEmptyVec<SchemaIssue>>;

/// Builder for constructing form schemas with a fluent API.
///
/// `build` is the compile step: it checks the whole structure and reports
/// every defect at once.
///
/// # Example
///
/// ```rust
/// use formset::schema::{rules, FieldSchema, FormSchemaBuilder};
///
/// let schema = FormSchemaBuilder::new()
///     .field("email", FieldSchema::new().required().trim().validator(rules::email("Invalid")))
///     .field("password1", FieldSchema::new().required())
///     .field("password2", FieldSchema::new().required())
///     .form_rule_on(
///         ["password1", "password2"],
///         rules::fields_match("password1", "password2", "Password do not match"),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.len(), 3);
/// ```
#[derive(Default)]
pub struct FormSchemaBuilder {
    fields: Vec<(String, FieldSchema)>,
    form_rule: Option<FormRule>,
    referenced: Vec<String>,
    issues: Vec<SchemaIssue>,
}

impl FormSchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Declaration order is evaluation order.
    pub fn field(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
        self.fields.push((name.into(), schema));
        self
    }

    /// Set the whole-form rule.
    pub fn form_rule(mut self, rule: FormRule) -> Self {
        self.form_rule = Some(rule);
        self
    }

    /// Set the whole-form rule using a closure.
    pub fn form_rule_fn<F>(self, apply: F) -> Self
    where
        F: Fn(FormState) -> FormState + Send + Sync + 'static,
    {
        self.form_rule(FormRule::new(apply))
    }

    /// Set the whole-form rule and declare the fields it reads.
    ///
    /// Every listed field must be declared, otherwise `build` fails.
    pub fn form_rule_on<I, S>(mut self, fields: I, rule: FormRule) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.referenced.extend(fields.into_iter().map(Into::into));
        self.form_rule(rule)
    }

    /// Record an issue found before `build`, e.g. while resolving names.
    pub(crate) fn issue(mut self, issue: SchemaIssue) -> Self {
        self.issues.push(issue);
        self
    }

    /// Compile the schema.
    /// Returns an error listing every structural issue found.
    pub fn build(self) -> Result<FormSchema, SchemaError> {
        let mut checks: Vec<SchemaCheck> = self
            .issues
            .iter()
            .cloned()
            .map(Validation::fail)
            .collect();

        if self.fields.is_empty() {
            checks.push(Validation::fail(SchemaIssue::NoFields));
        }

        let mut seen = HashSet::new();
        for (name, _) in &self.fields {
            let check = if name.is_empty() {
                Validation::fail(SchemaIssue::EmptyFieldName)
            } else if !seen.insert(name.as_str()) {
                Validation::fail(SchemaIssue::DuplicateField {
                    field: name.clone(),
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        for field in &self.referenced {
            let check = if seen.contains(field.as_str()) {
                Validation::success(())
            } else {
                Validation::fail(SchemaIssue::UnknownFieldReference {
                    field: field.clone(),
                })
            };
            checks.push(check);
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => {
                debug!(
                    fields = self.fields.len(),
                    form_rule = self.form_rule.is_some(),
                    "compiled form schema"
                );
                Ok(FormSchema {
                    fields: self.fields,
                    form_rule: self.form_rule,
                })
            }
            Validation::Failure(issues) => {
                Err(SchemaError::new(issues.iter().cloned().collect()))
            }
        }
    }
}
