//! Form schemas and their compilation.
//!
//! A schema is declared once, either in code through [`FormSchemaBuilder`]
//! or as data through [`RawSchema`], and compiled into an immutable
//! [`FormSchema`]. Compilation is purely structural: it never looks at
//! values, and a malformed schema is rejected with a single [`SchemaError`]
//! listing every issue.

mod builder;
mod error;
mod field;
mod raw;
pub mod rules;

pub use builder::FormSchemaBuilder;
pub use error::{SchemaError, SchemaIssue};
pub use field::FieldSchema;
pub use raw::{compile, FormRuleSpec, RawField, RawSchema, RuleSpec, ValidatorRegistry};

use crate::core::FormRule;

/// A compiled, immutable form schema.
///
/// Fields keep their declaration order, which is the order the engine
/// evaluates them in.
#[derive(Clone, Debug)]
pub struct FormSchema {
    fields: Vec<(String, FieldSchema)>,
    form_rule: Option<FormRule>,
}

impl FormSchema {
    /// Start building a schema.
    pub fn builder() -> FormSchemaBuilder {
        FormSchemaBuilder::new()
    }

    /// Iterate over fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.fields
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
    }

    /// Iterate over field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a single field.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, schema)| schema)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn form_rule(&self) -> Option<&FormRule> {
        self.form_rule.as_ref()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
