//! Formset: a pure functional form validation engine
//!
//! Formset follows the "pure core, imperative shell" philosophy. Validation
//! is a pure function from a form state and a static schema to the next form
//! state; the only mutable piece is an optional [`session::FormSession`]
//! that holds the current state of one form instance.
//!
//! # Core Concepts
//!
//! - **Schema**: field rules (required, trim, custom validator) plus an
//!   optional whole-form rule, compiled once and rejected as a whole when
//!   malformed
//! - **Form state**: values, touch flags, messages and derived validity
//! - **Engine**: builds the initial state and produces the next state after
//!   every edit
//!
//! # Example
//!
//! ```rust
//! use formset::engine::FormEngine;
//! use formset::schema::{rules, FieldSchema, FormSchema};
//!
//! let schema = FormSchema::builder()
//!     .field(
//!         "displayName",
//!         FieldSchema::new()
//!             .required()
//!             .trim()
//!             .validator(rules::length(Some(5), Some(30), "Between 5 and 30 characters")),
//!     )
//!     .build()
//!     .unwrap();
//! let engine = FormEngine::new(schema);
//!
//! let state = engine.init_form([("displayName", "")]);
//! assert!(state.message("displayName").is_none());
//! assert!(!state.is_form_valid);
//!
//! let state = engine.change(&state, "displayName", "Al").unwrap();
//! let state = engine.blur(&state, "displayName").unwrap();
//! assert!(state.message("displayName").is_some());
//!
//! let state = engine.change(&state, "displayName", "Alice Smith").unwrap();
//! assert!(state.message("displayName").is_none());
//! assert!(state.is_form_valid);
//! ```

pub mod core;
pub mod engine;
pub mod schema;
pub mod session;

// Re-export commonly used types
pub use crate::core::{FieldValidator, FormRule, FormState, Message, MessageKind};
pub use engine::{init_form, validate_form, EditError, FormEngine, ValidateConfig};
pub use schema::{FieldSchema, FormSchema, FormSchemaBuilder, SchemaError, SchemaIssue};
pub use session::FormSession;
