//! Core form validation types.
//!
//! This module contains the pure data and function types the engine works on:
//! - Messages and their severity
//! - The form state snapshot
//! - Field validators and whole-form rules
//!
//! Nothing in this module performs I/O or holds shared mutable state.

mod message;
mod rule;
mod state;

pub use message::{Message, MessageKind};
pub use rule::{FieldValidator, FormRule};
pub use state::FormState;
