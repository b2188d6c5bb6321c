//! Register Form
//!
//! This example replays a user filling in a registration form.
//!
//! Key concepts:
//! - Declaring field rules and a whole-form rule
//! - Change events validate without trimming, blur events commit
//! - Messages wait for blur, validity never waits
//!
//! Run with: cargo run --example register_form
//! Set RUST_LOG=formset=trace to see every field pass.

use formset::core::FormState;
use formset::engine::FormEngine;
use formset::schema::{rules, FieldSchema, FormSchema, SchemaError};
use formset::session::FormSession;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn register_schema() -> Result<FormSchema, SchemaError> {
    FormSchema::builder()
        .field(
            "displayName",
            FieldSchema::new().required().trim().validator(rules::length(
                Some(5),
                Some(30),
                "Display name must be between 5 to 30 characters in length.",
            )),
        )
        .field(
            "email",
            FieldSchema::new()
                .required()
                .trim()
                .validator(rules::email("Please give a valid email address")),
        )
        .field("password1", FieldSchema::new().required().trim())
        .field("password2", FieldSchema::new().required().trim())
        .form_rule_on(
            ["password1", "password2"],
            rules::fields_match("password1", "password2", "Password do not match"),
        )
        .build()
}

fn print_state(label: &str, state: &FormState) {
    println!("{label}");
    if let Some(message) = &state.form_message {
        println!("  form: {message}");
    }
    for (field, message) in state.errors() {
        println!("  {field}: {message}");
    }
    println!("  valid: {}\n", state.is_form_valid);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formset=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Register Form Example ===\n");

    let engine = FormEngine::new(register_schema()?);
    let mut session = FormSession::new(
        engine,
        [
            ("displayName", ""),
            ("email", ""),
            ("password1", ""),
            ("password2", ""),
        ],
    );
    print_state("Fresh form (no messages yet, but not valid):", session.state());

    session.change("displayName", "Al")?;
    session.blur("displayName")?;
    print_state("Display name too short:", session.state());

    session.change("displayName", "Alice Smith")?;
    print_state("Display name fixed while typing:", session.state());

    for (field, value) in [("password1", "abc"), ("password2", "abd")] {
        session.change(field, value)?;
        session.blur(field)?;
    }
    print_state("Passwords differ:", session.state());

    session.change("password2", "abc")?;
    session.change("email", "  alice@example.com ")?;
    session.blur("email")?;
    print_state("Everything filled in:", session.state());

    println!("State dump:");
    println!("{}\n", serde_json::to_string_pretty(session.state())?);

    let flips = session
        .history()
        .transitions()
        .iter()
        .filter(|t| t.changed_validity())
        .count();
    println!(
        "{} edits applied, validity changed {flips} time(s)",
        session.history().transitions().len()
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
