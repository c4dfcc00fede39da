//! # schemaform - Schema-Driven Form Engine
//!
//! schemaform turns a JSON-Schema-like descriptor into an editable form model:
//! it seeds field values, dispatches each property to a type-appropriate
//! control, validates the values on submit and hands a flat key/value object
//! to a caller-supplied callback.
//!
//! ## Features
//!
//! - **Typed schema model**: every property is a tagged variant keyed on its `type`
//! - **Seeding**: initial value > schema default > type-empty value, merged without clobbering edits
//! - **Validation**: required, type and constraint checks over every field at once
//! - **Array editing**: replace / append / remove helpers that never mutate in place
//! - **Schema viewer**: read-only summary of a schema's fields
//! - **Schema library**: named schemas loaded from a directory with `$ref` resolution
//!
//! ## Quick Start
//!
//! ```rust
//! use schemaform::form::{SchemaForm, SubmitOutcome};
//! use schemaform::schema::JsonSchema;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let schema = JsonSchema::from_value(&json!({
//!     "properties": { "email": { "type": "string", "format": "email" } },
//!     "required": ["email"]
//! }))?;
//!
//! let mut form = SchemaForm::new(schema);
//! form.set_text("email", "a@b.com")?;
//! assert!(matches!(form.submit(), SubmitOutcome::Submitted(_)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **schema**: descriptor model, parsing and the named schema library
//! - **form**: form state, seeding, validation and array helpers
//! - **render**: toolkit-independent view model consumed by the CLI and the web UI
//! - **viewer**: read-only schema summaries
//! - **config**: settings loading and validation

pub mod cli;
pub mod commands;
pub mod config;
pub mod form;
pub mod render;
pub mod schema;
pub mod viewer;
