//! Schema-driven form state
//!
//! - [`seed`]: builds the initial field values for a schema
//! - [`validation`]: checks every field on submit
//! - [`array`]: element edits for array fields
//! - [`state`]: [`SchemaForm`], the editable form instance tying these together

pub mod array;
pub mod error;
pub mod seed;
pub mod state;
pub mod validation;
pub mod value;

pub use error::FormError;
pub use seed::{seed_form_data, seed_value};
pub use state::{FormCallback, FormOptions, SchemaForm, SubmitOutcome};
pub use validation::{validate, ConstraintViolation, FieldErrors, ValidationIssue};
pub use value::{empty_item, ArrayItem, FormData};
