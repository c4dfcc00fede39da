//! Schema-Driven Form Components
//!
//! Leptos front end for [`schemaform::form::SchemaForm`]:
//! - `SchemaFormGenerator` owns one form engine and draws every field
//! - scalar controls live in `fields`, list editing in `array_field`
//!
//! The engine holds boxed callbacks, so it lives in a thread-local signal.

use leptos::prelude::*;
use schemaform::form::SchemaForm;

pub mod array_field;
pub mod fields;
pub mod generator;

pub use generator::*;

/// Reactive handle to the form engine shared by all field components
pub type FormHandle = RwSignal<SchemaForm, LocalStorage>;

/// Tailwind classes shared by every text-like input
pub(crate) const INPUT_CLASS: &str =
    "w-full px-3 py-2 text-sm border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-teal-500";

/// Run an edit against the engine, notifying subscribers only when it was accepted
pub(crate) fn apply_edit(
    form: FormHandle,
    edit: impl FnOnce(&mut SchemaForm) -> Result<(), schemaform::form::FormError>,
) {
    form.maybe_update(|f| match edit(f) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Ignored edit: {}", e);
            false
        }
    });
}
