//! Field value initialization

use serde_json::Value;
use tracing::debug;

use super::value::FormData;
use crate::schema::{JsonSchema, SchemaProperty};

/// Seed value for a property with no initial value: its default, else the type-empty value
pub fn seed_value(property: &SchemaProperty) -> Value {
    property
        .default
        .clone()
        .unwrap_or_else(|| property.kind.empty_value())
}

/// Build form data for `schema`, merging into `current`.
///
/// Per property: an initial value overwrites whatever is there; otherwise a
/// value already in `current` is kept; otherwise the field gets its seed
/// value. Keys in `current` that the schema does not declare are kept.
pub fn seed_form_data(
    schema: &JsonSchema,
    initial_values: Option<&FormData>,
    current: &FormData,
) -> FormData {
    let mut data = current.clone();
    let mut seeded = 0usize;

    for (name, property) in schema.properties() {
        if let Some(value) = initial_values.and_then(|values| values.get(name)) {
            data.insert(name.to_string(), value.clone());
        } else if !data.contains_key(name) {
            data.insert(name.to_string(), seed_value(property));
            seeded += 1;
        }
    }

    debug!(
        "Seeded form data: {} fields, {} from defaults",
        schema.properties.len(),
        seeded
    );
    data
}
