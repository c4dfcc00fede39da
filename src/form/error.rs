//! Form editing error types

use thiserror::Error;

/// Errors returned by the form editing API.
///
/// Invalid field values are not errors; they are reported by validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// No property with this name in the schema
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The edit does not apply to the field's declared type
    #[error("Field '{name}' is declared as {actual}, expected {expected}")]
    WrongFieldType {
        name: String,
        expected: &'static str,
        actual: String,
    },

    /// Array element index past the end of the array
    #[error("Index {index} is out of range for '{name}' ({len} items)")]
    IndexOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },

    /// Text entered into a numeric field that does not parse
    #[error("'{input}' is not a valid number for '{name}'")]
    InvalidNumber { name: String, input: String },
}
