//! Schema loading error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, parsing or resolving a schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema document is not a JSON object
    #[error("Schema must be a JSON object")]
    NotAnObject,

    /// A top-level key has the wrong shape
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// A property descriptor has the wrong shape
    #[error("Invalid property '{name}': {reason}")]
    InvalidProperty { name: String, reason: String },

    /// A property descriptor has no `type`
    #[error("Property '{name}' is missing a type")]
    MissingType { name: String },

    /// A `pattern` that does not compile
    #[error("Property '{name}' has an invalid pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: fancy_regex::Error,
    },

    /// `$ref` to a schema the library does not know
    #[error("Schema reference '{0}' not found")]
    UnresolvedRef(String),

    /// `$ref` chain that points back to itself
    #[error("Schema reference '{0}' is cyclic")]
    CyclicRef(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),
}
