//! Core types for schema-driven forms
//!
//! A [`JsonSchema`] is an ordered list of named [`SchemaProperty`] entries plus
//! the set of required names. Each property carries a [`PropertyKind`] keyed on
//! its JSON `type`, holding only the constraints that apply to that type.

pub mod error;
pub mod library;
pub mod parse;

use fancy_regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

pub use error::SchemaError;
pub use library::{load_value, SchemaDefinition, SchemaLibrary};

// ============================================================================
// Top-level Schema
// ============================================================================

/// Top-level form descriptor
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonSchema {
    /// Field name -> descriptor, in display order
    pub properties: Vec<(String, SchemaProperty)>,
    /// Names of fields that must be non-empty
    pub required: BTreeSet<String>,
    /// Free-form description of the whole schema
    pub description: Option<String>,
}

impl JsonSchema {
    /// Parse a schema from a JSON value
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        parse::parse_schema(value)
    }

    /// Parse a schema from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties
            .iter()
            .find(|(prop_name, _)| prop_name == name)
            .map(|(_, prop)| prop)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Iterate properties in display order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &SchemaProperty)> {
        self.properties
            .iter()
            .map(|(name, prop)| (name.as_str(), prop))
    }
}

// ============================================================================
// Property Descriptor
// ============================================================================

/// Descriptor for a single field
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaProperty {
    pub kind: PropertyKind,
    /// Human-readable hint, display only
    pub description: Option<String>,
    /// Value used to seed the field when no initial value is supplied
    pub default: Option<Value>,
}

impl SchemaProperty {
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            description: None,
            default: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

/// Type of a property, with the constraints meaningful for that type
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyKind {
    String(StringRules),
    Number(NumericRules),
    Integer(NumericRules),
    Boolean,
    Array(ArrayRules),
    /// Nested objects are shown as a placeholder and never edited
    Object,
    /// Any other `type`; rendered as nothing
    Unsupported { type_name: String },
}

impl PropertyKind {
    /// Get the type name as written in the schema
    pub fn type_name(&self) -> &str {
        match self {
            PropertyKind::String(_) => "string",
            PropertyKind::Number(_) => "number",
            PropertyKind::Integer(_) => "integer",
            PropertyKind::Boolean => "boolean",
            PropertyKind::Array(_) => "array",
            PropertyKind::Object => "object",
            PropertyKind::Unsupported { type_name } => type_name,
        }
    }

    /// Value a field of this type holds before anything is entered
    pub fn empty_value(&self) -> Value {
        match self {
            PropertyKind::String(_) => Value::String(String::new()),
            PropertyKind::Number(_) | PropertyKind::Integer(_) => Value::Null,
            PropertyKind::Boolean => Value::Bool(false),
            PropertyKind::Array(_) => Value::Array(Vec::new()),
            PropertyKind::Object => Value::Object(serde_json::Map::new()),
            PropertyKind::Unsupported { .. } => Value::Null,
        }
    }
}

/// Constraints for `string` fields
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StringRules {
    pub format: Option<StringFormat>,
    /// Closed set of choices (`enum`)
    pub choices: Option<Vec<String>>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<Pattern>,
}

/// Constraints for `number` and `integer` fields
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumericRules {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

/// Constraints for `array` fields
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArrayRules {
    /// Element type, `string` when the schema leaves it out
    pub items: ItemType,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}

// ============================================================================
// Refinements
// ============================================================================

/// Refinement of a `string` field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StringFormat {
    Email,
    Uri,
    Textarea,
    Other(String),
}

impl StringFormat {
    pub fn parse(format: &str) -> Self {
        match format {
            "email" => StringFormat::Email,
            "uri" => StringFormat::Uri,
            "textarea" => StringFormat::Textarea,
            other => StringFormat::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StringFormat::Email => "email",
            StringFormat::Uri => "uri",
            StringFormat::Textarea => "textarea",
            StringFormat::Other(other) => other,
        }
    }
}

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element type of an `array` field (only `items.type` is consulted)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ItemType {
    #[default]
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Other(String),
}

impl ItemType {
    pub fn parse(type_name: &str) -> Self {
        match type_name {
            "string" => ItemType::String,
            "number" => ItemType::Number,
            "integer" => ItemType::Integer,
            "boolean" => ItemType::Boolean,
            "array" => ItemType::Array,
            "object" => ItemType::Object,
            other => ItemType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ItemType::String => "string",
            ItemType::Number => "number",
            ItemType::Integer => "integer",
            ItemType::Boolean => "boolean",
            ItemType::Array => "array",
            ItemType::Object => "object",
            ItemType::Other(other) => other,
        }
    }
}

/// A `pattern` constraint, compiled when the schema is parsed
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, fancy_regex::Error> {
        Ok(Self {
            source: source.to_string(),
            regex: Regex::new(source)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Unanchored search, matching anywhere in the value.
    ///
    /// A search that exceeds the backtracking limit counts as a mismatch.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value).unwrap_or(false)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

// ============================================================================
// Tests
// ============================================================================
