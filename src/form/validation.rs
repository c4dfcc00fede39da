//! Form validation engine
//!
//! Validation runs over every declared property at once and records at most
//! one issue per field. For each field:
//!
//! 1. a required field that is absent, `null` or `""` gets [`ValidationIssue::Required`];
//! 2. an optional field that is absent, `null` or `""` is skipped;
//! 3. a present value is type-checked, then checked against the constraints of
//!    its type. When several constraints fail, the last one checked is kept.
//!
//! `0`, `false` and `[]` are present values.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

use super::value::FormData;
use crate::schema::{ArrayRules, JsonSchema, NumericRules, PropertyKind, StringFormat, StringRules};

static EMAIL_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static URI_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^(https?|ftp)://[^\s/$.?#].[^\s]*$").expect("valid uri regex")
});

// ============================================================================
// Issues
// ============================================================================

/// Why a field failed validation; `Display` is the message shown under the field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("This field is required")]
    Required,

    /// Value present but not of the declared type
    #[error("Must be {expected}")]
    TypeMismatch { expected: &'static str },

    /// Value of the right type but outside its declared bounds
    #[error("{0}")]
    Constraint(ConstraintViolation),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintViolation {
    #[error("Must be at least {0} characters")]
    MinLength(u64),

    #[error("Must be at most {0} characters")]
    MaxLength(u64),

    #[error("Must match pattern: {0}")]
    Pattern(String),

    #[error("Invalid email format")]
    Email,

    #[error("Invalid URL format")]
    Uri,

    #[error("Must be at least {0}")]
    Minimum(f64),

    #[error("Must be at most {0}")]
    Maximum(f64),

    #[error("Must be an integer")]
    NotInteger,

    #[error("Must have at least {0} items")]
    MinItems(u64),

    #[error("Must have at most {0} items")]
    MaxItems(u64),
}

// ============================================================================
// Field Errors
// ============================================================================

/// Field name -> issue. A field with no entry is valid or not yet validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    issues: BTreeMap<String, ValidationIssue>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ValidationIssue> {
        self.issues.get(name)
    }

    /// Message for a field, if it has an issue
    pub fn message(&self, name: &str) -> Option<String> {
        self.issues.get(name).map(ToString::to_string)
    }

    /// Record an issue, replacing any earlier one for the same field
    pub fn insert(&mut self, name: impl Into<String>, issue: ValidationIssue) {
        self.issues.insert(name.into(), issue);
    }

    pub fn remove(&mut self, name: &str) -> Option<ValidationIssue> {
        self.issues.remove(name)
    }

    /// Drop every entry whose field name fails `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.issues.retain(|name, _| keep(name));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationIssue)> {
        self.issues.iter().map(|(name, issue)| (name.as_str(), issue))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.issues.len()))?;
        for (name, issue) in &self.issues {
            map.serialize_entry(name, &issue.to_string())?;
        }
        map.end()
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate every declared property of `schema` against `data`
pub fn validate(schema: &JsonSchema, data: &FormData) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for (name, property) in schema.properties() {
        let value = match data.get(name) {
            Some(value) if !is_missing(value) => value,
            _ => {
                if schema.is_required(name) {
                    errors.insert(name, ValidationIssue::Required);
                }
                continue;
            }
        };

        if let Some(issue) = check_value(&property.kind, value) {
            errors.insert(name, issue);
        }
    }

    debug!(
        "Validated {} fields, {} invalid",
        schema.properties.len(),
        errors.len()
    );
    errors
}

/// `null` and `""` count as missing
fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn check_value(kind: &PropertyKind, value: &Value) -> Option<ValidationIssue> {
    match kind {
        PropertyKind::String(rules) => check_string(rules, value),
        PropertyKind::Number(rules) => check_number(rules, value, false),
        PropertyKind::Integer(rules) => check_number(rules, value, true),
        PropertyKind::Boolean => (!value.is_boolean()).then_some(ValidationIssue::TypeMismatch {
            expected: "a boolean",
        }),
        PropertyKind::Array(rules) => check_array(rules, value),
        PropertyKind::Object | PropertyKind::Unsupported { .. } => None,
    }
}

fn check_string(rules: &StringRules, value: &Value) -> Option<ValidationIssue> {
    let Some(text) = value.as_str() else {
        return Some(ValidationIssue::TypeMismatch { expected: "a string" });
    };

    // UTF-16 code units, the unit browsers use for input length
    let length = text.encode_utf16().count() as u64;
    let mut violation = None;

    if let Some(min) = rules.min_length {
        if length < min {
            violation = Some(ConstraintViolation::MinLength(min));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max {
            violation = Some(ConstraintViolation::MaxLength(max));
        }
    }
    if let Some(pattern) = &rules.pattern {
        if !pattern.is_match(text) {
            violation = Some(ConstraintViolation::Pattern(pattern.as_str().to_string()));
        }
    }
    match rules.format {
        Some(StringFormat::Email) if !EMAIL_RE.is_match(text) => {
            violation = Some(ConstraintViolation::Email);
        }
        Some(StringFormat::Uri) if !URI_RE.is_match(text) => {
            violation = Some(ConstraintViolation::Uri);
        }
        _ => {}
    }

    violation.map(ValidationIssue::Constraint)
}

fn check_number(rules: &NumericRules, value: &Value, integer: bool) -> Option<ValidationIssue> {
    let Some(number) = value.as_f64() else {
        return Some(ValidationIssue::TypeMismatch { expected: "a number" });
    };

    let mut violation = None;

    if let Some(min) = rules.minimum {
        if number < min {
            violation = Some(ConstraintViolation::Minimum(min));
        }
    }
    if let Some(max) = rules.maximum {
        if number > max {
            violation = Some(ConstraintViolation::Maximum(max));
        }
    }
    if integer && !(number.is_finite() && number.fract() == 0.0) {
        violation = Some(ConstraintViolation::NotInteger);
    }

    violation.map(ValidationIssue::Constraint)
}

fn check_array(rules: &ArrayRules, value: &Value) -> Option<ValidationIssue> {
    let Some(items) = value.as_array() else {
        return Some(ValidationIssue::TypeMismatch { expected: "an array" });
    };

    let count = items.len() as u64;
    let mut violation = None;

    if let Some(min) = rules.min_items {
        if count < min {
            violation = Some(ConstraintViolation::MinItems(min));
        }
    }
    if let Some(max) = rules.max_items {
        if count > max {
            violation = Some(ConstraintViolation::MaxItems(max));
        }
    }

    violation.map(ValidationIssue::Constraint)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> JsonSchema {
        JsonSchema::from_value(&value).unwrap()
    }

    fn data(value: Value) -> FormData {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_required_sentinels() {
        let schema = schema(json!({
            "properties": {
                "a": { "type": "string" },
                "b": { "type": "number" },
                "c": { "type": "string" }
            },
            "required": ["a", "b", "c"]
        }));

        let errors = validate(&schema, &data(json!({ "a": "", "b": null })));
        assert_eq!(errors.len(), 3);
        for name in ["a", "b", "c"] {
            assert_eq!(errors.message(name).as_deref(), Some("This field is required"));
        }
    }

    #[test]
    fn test_zero_false_and_empty_array_are_present() {
        let schema = schema(json!({
            "properties": {
                "n": { "type": "integer" },
                "b": { "type": "boolean" },
                "l": { "type": "array" }
            },
            "required": ["n", "b", "l"]
        }));

        let errors = validate(&schema, &data(json!({ "n": 0, "b": false, "l": [] })));
        assert!(errors.is_valid());
    }

    #[test]
    fn test_empty_optional_field_skips_constraints() {
        let schema = schema(json!({
            "properties": {
                "code": { "type": "string", "minLength": 3, "pattern": "^[A-Z]+$" }
            }
        }));

        assert!(validate(&schema, &data(json!({ "code": "" }))).is_valid());
        assert!(validate(&schema, &FormData::new()).is_valid());
    }

    #[test]
    fn test_type_mismatches() {
        let schema = schema(json!({
            "properties": {
                "s": { "type": "string" },
                "n": { "type": "number" },
                "b": { "type": "boolean" },
                "l": { "type": "array" }
            }
        }));

        let errors = validate(
            &schema,
            &data(json!({ "s": 5, "n": "5", "b": "yes", "l": "a,b" })),
        );
        assert_eq!(errors.message("s").as_deref(), Some("Must be a string"));
        assert_eq!(errors.message("n").as_deref(), Some("Must be a number"));
        assert_eq!(errors.message("b").as_deref(), Some("Must be a boolean"));
        assert_eq!(errors.message("l").as_deref(), Some("Must be an array"));
    }

    #[test]
    fn test_last_failing_string_check_wins() {
        let schema = schema(json!({
            "properties": {
                "code": { "type": "string", "minLength": 5, "pattern": "^[A-Z]+$" }
            }
        }));

        let errors = validate(&schema, &data(json!({ "code": "ab" })));
        assert_eq!(
            errors.get("code"),
            Some(&ValidationIssue::Constraint(ConstraintViolation::Pattern(
                "^[A-Z]+$".to_string()
            )))
        );
    }

    #[test]
    fn test_string_lengths() {
        let schema = schema(json!({
            "properties": { "s": { "type": "string", "minLength": 2, "maxLength": 3 } }
        }));

        assert_eq!(
            validate(&schema, &data(json!({ "s": "a" }))).message("s").as_deref(),
            Some("Must be at least 2 characters")
        );
        assert_eq!(
            validate(&schema, &data(json!({ "s": "abcd" }))).message("s").as_deref(),
            Some("Must be at most 3 characters")
        );
        assert!(validate(&schema, &data(json!({ "s": "héé" }))).is_valid());
    }

    #[test]
    fn test_astral_characters_count_as_two_units() {
        let schema = schema(json!({
            "properties": { "s": { "type": "string", "maxLength": 1 } }
        }));

        assert_eq!(
            validate(&schema, &data(json!({ "s": "😀" }))).message("s").as_deref(),
            Some("Must be at most 1 characters")
        );
        assert!(validate(&schema, &data(json!({ "s": "é" }))).is_valid());
    }

    #[test]
    fn test_email_and_uri_formats() {
        let schema = schema(json!({
            "properties": {
                "email": { "type": "string", "format": "email" },
                "site": { "type": "string", "format": "uri" }
            }
        }));

        let errors = validate(
            &schema,
            &data(json!({ "email": "not-an-email", "site": "example.com" })),
        );
        assert_eq!(errors.message("email").as_deref(), Some("Invalid email format"));
        assert_eq!(errors.message("site").as_deref(), Some("Invalid URL format"));

        let errors = validate(
            &schema,
            &data(json!({ "email": "a@b.com", "site": "https://example.com/x" })),
        );
        assert!(errors.is_valid());
    }

    #[test]
    fn test_numeric_bounds_and_integers() {
        let schema = schema(json!({
            "properties": {
                "age": { "type": "integer", "minimum": 0, "maximum": 120 },
                "ratio": { "type": "number", "minimum": 0.5 }
            }
        }));

        let errors = validate(&schema, &data(json!({ "age": 150, "ratio": 0.25 })));
        assert_eq!(errors.message("age").as_deref(), Some("Must be at most 120"));
        assert_eq!(errors.message("ratio").as_deref(), Some("Must be at least 0.5"));

        let errors = validate(&schema, &data(json!({ "age": 2.5 })));
        assert_eq!(errors.message("age").as_deref(), Some("Must be an integer"));

        assert!(validate(&schema, &data(json!({ "age": 3.0 }))).is_valid());
    }

    #[test]
    fn test_array_cardinality() {
        let schema = schema(json!({
            "properties": { "tags": { "type": "array", "minItems": 1, "maxItems": 2 } }
        }));

        assert_eq!(
            validate(&schema, &data(json!({ "tags": [] }))).message("tags").as_deref(),
            Some("Must have at least 1 items")
        );
        assert_eq!(
            validate(&schema, &data(json!({ "tags": ["a", "b", "c"] })))
                .message("tags")
                .as_deref(),
            Some("Must have at most 2 items")
        );
    }

    #[test]
    fn test_objects_and_unknown_types_only_get_required_check() {
        let schema = schema(json!({
            "properties": {
                "meta": { "type": "object" },
                "when": { "type": "date" }
            },
            "required": ["when"]
        }));

        let errors = validate(&schema, &data(json!({ "meta": "not an object" })));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("when"), Some(&ValidationIssue::Required));
    }

    #[test]
    fn test_field_errors_serialize_as_messages() {
        let mut errors = FieldErrors::new();
        errors.insert("email", ValidationIssue::Required);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "email": "This field is required" })
        );
    }
}
