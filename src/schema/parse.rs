//! JSON Schema parsing
//!
//! Turns a `serde_json::Value` into a typed [`JsonSchema`]. Property-level
//! `$ref`s pointing at `#/definitions/*` or `#/$defs/*` are inlined here;
//! named references across schemas are handled by the schema library.

use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

use super::{
    ArrayRules, ItemType, JsonSchema, NumericRules, Pattern, PropertyKind, SchemaError,
    SchemaProperty, StringFormat, StringRules,
};

// ============================================================================
// Parse Context
// ============================================================================

/// Local definitions available to property `$ref`s
#[derive(Default)]
struct ParseContext {
    definitions: HashMap<String, Value>,
    visiting: HashSet<String>,
}

impl ParseContext {
    fn from_schema(schema: &Map<String, Value>) -> Self {
        let mut ctx = Self::default();

        if let Some(defs) = schema.get("definitions").or_else(|| schema.get("$defs")) {
            if let Some(defs_obj) = defs.as_object() {
                for (name, def) in defs_obj {
                    ctx.definitions.insert(name.clone(), def.clone());
                }
            }
        }

        ctx
    }
}

// ============================================================================
// Schema Parsing
// ============================================================================

/// Parse a top-level schema document
pub fn parse_schema(schema: &Value) -> Result<JsonSchema, SchemaError> {
    let obj = schema.as_object().ok_or(SchemaError::NotAnObject)?;
    let mut ctx = ParseContext::from_schema(obj);

    let properties = match obj.get("properties") {
        None => Vec::new(),
        Some(Value::Object(props)) => props
            .iter()
            .map(|(name, prop)| Ok((name.clone(), parse_property(name, prop, &mut ctx)?)))
            .collect::<Result<Vec<_>, SchemaError>>()?,
        Some(_) => {
            return Err(SchemaError::InvalidField {
                field: "properties".to_string(),
                reason: "expected an object".to_string(),
            })
        }
    };

    let required = match obj.get("required") {
        None => BTreeSet::new(),
        Some(Value::Array(names)) => names
            .iter()
            .map(|name| {
                name.as_str().map(String::from).ok_or_else(|| SchemaError::InvalidField {
                    field: "required".to_string(),
                    reason: format!("expected field names, found {}", name),
                })
            })
            .collect::<Result<BTreeSet<_>, _>>()?,
        Some(_) => {
            return Err(SchemaError::InvalidField {
                field: "required".to_string(),
                reason: "expected an array of field names".to_string(),
            })
        }
    };

    for name in &required {
        if !properties.iter().any(|(prop_name, _)| prop_name == name) {
            debug!("Required field '{}' has no property descriptor", name);
        }
    }

    Ok(JsonSchema {
        properties,
        required,
        description: get_string(obj, "description"),
    })
}

/// Parse one property descriptor
fn parse_property(
    name: &str,
    value: &Value,
    ctx: &mut ParseContext,
) -> Result<SchemaProperty, SchemaError> {
    let obj = value.as_object().ok_or_else(|| SchemaError::InvalidProperty {
        name: name.to_string(),
        reason: "expected an object".to_string(),
    })?;

    if let Some(ref_value) = obj.get("$ref").and_then(|v| v.as_str()) {
        return parse_ref(name, ref_value, ctx);
    }

    let type_name = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| SchemaError::MissingType {
            name: name.to_string(),
        })?;

    let kind = match type_name {
        "string" => PropertyKind::String(parse_string_rules(name, obj)?),
        "number" => PropertyKind::Number(parse_numeric_rules(obj)),
        "integer" => PropertyKind::Integer(parse_numeric_rules(obj)),
        "boolean" => PropertyKind::Boolean,
        "array" => PropertyKind::Array(parse_array_rules(obj)),
        "object" => PropertyKind::Object,
        other => {
            debug!("Property '{}' has unsupported type '{}'", name, other);
            PropertyKind::Unsupported {
                type_name: other.to_string(),
            }
        }
    };

    Ok(SchemaProperty {
        kind,
        description: get_string(obj, "description"),
        default: obj.get("default").cloned(),
    })
}

/// Inline a local `$ref`
fn parse_ref(
    name: &str,
    ref_value: &str,
    ctx: &mut ParseContext,
) -> Result<SchemaProperty, SchemaError> {
    let def_name = ref_value
        .strip_prefix("#/definitions/")
        .or_else(|| ref_value.strip_prefix("#/$defs/"))
        .ok_or_else(|| SchemaError::UnresolvedRef(ref_value.to_string()))?;

    let definition = ctx
        .definitions
        .get(def_name)
        .cloned()
        .ok_or_else(|| SchemaError::UnresolvedRef(ref_value.to_string()))?;

    if !ctx.visiting.insert(ref_value.to_string()) {
        return Err(SchemaError::CyclicRef(ref_value.to_string()));
    }
    let result = parse_property(name, &definition, ctx);
    ctx.visiting.remove(ref_value);
    result
}

fn parse_string_rules(name: &str, obj: &Map<String, Value>) -> Result<StringRules, SchemaError> {
    let pattern = match obj.get("pattern").and_then(|v| v.as_str()) {
        Some(source) => Some(Pattern::new(source).map_err(|source| {
            SchemaError::InvalidPattern {
                name: name.to_string(),
                source,
            }
        })?),
        None => None,
    };

    let choices = obj.get("enum").and_then(|v| v.as_array()).map(|arr| {
        arr.iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    });

    Ok(StringRules {
        format: obj
            .get("format")
            .and_then(|v| v.as_str())
            .map(StringFormat::parse),
        choices,
        min_length: obj.get("minLength").and_then(|v| v.as_u64()),
        max_length: obj.get("maxLength").and_then(|v| v.as_u64()),
        pattern,
    })
}

fn parse_numeric_rules(obj: &Map<String, Value>) -> NumericRules {
    NumericRules {
        minimum: obj.get("minimum").and_then(|v| v.as_f64()),
        maximum: obj.get("maximum").and_then(|v| v.as_f64()),
    }
}

fn parse_array_rules(obj: &Map<String, Value>) -> ArrayRules {
    let items = obj
        .get("items")
        .and_then(|items| items.get("type"))
        .and_then(|v| v.as_str())
        .map(ItemType::parse)
        .unwrap_or_default();

    ArrayRules {
        items,
        min_items: obj.get("minItems").and_then(|v| v.as_u64()),
        max_items: obj.get("maxItems").and_then(|v| v.as_u64()),
    }
}

fn get_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(|v| v.as_str()).map(String::from)
}

// ============================================================================
// Tests
// ============================================================================
