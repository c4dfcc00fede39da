//! Read-only schema summaries
//!
//! [`SchemaSummary`] lists a schema's fields for inspection without editing.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::schema::{JsonSchema, PropertyKind, SchemaProperty};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertySummary {
    pub name: String,
    pub type_name: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
}

impl PropertySummary {
    pub fn new(name: &str, property: &SchemaProperty, required: bool) -> Self {
        let format = match &property.kind {
            PropertyKind::String(rules) => rules.format.as_ref().map(ToString::to_string),
            _ => None,
        };

        Self {
            name: name.to_string(),
            type_name: property.type_name().to_string(),
            required,
            description: property.description.clone(),
            format,
            default: property.default.clone(),
            constraints: constraints(&property.kind),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SchemaSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: Vec<PropertySummary>,
}

impl SchemaSummary {
    pub fn from_schema(schema: &JsonSchema) -> Self {
        Self {
            description: schema.description.clone(),
            properties: schema
                .properties()
                .map(|(name, property)| {
                    PropertySummary::new(name, property, schema.is_required(name))
                })
                .collect(),
        }
    }

    pub fn required_count(&self) -> usize {
        self.properties.iter().filter(|p| p.required).count()
    }
}

/// Human-readable constraint list, e.g. `["min length 3", "one of: a, b"]`
fn constraints(kind: &PropertyKind) -> Vec<String> {
    let mut out = Vec::new();

    match kind {
        PropertyKind::String(rules) => {
            if let Some(choices) = &rules.choices {
                out.push(format!("one of: {}", choices.join(", ")));
            }
            if let Some(min) = rules.min_length {
                out.push(format!("min length {min}"));
            }
            if let Some(max) = rules.max_length {
                out.push(format!("max length {max}"));
            }
            if let Some(pattern) = &rules.pattern {
                out.push(format!("pattern {pattern}"));
            }
        }
        PropertyKind::Number(rules) | PropertyKind::Integer(rules) => {
            if let Some(min) = rules.minimum {
                out.push(format!("minimum {min}"));
            }
            if let Some(max) = rules.maximum {
                out.push(format!("maximum {max}"));
            }
        }
        PropertyKind::Array(rules) => {
            out.push(format!("items {}", rules.items.as_str()));
            if let Some(min) = rules.min_items {
                out.push(format!("min items {min}"));
            }
            if let Some(max) = rules.max_items {
                out.push(format!("max items {max}"));
            }
        }
        PropertyKind::Boolean | PropertyKind::Object | PropertyKind::Unsupported { .. } => {}
    }

    out
}

// ============================================================================
// Text Table
// ============================================================================

const HEADERS: [&str; 5] = ["NAME", "TYPE", "REQUIRED", "CONSTRAINTS", "DESCRIPTION"];

impl fmt::Display for SchemaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(description) = &self.description {
            writeln!(f, "{description}")?;
            writeln!(f)?;
        }

        let rows: Vec<[String; 5]> = self
            .properties
            .iter()
            .map(|p| {
                let type_name = match &p.format {
                    Some(format) => format!("{} ({format})", p.type_name),
                    None => p.type_name.clone(),
                };
                [
                    p.name.clone(),
                    type_name,
                    if p.required { "yes" } else { "no" }.to_string(),
                    p.constraints.join("; "),
                    p.description.clone().unwrap_or_default(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(f, &HEADERS.map(String::from), &widths)?;
        for row in &rows {
            write_row(f, row, &widths)?;
        }
        writeln!(
            f,
            "\n{} fields, {} required",
            self.properties.len(),
            self.required_count()
        )
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String; 5], widths: &[usize; 5]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary() -> SchemaSummary {
        let schema = JsonSchema::from_value(&json!({
            "description": "Signup",
            "properties": {
                "email": { "type": "string", "format": "email", "description": "Contact" },
                "plan": { "type": "string", "enum": ["free", "pro"], "default": "free" },
                "seats": { "type": "integer", "minimum": 1, "maximum": 50 },
                "tags": { "type": "array", "maxItems": 3 }
            },
            "required": ["email"]
        }))
        .unwrap();
        SchemaSummary::from_schema(&schema)
    }

    #[test]
    fn test_rows_follow_declaration_order() {
        let summary = summary();
        let names: Vec<_> = summary.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["email", "plan", "seats", "tags"]);
        assert_eq!(summary.required_count(), 1);
    }

    #[test]
    fn test_constraint_strings() {
        let summary = summary();
        assert_eq!(summary.properties[0].format.as_deref(), Some("email"));
        assert_eq!(summary.properties[1].constraints, vec!["one of: free, pro"]);
        assert_eq!(
            summary.properties[2].constraints,
            vec!["minimum 1", "maximum 50"]
        );
        assert_eq!(
            summary.properties[3].constraints,
            vec!["items string", "max items 3"]
        );
    }

    #[test]
    fn test_table_output() {
        let text = summary().to_string();
        assert!(text.starts_with("Signup\n\nNAME"));
        assert!(text.contains("email (email)"));
        assert!(text.ends_with("\n4 fields, 1 required\n"));
    }

    #[test]
    fn test_json_output_skips_empty_parts() {
        let value = serde_json::to_value(summary()).unwrap();
        assert_eq!(
            value["properties"][0],
            json!({
                "name": "email",
                "type_name": "string",
                "required": true,
                "description": "Contact",
                "format": "email"
            })
        );
        assert_eq!(value["properties"][1]["default"], json!("free"));
    }
}
