//! Field rendering dispatch
//!
//! Turns schema properties and their current values into a toolkit-neutral
//! view model. The Leptos components and the CLI text renderer both draw
//! from [`FormView`] / [`FieldView`] / [`Control`].

mod text;

use serde::Serialize;
use serde_json::Value;

use crate::form::{ArrayItem, SchemaForm, ValidationIssue};
use crate::schema::{ItemType, PropertyKind, SchemaProperty, StringFormat, StringRules};

/// Text shown in place of a nested object field
pub const OBJECT_PLACEHOLDER: &str = "Nested objects are not supported in this form";

// ============================================================================
// View Model
// ============================================================================

/// Single-line input flavour for plain string fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Email,
    Url,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Url => "url",
        }
    }
}

/// Step attribute of a numeric input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberStep {
    /// Whole numbers only (`step = 1`)
    Integer,
    /// Unconstrained (`step = any`)
    Any,
}

impl NumberStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberStep::Integer => "1",
            NumberStep::Any => "any",
        }
    }
}

/// Input control chosen for a field
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    /// Closed-choice selector over the field's `enum` values
    Select {
        options: Vec<String>,
        selected: String,
    },
    TextArea {
        value: String,
    },
    TextInput {
        input_type: InputType,
        value: String,
    },
    /// `None` renders as an empty input
    NumberInput {
        value: Option<f64>,
        step: NumberStep,
        min: Option<f64>,
        max: Option<f64>,
    },
    Checkbox {
        checked: bool,
        echo: &'static str,
    },
    /// One single-line input per element, each removable, plus "add item"
    ArrayList {
        items: Vec<String>,
        item_type: String,
    },
    ObjectPlaceholder {
        message: &'static str,
    },
}

/// Everything drawn for one field
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldView {
    pub name: String,
    pub required: bool,
    pub type_badge: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Declared default, shown for information only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_hint: Option<Value>,
    pub control: Control,
}

/// Whole form: fields in declaration order, then the submit button if shown
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_button: Option<String>,
}

impl Control {
    /// The same control with its current value cleared
    pub fn without_value(&self) -> Control {
        match self {
            Control::Select { options, .. } => Control::Select {
                options: options.clone(),
                selected: String::new(),
            },
            Control::TextArea { .. } => Control::TextArea { value: String::new() },
            Control::TextInput { input_type, .. } => Control::TextInput {
                input_type: *input_type,
                value: String::new(),
            },
            Control::NumberInput { step, min, max, .. } => Control::NumberInput {
                value: None,
                step: *step,
                min: *min,
                max: *max,
            },
            Control::Checkbox { .. } => Control::Checkbox { checked: false, echo: "" },
            Control::ArrayList { item_type, .. } => Control::ArrayList {
                items: Vec::new(),
                item_type: item_type.clone(),
            },
            Control::ObjectPlaceholder { message } => Control::ObjectPlaceholder { message: *message },
        }
    }
}

impl FieldView {
    /// Everything the schema decides about this field, without its value or error.
    ///
    /// Two layouts are equal exactly when the field would be drawn the same
    /// way for the same data.
    pub fn layout(&self) -> FieldView {
        FieldView {
            error: None,
            control: self.control.without_value(),
            ..self.clone()
        }
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Build the view for one field.
///
/// Returns `None` for property types the form does not render.
pub fn render_field(
    name: &str,
    property: &SchemaProperty,
    required: bool,
    value: Option<&Value>,
    error: Option<&ValidationIssue>,
    textarea_threshold: u64,
) -> Option<FieldView> {
    let control = match &property.kind {
        PropertyKind::String(rules) => string_control(rules, value, textarea_threshold),
        PropertyKind::Number(rules) | PropertyKind::Integer(rules) => Control::NumberInput {
            value: value.and_then(Value::as_f64),
            step: if matches!(property.kind, PropertyKind::Integer(_)) {
                NumberStep::Integer
            } else {
                NumberStep::Any
            },
            min: rules.minimum,
            max: rules.maximum,
        },
        PropertyKind::Boolean => {
            let checked = value.and_then(Value::as_bool).unwrap_or(false);
            Control::Checkbox {
                checked,
                echo: if checked { "Yes" } else { "No" },
            }
        }
        PropertyKind::Array(rules) => array_control(&rules.items, value),
        PropertyKind::Object => Control::ObjectPlaceholder {
            message: OBJECT_PLACEHOLDER,
        },
        PropertyKind::Unsupported { .. } => return None,
    };

    Some(FieldView {
        name: name.to_string(),
        required,
        type_badge: property.type_name().to_string(),
        description: property.description.clone(),
        error: error.map(ToString::to_string),
        default_hint: property.default.clone(),
        control,
    })
}

/// Build the view for every renderable field of `form`
pub fn render_form(form: &SchemaForm) -> FormView {
    let fields = form
        .schema()
        .properties()
        .filter_map(|(name, _)| form.render_field(name))
        .collect();

    let options = form.options();
    FormView {
        fields,
        submit_button: options
            .show_submit_button
            .then(|| options.submit_button_text.clone()),
    }
}

fn string_control(rules: &StringRules, value: Option<&Value>, textarea_threshold: u64) -> Control {
    let text = text_value(value);

    if let Some(choices) = &rules.choices {
        return Control::Select {
            options: choices.clone(),
            selected: text,
        };
    }

    let long_text = rules.max_length.is_some_and(|max| max > textarea_threshold);
    if rules.format == Some(StringFormat::Textarea) || long_text {
        return Control::TextArea { value: text };
    }

    let input_type = match rules.format {
        Some(StringFormat::Email) => InputType::Email,
        Some(StringFormat::Uri) => InputType::Url,
        _ => InputType::Text,
    };
    Control::TextInput {
        input_type,
        value: text,
    }
}

fn array_control(item_type: &ItemType, value: Option<&Value>) -> Control {
    let items = value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| ArrayItem::from(item).display_text())
                .collect()
        })
        .unwrap_or_default();

    Control::ArrayList {
        items,
        item_type: item_type.as_str().to_string(),
    }
}

/// Current value as input text; `null` and absent values show as empty
fn text_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::JsonSchema;
    use serde_json::json;

    fn field(property: Value, value: Value) -> Option<FieldView> {
        let schema = JsonSchema::from_value(&json!({ "properties": { "f": property } })).unwrap();
        let (_, property) = schema.properties().next().unwrap();
        render_field("f", property, false, Some(&value), None, 100)
    }

    fn control(property: Value, value: Value) -> Control {
        field(property, value).unwrap().control
    }

    #[test]
    fn test_enum_wins_over_format() {
        let c = control(
            json!({ "type": "string", "enum": ["a", "b"], "format": "email" }),
            json!("b"),
        );
        assert_eq!(
            c,
            Control::Select {
                options: vec!["a".to_string(), "b".to_string()],
                selected: "b".to_string()
            }
        );
    }

    #[test]
    fn test_textarea_threshold() {
        assert!(matches!(
            control(json!({ "type": "string", "maxLength": 101 }), json!("")),
            Control::TextArea { .. }
        ));
        assert!(matches!(
            control(json!({ "type": "string", "maxLength": 100 }), json!("")),
            Control::TextInput { input_type: InputType::Text, .. }
        ));
        assert!(matches!(
            control(json!({ "type": "string", "format": "textarea" }), json!("")),
            Control::TextArea { .. }
        ));
    }

    #[test]
    fn test_input_types() {
        assert!(matches!(
            control(json!({ "type": "string", "format": "email" }), json!("")),
            Control::TextInput { input_type: InputType::Email, .. }
        ));
        assert!(matches!(
            control(json!({ "type": "string", "format": "uri" }), json!("")),
            Control::TextInput { input_type: InputType::Url, .. }
        ));
    }

    #[test]
    fn test_number_inputs() {
        assert_eq!(
            control(json!({ "type": "integer", "minimum": 1, "maximum": 9 }), Value::Null),
            Control::NumberInput {
                value: None,
                step: NumberStep::Integer,
                min: Some(1.0),
                max: Some(9.0)
            }
        );
        assert!(matches!(
            control(json!({ "type": "number" }), json!(0.5)),
            Control::NumberInput { value: Some(v), step: NumberStep::Any, .. } if v == 0.5
        ));
    }

    #[test]
    fn test_checkbox_echo() {
        assert_eq!(
            control(json!({ "type": "boolean" }), json!(true)),
            Control::Checkbox { checked: true, echo: "Yes" }
        );
        assert_eq!(
            control(json!({ "type": "boolean" }), json!(false)),
            Control::Checkbox { checked: false, echo: "No" }
        );
    }

    #[test]
    fn test_array_items_and_default_item_type() {
        assert_eq!(
            control(json!({ "type": "array" }), json!(["x", 2, null])),
            Control::ArrayList {
                items: vec!["x".to_string(), "2".to_string(), String::new()],
                item_type: "string".to_string()
            }
        );
    }

    #[test]
    fn test_object_and_unsupported() {
        assert!(matches!(
            control(json!({ "type": "object" }), json!({})),
            Control::ObjectPlaceholder { .. }
        ));
        assert!(field(json!({ "type": "date" }), Value::Null).is_none());
    }

    #[test]
    fn test_badges_and_default_hint() {
        let view = field(
            json!({ "type": "string", "description": "Your name", "default": "anon" }),
            json!("changed"),
        )
        .unwrap();

        assert_eq!(view.type_badge, "string");
        assert_eq!(view.description.as_deref(), Some("Your name"));
        assert_eq!(view.default_hint, Some(json!("anon")));
        assert!(!view.required);
    }

    #[test]
    fn test_layout_ignores_values_but_not_constraints() {
        let short = field(json!({ "type": "integer", "maximum": 5 }), json!(1)).unwrap();
        let edited = field(json!({ "type": "integer", "maximum": 5 }), json!(4)).unwrap();
        let tighter = field(json!({ "type": "integer", "maximum": 3 }), json!(1)).unwrap();
        assert_eq!(short.layout(), edited.layout());
        assert_ne!(short.layout(), tighter.layout());

        let plain = field(json!({ "type": "string" }), json!("a")).unwrap();
        let described =
            field(json!({ "type": "string", "description": "Name" }), json!("a")).unwrap();
        assert_ne!(plain.layout(), described.layout());

        let choice = field(json!({ "type": "string", "enum": ["a", "b"] }), json!("b")).unwrap();
        let more = field(json!({ "type": "string", "enum": ["a", "b", "c"] }), json!("b")).unwrap();
        assert_ne!(choice.layout(), more.layout());
    }

    #[test]
    fn test_control_serializes_with_tag() {
        let c = Control::Checkbox { checked: true, echo: "Yes" };
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({ "control": "checkbox", "checked": true, "echo": "Yes" })
        );
    }
}
