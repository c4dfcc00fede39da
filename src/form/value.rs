//! Field values

use serde_json::{Map, Number, Value};

use crate::schema::ItemType;

/// Current value of every field, keyed by field name
pub type FormData = Map<String, Value>;

/// One element of an array field
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayItem {
    Text(String),
    /// `None` is an empty numeric entry, stored as `null`
    Number(Option<f64>),
    Boolean(bool),
    /// Anything else, kept as-is
    Opaque(Value),
}

impl ArrayItem {
    /// Interpret text typed into an element input according to the item type
    pub fn from_input(item_type: &ItemType, raw: &str) -> Self {
        match item_type {
            ItemType::Number | ItemType::Integer => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    ArrayItem::Number(None)
                } else {
                    match trimmed.parse::<f64>() {
                        Ok(n) if n.is_finite() => ArrayItem::Number(Some(n)),
                        _ => ArrayItem::Text(raw.to_string()),
                    }
                }
            }
            ItemType::Boolean => match raw.trim() {
                "true" => ArrayItem::Boolean(true),
                "false" => ArrayItem::Boolean(false),
                _ => ArrayItem::Text(raw.to_string()),
            },
            _ => ArrayItem::Text(raw.to_string()),
        }
    }

    /// Text shown in the element's single-line input
    pub fn display_text(&self) -> String {
        match self {
            ArrayItem::Text(s) => s.clone(),
            ArrayItem::Number(Some(n)) => n.to_string(),
            ArrayItem::Number(None) => String::new(),
            ArrayItem::Boolean(b) => b.to_string(),
            ArrayItem::Opaque(Value::Null) => String::new(),
            ArrayItem::Opaque(other) => other.to_string(),
        }
    }
}

impl From<ArrayItem> for Value {
    fn from(item: ArrayItem) -> Self {
        match item {
            ArrayItem::Text(s) => Value::String(s),
            ArrayItem::Number(Some(n)) => number_value(n),
            ArrayItem::Number(None) => Value::Null,
            ArrayItem::Boolean(b) => Value::Bool(b),
            ArrayItem::Opaque(v) => v,
        }
    }
}

impl From<&Value> for ArrayItem {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => ArrayItem::Text(s.clone()),
            Value::Number(n) => ArrayItem::Number(n.as_f64()),
            Value::Bool(b) => ArrayItem::Boolean(*b),
            other => ArrayItem::Opaque(other.clone()),
        }
    }
}

/// Element appended by "add item" for the given item type
pub fn empty_item(item_type: &ItemType) -> ArrayItem {
    match item_type {
        ItemType::String => ArrayItem::Text(String::new()),
        ItemType::Number | ItemType::Integer => ArrayItem::Number(None),
        ItemType::Boolean => ArrayItem::Boolean(false),
        ItemType::Array => ArrayItem::Opaque(Value::Array(Vec::new())),
        ItemType::Object => ArrayItem::Opaque(Value::Object(Map::new())),
        ItemType::Other(_) => ArrayItem::Opaque(Value::Null),
    }
}

/// JSON number for `n`, integral when `n` has no fractional part
pub(crate) fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}
