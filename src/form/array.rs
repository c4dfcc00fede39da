//! Array field mutation helpers
//!
//! Each helper builds a fresh `Vec` from the field's current elements and
//! assigns it back under the field name; the previous array is never edited
//! in place. A field whose current value is not an array counts as empty.

use serde_json::Value;

use super::error::FormError;
use super::value::{empty_item, ArrayItem, FormData};
use crate::schema::ItemType;

fn current_items(data: &FormData, name: &str) -> Vec<Value> {
    data.get(name)
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
}

/// Replace the element at `index`
pub fn replace_item(
    data: &mut FormData,
    name: &str,
    index: usize,
    item: ArrayItem,
) -> Result<(), FormError> {
    let mut items = current_items(data, name);
    let len = items.len();
    let slot = items.get_mut(index).ok_or_else(|| FormError::IndexOutOfRange {
        name: name.to_string(),
        index,
        len,
    })?;
    *slot = item.into();
    data.insert(name.to_string(), Value::Array(items));
    Ok(())
}

/// Append the empty element for `item_type`
pub fn append_item(data: &mut FormData, name: &str, item_type: &ItemType) {
    let mut items = current_items(data, name);
    items.push(empty_item(item_type).into());
    data.insert(name.to_string(), Value::Array(items));
}

/// Remove the element at `index`, shifting later elements down
pub fn remove_item(data: &mut FormData, name: &str, index: usize) -> Result<(), FormError> {
    let mut items = current_items(data, name);
    if index >= items.len() {
        return Err(FormError::IndexOutOfRange {
            name: name.to_string(),
            index,
            len: items.len(),
        });
    }
    items.remove(index);
    data.insert(name.to_string(), Value::Array(items));
    Ok(())
}
