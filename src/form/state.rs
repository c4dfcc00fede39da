//! Editable form instance
//!
//! [`SchemaForm`] owns the schema, the current field values and the current
//! field errors. Every edit clears that field's error straight away and fires
//! `on_change`; errors are only recomputed, for all fields at once, by
//! [`SchemaForm::submit`].

use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

use super::array;
use super::error::FormError;
use super::seed::seed_form_data;
use super::validation::{validate, FieldErrors, ValidationIssue};
use super::value::{number_value, ArrayItem, FormData};
use crate::config::FormSettings;
use crate::render::{self, FieldView, FormView};
use crate::schema::{ArrayRules, JsonSchema, PropertyKind, SchemaProperty};

/// Caller-supplied handler receiving the current form data
pub type FormCallback = Box<dyn FnMut(&FormData)>;

// ============================================================================
// Options
// ============================================================================

/// Display configuration for a form
#[derive(Clone, Debug, PartialEq)]
pub struct FormOptions {
    pub submit_button_text: String,
    pub show_submit_button: bool,
    /// String fields with a `maxLength` above this render as multi-line inputs
    pub textarea_threshold: u64,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            submit_button_text: "Submit".to_string(),
            show_submit_button: true,
            textarea_threshold: 100,
        }
    }
}

impl From<&FormSettings> for FormOptions {
    fn from(settings: &FormSettings) -> Self {
        Self {
            submit_button_text: settings.submit_button_text.clone(),
            show_submit_button: settings.show_submit_button,
            textarea_threshold: settings.textarea_threshold,
        }
    }
}

/// Result of [`SchemaForm::submit`]
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed; carries the data handed to `on_submit`
    Submitted(FormData),
    /// Validation failed; nothing was submitted
    Rejected(FieldErrors),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

// ============================================================================
// Schema Form
// ============================================================================

pub struct SchemaForm {
    schema: JsonSchema,
    initial_values: Option<FormData>,
    data: FormData,
    errors: FieldErrors,
    options: FormOptions,
    on_submit: Option<FormCallback>,
    on_change: Option<FormCallback>,
}

impl SchemaForm {
    /// Create a form with every field seeded from its default or type-empty value
    pub fn new(schema: JsonSchema) -> Self {
        let data = seed_form_data(&schema, None, &FormData::new());
        Self {
            schema,
            initial_values: None,
            data,
            errors: FieldErrors::new(),
            options: FormOptions::default(),
            on_submit: None,
            on_change: None,
        }
    }

    pub fn with_initial_values(mut self, initial_values: FormData) -> Self {
        self.data = seed_form_data(&self.schema, Some(&initial_values), &self.data);
        self.initial_values = Some(initial_values);
        self
    }

    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    pub fn on_submit(mut self, callback: impl FnMut(&FormData) + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(&FormData) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn schema(&self) -> &JsonSchema {
        &self.schema
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&ValidationIssue> {
        self.errors.get(name)
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    // ------------------------------------------------------------------------
    // Seeding
    // ------------------------------------------------------------------------

    /// Re-seed after the schema or initial values changed.
    ///
    /// Does nothing and returns `false` when both equal what the form already
    /// holds. Otherwise merges the new seed into the current data, keeping
    /// in-progress edits for fields the new initial values do not mention.
    pub fn reseed(&mut self, schema: JsonSchema, initial_values: Option<FormData>) -> bool {
        if schema == self.schema && initial_values == self.initial_values {
            return false;
        }

        let data = seed_form_data(&schema, initial_values.as_ref(), &self.data);
        self.errors.retain(|name| schema.property(name).is_some());
        self.schema = schema;
        self.initial_values = initial_values;

        if data != self.data {
            self.data = data;
            self.notify_change();
        }
        true
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    /// Set any declared field to a raw value
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), FormError> {
        self.property(name)?;
        self.commit(name, value);
        Ok(())
    }

    /// Text typed into a string field
    pub fn set_text(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        match &self.property(name)?.kind {
            PropertyKind::String(_) => {}
            other => return Err(wrong_type(name, "string", other)),
        }
        self.commit(name, Value::String(raw.to_string()));
        Ok(())
    }

    /// Text typed into a number or integer field; blank input stores `null`
    pub fn set_number_input(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        match &self.property(name)?.kind {
            PropertyKind::Number(_) | PropertyKind::Integer(_) => {}
            other => return Err(wrong_type(name, "number or integer", other)),
        }

        let trimmed = raw.trim();
        let value = if trimmed.is_empty() {
            Value::Null
        } else {
            parse_number(trimmed).ok_or_else(|| FormError::InvalidNumber {
                name: name.to_string(),
                input: raw.to_string(),
            })?
        };
        self.commit(name, value);
        Ok(())
    }

    /// Checkbox toggled on a boolean field
    pub fn set_checked(&mut self, name: &str, checked: bool) -> Result<(), FormError> {
        match &self.property(name)?.kind {
            PropertyKind::Boolean => {}
            other => return Err(wrong_type(name, "boolean", other)),
        }
        self.commit(name, Value::Bool(checked));
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Array Editing
    // ------------------------------------------------------------------------

    pub fn set_array_item(
        &mut self,
        name: &str,
        index: usize,
        item: ArrayItem,
    ) -> Result<(), FormError> {
        self.array_rules(name)?;
        array::replace_item(&mut self.data, name, index, item)?;
        self.after_edit(name);
        Ok(())
    }

    /// Text typed into an element input, read according to the item type
    pub fn set_array_item_input(
        &mut self,
        name: &str,
        index: usize,
        raw: &str,
    ) -> Result<(), FormError> {
        let item = ArrayItem::from_input(&self.array_rules(name)?.items, raw);
        self.set_array_item(name, index, item)
    }

    /// Append the empty element for the field's item type
    pub fn add_array_item(&mut self, name: &str) -> Result<(), FormError> {
        let item_type = self.array_rules(name)?.items.clone();
        array::append_item(&mut self.data, name, &item_type);
        self.after_edit(name);
        Ok(())
    }

    pub fn remove_array_item(&mut self, name: &str, index: usize) -> Result<(), FormError> {
        self.array_rules(name)?;
        array::remove_item(&mut self.data, name, index)?;
        self.after_edit(name);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Submit
    // ------------------------------------------------------------------------

    /// Validate every field; on success hand the data to `on_submit`.
    ///
    /// The errors are replaced wholesale either way. Submitting again is
    /// always allowed.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.errors = validate(&self.schema, &self.data);

        if !self.errors.is_valid() {
            info!("Form rejected with {} invalid fields", self.errors.len());
            return SubmitOutcome::Rejected(self.errors.clone());
        }

        debug!("Form valid, submitting {} fields", self.data.len());
        if let Some(callback) = self.on_submit.as_mut() {
            callback(&self.data);
        }
        SubmitOutcome::Submitted(self.data.clone())
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// View model for the whole form
    pub fn render(&self) -> FormView {
        render::render_form(self)
    }

    /// View model for one field; `None` for unknown fields and unsupported types
    pub fn render_field(&self, name: &str) -> Option<FieldView> {
        let property = self.schema.property(name)?;
        render::render_field(
            name,
            property,
            self.schema.is_required(name),
            self.data.get(name),
            self.errors.get(name),
            self.options.textarea_threshold,
        )
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn property(&self, name: &str) -> Result<&SchemaProperty, FormError> {
        self.schema
            .property(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn array_rules(&self, name: &str) -> Result<&ArrayRules, FormError> {
        match &self.property(name)?.kind {
            PropertyKind::Array(rules) => Ok(rules),
            other => Err(wrong_type(name, "array", other)),
        }
    }

    fn commit(&mut self, name: &str, value: Value) {
        self.data.insert(name.to_string(), value);
        self.after_edit(name);
    }

    fn after_edit(&mut self, name: &str) {
        self.errors.remove(name);
        self.notify_change();
    }

    fn notify_change(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.data);
        }
    }
}

impl fmt::Debug for SchemaForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaForm")
            .field("schema", &self.schema)
            .field("data", &self.data)
            .field("errors", &self.errors)
            .field("options", &self.options)
            .field("on_submit", &self.on_submit.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

fn wrong_type(name: &str, expected: &'static str, actual: &PropertyKind) -> FormError {
    FormError::WrongFieldType {
        name: name.to_string(),
        expected,
        actual: actual.type_name().to_string(),
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Value::from(n));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(number_value)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn schema(value: Value) -> JsonSchema {
        JsonSchema::from_value(&value).unwrap()
    }

    fn profile_schema() -> JsonSchema {
        schema(json!({
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "integer", "minimum": 0 },
                "admin": { "type": "boolean" },
                "tags": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["name"]
        }))
    }

    #[test]
    fn test_blank_number_input_is_null() {
        let mut form = SchemaForm::new(profile_schema());
        form.set_number_input("age", "42").unwrap();
        assert_eq!(form.value("age"), Some(&json!(42)));

        form.set_number_input("age", "").unwrap();
        assert_eq!(form.value("age"), Some(&Value::Null));
    }

    #[test]
    fn test_invalid_number_input_is_rejected() {
        let mut form = SchemaForm::new(profile_schema());
        form.set_number_input("age", "7").unwrap();

        let err = form.set_number_input("age", "seven").unwrap_err();
        assert!(matches!(err, FormError::InvalidNumber { .. }));
        assert_eq!(form.value("age"), Some(&json!(7)));
    }

    #[test]
    fn test_edit_clears_field_error_before_revalidation() {
        let mut form = SchemaForm::new(profile_schema());
        form.set_number_input("age", "-1").unwrap();

        assert!(!form.submit().is_submitted());
        assert!(form.error("name").is_some());
        assert!(form.error("age").is_some());

        form.set_text("name", "x").unwrap();
        assert!(form.error("name").is_none());
        assert!(form.error("age").is_some());
    }

    #[test]
    fn test_on_change_sees_every_edit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut form = SchemaForm::new(profile_schema())
            .on_change(move |data| sink.borrow_mut().push(Value::Object(data.clone())));

        form.set_checked("admin", true).unwrap();
        form.add_array_item("tags").unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0]["admin"], json!(true));
        assert_eq!(seen[1]["tags"], json!([""]));
    }

    #[test]
    fn test_submit_invokes_callback_only_when_valid() {
        let submitted = Rc::new(RefCell::new(None));
        let sink = submitted.clone();
        let mut form = SchemaForm::new(profile_schema())
            .on_submit(move |data| *sink.borrow_mut() = Some(data.clone()));

        assert!(matches!(form.submit(), SubmitOutcome::Rejected(_)));
        assert!(submitted.borrow().is_none());

        form.set_text("name", "ada").unwrap();
        assert!(form.submit().is_submitted());
        assert_eq!(
            submitted.borrow().as_ref().map(|d| d["name"].clone()),
            Some(json!("ada"))
        );
        assert!(form.errors().is_valid());
    }

    #[test]
    fn test_undeclared_initial_values_are_not_seeded() {
        let mut initial = FormData::new();
        initial.insert("name".to_string(), json!("ada"));
        initial.insert("extra".to_string(), json!(1));
        let mut form = SchemaForm::new(profile_schema()).with_initial_values(initial);

        let SubmitOutcome::Submitted(out) = form.submit() else {
            panic!("expected submit");
        };
        assert!(!out.contains_key("extra"));
        assert_eq!(out["name"], json!("ada"));
    }

    #[test]
    fn test_wrong_field_type_edits() {
        let mut form = SchemaForm::new(profile_schema());
        assert!(matches!(
            form.set_checked("name", true),
            Err(FormError::WrongFieldType { .. })
        ));
        assert!(matches!(
            form.add_array_item("admin"),
            Err(FormError::WrongFieldType { .. })
        ));
        assert_eq!(
            form.set_text("missing", "x"),
            Err(FormError::UnknownField("missing".to_string()))
        );
    }

    #[test]
    fn test_reseed_is_skipped_for_equal_inputs() {
        let changes = Rc::new(RefCell::new(0));
        let counter = changes.clone();
        let mut form =
            SchemaForm::new(profile_schema()).on_change(move |_| *counter.borrow_mut() += 1);

        assert!(!form.reseed(profile_schema(), None));
        assert_eq!(*changes.borrow(), 0);

        form.set_text("name", "typed").unwrap();
        let mut initial = FormData::new();
        initial.insert("age".to_string(), json!(3));
        assert!(form.reseed(profile_schema(), Some(initial)));

        assert_eq!(form.value("name"), Some(&json!("typed")));
        assert_eq!(form.value("age"), Some(&json!(3)));
        assert_eq!(*changes.borrow(), 2);
    }

    #[test]
    fn test_reseed_drops_errors_for_removed_fields() {
        let mut form = SchemaForm::new(profile_schema());
        form.set_number_input("age", "-1").unwrap();
        assert!(!form.submit().is_submitted());
        assert!(form.error("name").is_some());
        assert!(form.error("age").is_some());

        form.reseed(
            schema(json!({
                "properties": { "name": { "type": "string" } },
                "required": ["name"]
            })),
            None,
        );

        assert!(form.error("name").is_some());
        assert!(form.error("age").is_none());
        assert_eq!(form.errors().len(), 1);
    }

    #[test]
    fn test_array_item_input_uses_item_type() {
        let mut form = SchemaForm::new(schema(json!({
            "properties": { "scores": { "type": "array", "items": { "type": "number" } } }
        })));

        form.add_array_item("scores").unwrap();
        assert_eq!(form.value("scores"), Some(&json!([null])));

        form.set_array_item_input("scores", 0, "2.5").unwrap();
        assert_eq!(form.value("scores"), Some(&json!([2.5])));

        form.remove_array_item("scores", 0).unwrap();
        assert_eq!(form.value("scores"), Some(&json!([])));
    }
}
