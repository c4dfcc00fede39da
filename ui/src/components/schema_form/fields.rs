//! Scalar Field Controls
//!
//! One component per [`Control`] variant except arrays. Each control reads its
//! value from the engine reactively and writes edits back through
//! [`apply_edit`], so the input element itself is never rebuilt while typing.

use leptos::prelude::*;
use schemaform::render::{InputType, NumberStep};
use serde_json::Value;

use super::{apply_edit, FormHandle, INPUT_CLASS};

/// Input text for a stored value; `null` and missing values show as empty
fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ============================================================================
// Enum Select
// ============================================================================

#[component]
pub fn EnumSelect(form: FormHandle, name: String, options: Vec<String>) -> impl IntoView {
    let name_for_value = name.clone();

    view! {
        <select
            class=format!("{} bg-yellow-50", INPUT_CLASS)
            prop:value=move || form.with(|f| text_of(f.value(&name_for_value)))
            on:change=move |ev| {
                let value = event_target_value(&ev);
                apply_edit(form, |f| f.set_text(&name, &value));
            }
        >
            <option value="">"-- Select --"</option>
            {options.into_iter().map(|option| {
                view! { <option value=option.clone()>{option.clone()}</option> }
            }).collect_view()}
        </select>
    }
}

// ============================================================================
// Text Area
// ============================================================================

#[component]
pub fn TextAreaInput(form: FormHandle, name: String) -> impl IntoView {
    let name_for_value = name.clone();

    view! {
        <textarea
            rows="4"
            class=INPUT_CLASS
            prop:value=move || form.with(|f| text_of(f.value(&name_for_value)))
            on:input=move |ev| {
                let value = event_target_value(&ev);
                apply_edit(form, |f| f.set_text(&name, &value));
            }
        ></textarea>
    }
}

// ============================================================================
// Text Input
// ============================================================================

#[component]
pub fn TextInput(form: FormHandle, name: String, input_type: InputType) -> impl IntoView {
    let name_for_value = name.clone();

    view! {
        <input
            type=input_type.as_str()
            class=INPUT_CLASS
            prop:value=move || form.with(|f| text_of(f.value(&name_for_value)))
            on:input=move |ev| {
                let value = event_target_value(&ev);
                apply_edit(form, |f| f.set_text(&name, &value));
            }
        />
    }
}

// ============================================================================
// Number Input
// ============================================================================

/// Empty input stores `null`; text that is not a number is ignored
#[component]
pub fn NumberInput(
    form: FormHandle,
    name: String,
    step: NumberStep,
    min: Option<f64>,
    max: Option<f64>,
) -> impl IntoView {
    let name_for_value = name.clone();

    // Only set min/max attributes when they have values
    let min_attr = min.map(|v| v.to_string());
    let max_attr = max.map(|v| v.to_string());

    view! {
        <input
            type="number"
            step=step.as_str()
            min=min_attr
            max=max_attr
            class=INPUT_CLASS
            prop:value=move || {
                form.with(|f| {
                    f.value(&name_for_value)
                        .and_then(Value::as_f64)
                        .map(|n| n.to_string())
                        .unwrap_or_default()
                })
            }
            on:input=move |ev| {
                let raw = event_target_value(&ev);
                apply_edit(form, |f| f.set_number_input(&name, &raw));
            }
        />
    }
}

// ============================================================================
// Checkbox
// ============================================================================

#[component]
pub fn CheckboxInput(form: FormHandle, name: String) -> impl IntoView {
    let name_for_value = name.clone();
    let checked = Memo::new(move |_| {
        form.with(|f| f.value(&name_for_value).and_then(Value::as_bool).unwrap_or(false))
    });

    view! {
        <label class="inline-flex items-center gap-2 cursor-pointer">
            <input
                type="checkbox"
                class="h-4 w-4 text-teal-600 border-gray-300 rounded focus:ring-teal-500"
                prop:checked=move || checked.get()
                on:change=move |ev| {
                    let value = event_target_checked(&ev);
                    apply_edit(form, |f| f.set_checked(&name, value));
                }
            />
            <span class="text-sm text-gray-700">
                {move || if checked.get() { "Yes" } else { "No" }}
            </span>
        </label>
    }
}

// ============================================================================
// Object Placeholder
// ============================================================================

#[component]
pub fn ObjectPlaceholder(message: &'static str) -> impl IntoView {
    view! {
        <div class="px-3 py-2 text-sm bg-gray-100 text-gray-500 rounded-md italic border border-dashed border-gray-300">
            {message}
        </div>
    }
}
