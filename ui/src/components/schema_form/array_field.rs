//! Array Field Component
//!
//! Handles array editing: one single-line input per element, a remove button
//! per element and an "add item" button appending the item type's empty value.

use leptos::prelude::*;
use schemaform::form::ArrayItem;
use serde_json::Value;

use super::{apply_edit, FormHandle, INPUT_CLASS};

// ============================================================================
// Array Field Editor
// ============================================================================

#[component]
pub fn ArrayFieldEditor(form: FormHandle, name: String, item_type: String) -> impl IntoView {
    let name_for_count = name.clone();
    let item_count = Memo::new(move |_| {
        form.with(|f| {
            f.value(&name_for_count)
                .and_then(Value::as_array)
                .map(Vec::len)
                .unwrap_or(0)
        })
    });

    let input_type = match item_type.as_str() {
        "number" | "integer" => "number",
        _ => "text",
    };

    let name_for_add = name.clone();
    let on_add = move |_| {
        apply_edit(form, |f| f.add_array_item(&name_for_add));
    };

    view! {
        <div class="border border-gray-200 rounded-lg p-3 bg-gray-50">
            <div class="flex items-center justify-between mb-2">
                <span class="text-xs text-gray-500">
                    {move || format!("Items: {}", item_count.get())}
                </span>
                <button
                    type="button"
                    class="px-2 py-1 text-xs rounded flex items-center gap-1 text-teal-600 hover:bg-teal-50"
                    on:click=on_add
                >
                    <svg class="w-3 h-3" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4v16m8-8H4"/>
                    </svg>
                    "Add Item"
                </button>
            </div>

            <Show
                when=move || { item_count.get() > 0 }
                fallback=|| view! {
                    <div class="text-sm text-gray-400 italic p-3 text-center">
                        "No items. Click \"Add Item\" to add one."
                    </div>
                }
            >
                <div class="space-y-2">
                    <For
                        each=move || 0..item_count.get()
                        key=|idx| *idx
                        children={
                            let name = name.clone();
                            move |idx| {
                                view! {
                                    <ArrayItemRow
                                        form=form
                                        name=name.clone()
                                        index=idx
                                        input_type=input_type
                                    />
                                }
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}

#[component]
fn ArrayItemRow(
    form: FormHandle,
    name: String,
    index: usize,
    input_type: &'static str,
) -> impl IntoView {
    let name_for_value = name.clone();
    let name_for_remove = name.clone();

    view! {
        <div class="flex items-center gap-2">
            <span class="text-xs font-medium text-gray-600 w-6">{format!("#{}", index + 1)}</span>
            <input
                type=input_type
                class=INPUT_CLASS
                prop:value=move || {
                    form.with(|f| {
                        f.value(&name_for_value)
                            .and_then(|items| items.get(index))
                            .map(|item| ArrayItem::from(item).display_text())
                            .unwrap_or_default()
                    })
                }
                on:input=move |ev| {
                    let raw = event_target_value(&ev);
                    apply_edit(form, |f| f.set_array_item_input(&name, index, &raw));
                }
            />
            <button
                type="button"
                class="text-red-500 hover:bg-red-50 p-1 rounded"
                title="Remove item"
                on:click=move |_| {
                    apply_edit(form, |f| f.remove_array_item(&name_for_remove, index));
                }
            >
                <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>
                </svg>
            </button>
        </div>
    }
}
