//! Main Schema Form Generator Component
//!
//! Builds a form from a [`JsonSchema`], seeds it from defaults and initial
//! values, validates on submit and reports data through callbacks.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use schemaform::form::{FormData, FormOptions, SchemaForm};
use schemaform::render::Control;
use schemaform::schema::JsonSchema;

use super::array_field::ArrayFieldEditor;
use super::fields::*;
use super::FormHandle;

// ============================================================================
// Main Component
// ============================================================================

/// Schema Form Generator Component
///
/// Re-seeds whenever `schema` or `initial_values` change, keeping in-progress
/// edits for fields the new initial values leave out.
#[component]
pub fn SchemaFormGenerator(
    /// The schema to generate a form for
    #[prop(into)]
    schema: Signal<JsonSchema>,
    /// Values that take precedence over schema defaults
    #[prop(into, optional)]
    initial_values: MaybeProp<FormData>,
    /// Called with the form data once every field passes validation
    on_submit: Callback<FormData>,
    /// Called after every change to the form data
    #[prop(optional)]
    on_change: Option<Callback<FormData>>,
    /// Submit button text and visibility
    #[prop(optional)]
    options: FormOptions,
) -> impl IntoView {
    let mut engine = SchemaForm::new(schema.get_untracked())
        .with_options(options.clone())
        .on_submit(move |data| on_submit.run(data.clone()));
    if let Some(initial) = initial_values.get_untracked() {
        engine = engine.with_initial_values(initial);
    }
    if let Some(cb) = on_change {
        engine = engine.on_change(move |data| cb.run(data.clone()));
    }
    let form: FormHandle = RwSignal::new_local(engine);

    // Re-seed when inputs change; the first run sees equal inputs and does nothing
    Effect::new(move |_| {
        let schema = schema.get();
        let initial = initial_values.get();
        form.maybe_update(|f| f.reseed(schema, initial));
    });

    // Rows are keyed by the field's layout, so any schema change that alters how
    // a field is drawn rebuilds that row; value edits keep it
    let fields = Memo::new(move |_| {
        form.with(|f| {
            f.schema()
                .properties()
                .map(|(name, prop)| {
                    let layout = f
                        .render_field(name)
                        .and_then(|view| serde_json::to_string(&view.layout()).ok())
                        .unwrap_or_else(|| prop.type_name().to_string());
                    (name.to_string(), layout)
                })
                .collect::<Vec<_>>()
        })
    });

    let on_form_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        form.update(|f| {
            let outcome = f.submit();
            log::debug!("Form submitted: accepted={}", outcome.is_submitted());
        });
    };

    let submit_button = options
        .show_submit_button
        .then(|| options.submit_button_text.clone());

    view! {
        <form class="schema-form-generator space-y-4" on:submit=on_form_submit novalidate=true>
            <For
                each=move || fields.get()
                key=|field| field.clone()
                children=move |(name, _)| view! { <FieldRow form=form name=name /> }
            />

            {submit_button.map(|label| view! {
                <div class="pt-2">
                    <button
                        type="submit"
                        class="px-4 py-2 bg-teal-600 text-white rounded-lg hover:bg-teal-700"
                    >
                        {label}
                    </button>
                </div>
            })}
        </form>
    }
}

// ============================================================================
// Field Row
// ============================================================================

/// Label, badges, description, control, error and default hint for one field
#[component]
fn FieldRow(form: FormHandle, name: String) -> impl IntoView {
    // The layout is fixed for the row's lifetime; values update reactively
    let Some(field) = form.with_untracked(|f| f.render_field(&name)) else {
        return ().into_any();
    };

    let name_for_error = name.clone();
    let error = Memo::new(move |_| form.with(|f| f.errors().message(&name_for_error)));

    let control = match field.control {
        Control::Select { options, .. } => {
            view! { <EnumSelect form=form name=name.clone() options=options /> }.into_any()
        }
        Control::TextArea { .. } => {
            view! { <TextAreaInput form=form name=name.clone() /> }.into_any()
        }
        Control::TextInput { input_type, .. } => {
            view! { <TextInput form=form name=name.clone() input_type=input_type /> }.into_any()
        }
        Control::NumberInput { step, min, max, .. } => view! {
            <NumberInput form=form name=name.clone() step=step min=min max=max />
        }
        .into_any(),
        Control::Checkbox { .. } => {
            view! { <CheckboxInput form=form name=name.clone() /> }.into_any()
        }
        Control::ArrayList { item_type, .. } => view! {
            <ArrayFieldEditor form=form name=name.clone() item_type=item_type />
        }
        .into_any(),
        Control::ObjectPlaceholder { message } => {
            view! { <ObjectPlaceholder message=message /> }.into_any()
        }
    };

    view! {
        <div class="space-y-1">
            <div class="flex items-center gap-2">
                <label class="text-sm font-medium text-gray-700">{name}</label>
                {field.required.then(|| view! {
                    <span class="px-2 text-xs font-semibold rounded-full bg-red-100 text-red-700">
                        "Required"
                    </span>
                })}
                <span class="px-2 text-xs font-semibold rounded-full bg-teal-100 text-teal-800">
                    {field.type_badge}
                </span>
            </div>

            {field.description.map(|description| view! {
                <p class="text-xs text-gray-500">{description}</p>
            })}

            {control}

            {move || error.get().map(|message| view! {
                <p class="text-xs text-red-600">{message}</p>
            })}

            {field.default_hint.map(|default| view! {
                <p class="text-xs text-gray-400">
                    "Default: "
                    <code class="font-mono">{default.to_string()}</code>
                </p>
            })}
        </div>
    }
    .into_any()
}
