use leptos::prelude::*;
use schemaform::form::{FormData, FormOptions};
use schemaform::schema::JsonSchema;

mod components;

pub use components::schema_form::SchemaFormGenerator;
pub use components::schema_viewer::SchemaViewer;

const DEMO_SCHEMA: &str = r#"{
  "description": "Create an account",
  "properties": {
    "username": { "type": "string", "minLength": 3, "maxLength": 20, "description": "Public handle" },
    "email": { "type": "string", "format": "email" },
    "website": { "type": "string", "format": "uri" },
    "plan": { "type": "string", "enum": ["free", "pro", "team"], "default": "free" },
    "age": { "type": "integer", "minimum": 13 },
    "bio": { "type": "string", "maxLength": 500 },
    "newsletter": { "type": "boolean", "default": true },
    "interests": { "type": "array", "items": { "type": "string" }, "maxItems": 5 },
    "settings": { "type": "object" }
  },
  "required": ["username", "email"]
}"#;

/// Playground: edit a schema on the left, fill the generated form on the right
#[component]
pub fn App() -> impl IntoView {
    let (schema_text, set_schema_text) = signal(DEMO_SCHEMA.to_string());
    let (schema, set_schema) = signal(
        JsonSchema::from_json_str(DEMO_SCHEMA).unwrap_or_default(),
    );
    let (schema_error, set_schema_error) = signal(Option::<String>::None);
    let (live_data, set_live_data) = signal(FormData::new());
    let (submitted, set_submitted) = signal(Option::<FormData>::None);

    // Only adopt schemas that parse, so a half-typed edit keeps the last good form
    Effect::new(move |_| match JsonSchema::from_json_str(&schema_text.get()) {
        Ok(parsed) => {
            set_schema_error.set(None);
            set_schema.set(parsed);
        }
        Err(e) => set_schema_error.set(Some(e.to_string())),
    });

    let on_submit = Callback::new(move |data: FormData| {
        log::info!("Submitted {} fields", data.len());
        set_submitted.set(Some(data));
    });
    let on_change = Callback::new(move |data: FormData| set_live_data.set(data));

    let form_options = FormOptions {
        submit_button_text: "Create account".to_string(),
        ..FormOptions::default()
    };

    let pretty = |data: &FormData| serde_json::to_string_pretty(data).unwrap_or_default();

    view! {
        <div class="min-h-screen bg-gray-100 p-6">
            <h1 class="text-2xl font-bold mb-6">"Schema Form Playground"</h1>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <div class="space-y-4">
                    <div class="bg-white rounded-lg shadow p-4">
                        <h2 class="text-lg font-semibold mb-2">"Schema"</h2>
                        <textarea
                            rows="18"
                            class="w-full px-3 py-2 text-xs font-mono border border-gray-300 rounded-md"
                            prop:value=move || schema_text.get()
                            on:input=move |ev| set_schema_text.set(event_target_value(&ev))
                        ></textarea>
                        {move || schema_error.get().map(|e| view! {
                            <p class="mt-2 text-xs text-red-600">{e}</p>
                        })}
                    </div>
                    <SchemaViewer schema=schema />
                </div>

                <div class="space-y-4">
                    <div class="bg-white rounded-lg shadow p-4">
                        <h2 class="text-lg font-semibold mb-4">"Form"</h2>
                        <SchemaFormGenerator
                            schema=schema
                            on_submit=on_submit
                            on_change=on_change
                            options=form_options
                        />
                    </div>
                    <div class="bg-white rounded-lg shadow p-4">
                        <h2 class="text-sm font-semibold text-gray-600 mb-2">"Live data"</h2>
                        <pre class="text-xs font-mono bg-gray-50 p-2 rounded">
                            {move || live_data.with(pretty)}
                        </pre>
                        <h2 class="text-sm font-semibold text-gray-600 mt-4 mb-2">"Last submission"</h2>
                        <pre class="text-xs font-mono bg-gray-50 p-2 rounded">
                            {move || submitted.with(|data| {
                                data.as_ref().map(pretty).unwrap_or_else(|| "Nothing submitted yet".to_string())
                            })}
                        </pre>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
