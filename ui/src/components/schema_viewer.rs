use leptos::prelude::*;
use schemaform::schema::JsonSchema;
use schemaform::viewer::SchemaSummary;

/// Read-only table of a schema's fields
#[component]
pub fn SchemaViewer(#[prop(into)] schema: Signal<JsonSchema>) -> impl IntoView {
    let summary = Memo::new(move |_| schema.with(SchemaSummary::from_schema));

    view! {
        <div class="bg-white rounded-lg shadow overflow-hidden">
            {move || summary.get().description.map(|description| view! {
                <div class="px-6 py-3 text-sm text-gray-600 border-b border-gray-100">{description}</div>
            })}
            <table class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50">
                    <tr>
                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Name"</th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Type"</th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Constraints"</th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Description"</th>
                    </tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-200">
                    {move || summary.get().properties.into_iter().map(|property| {
                        let type_label = match &property.format {
                            Some(format) => format!("{} ({})", property.type_name, format),
                            None => property.type_name.clone(),
                        };
                        view! {
                            <tr class="hover:bg-gray-50">
                                <td class="px-6 py-4 whitespace-nowrap">
                                    <span class="text-sm font-medium text-gray-900">{property.name.clone()}</span>
                                    {property.required.then(|| view! {
                                        <span class="ml-2 px-2 text-xs font-semibold rounded-full bg-red-100 text-red-700">"Required"</span>
                                    })}
                                </td>
                                <td class="px-6 py-4 whitespace-nowrap">
                                    <span class="px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-teal-100 text-teal-800">
                                        {type_label}
                                    </span>
                                </td>
                                <td class="px-6 py-4 text-sm text-gray-500">
                                    {property.constraints.join("; ")}
                                    {property.default.as_ref().map(|default| view! {
                                        <div class="text-xs text-gray-400">
                                            "Default: "<code class="font-mono">{default.to_string()}</code>
                                        </div>
                                    })}
                                </td>
                                <td class="px-6 py-4 text-sm text-gray-500">
                                    {property.description.clone().unwrap_or_default()}
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}
