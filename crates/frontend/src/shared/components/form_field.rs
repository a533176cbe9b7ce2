use leptos::prelude::*;

/// Labelled `<input>` inside a `form-group`.
#[component]
pub fn TextField(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    /// "text" when omitted.
    #[prop(optional, into)]
    input_type: Option<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let input_id = id.clone();
    let label_class = if required { "form-label form-label--required" } else { "form-label" };

    view! {
        <div class="form-group">
            <label class=label_class for=id>{label}</label>
            <input
                type=input_type.unwrap_or_else(|| "text".to_string())
                id=input_id
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}
