use contracts::domain::common::{EntityId, EntityRef};
use leptos::prelude::*;

/// `<select>` over a reference list, bound to an optional id.
#[component]
pub fn ReferenceSelect(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    #[prop(into)] choices: Signal<Vec<EntityRef>>,
    #[prop(into)] value: Signal<Option<EntityId>>,
    on_change: Callback<Option<EntityId>>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let placeholder = placeholder.unwrap_or_else(|| "-- Choisir --".to_string());
    let select_id = id.clone();

    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <select
                id=select_id
                prop:disabled=move || disabled.get()
                on:change=move |ev| on_change.run(event_target_value(&ev).parse::<EntityId>().ok())
            >
                <option value="" selected=move || value.get().is_none()>{placeholder}</option>
                {move || {
                    let current = value.get();
                    choices
                        .get()
                        .into_iter()
                        .map(|choice| {
                            let selected = current == Some(choice.id);
                            view! {
                                <option value=choice.id.to_string() selected=selected>
                                    {choice.display()}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}
